use m3u8_rs::Playlist;
use reqwest::Client;
use url::Url;

use crate::errors::ResolverError;

/// One quality-labeled rendition of the live stream.
#[derive(Debug, Clone, PartialEq)]
pub struct HlsVariant {
    /// Quality label, e.g. `"720p"`, or `"1200k"` when the playlist carries
    /// no resolution, or `"live"` for a bare media playlist.
    pub name: String,
    pub url: Url,
    pub bandwidth: u64,
}

/// Fetch the manifest and expand it into quality-labeled variants.
pub async fn fetch_variants(
    client: &Client,
    manifest_url: &Url,
) -> Result<Vec<HlsVariant>, ResolverError> {
    let response = client.get(manifest_url.clone()).send().await?;
    let bytes = response.bytes().await?;
    variants_from_playlist(&bytes, manifest_url)
}

/// Expand a playlist body. Master playlists yield one entry per variant,
/// highest bandwidth first; a media playlist is already the only rendition
/// and yields a single `"live"` entry.
pub fn variants_from_playlist(
    bytes: &[u8],
    manifest_url: &Url,
) -> Result<Vec<HlsVariant>, ResolverError> {
    // every HLS playlist starts with the format tag
    if !bytes.starts_with(b"#EXTM3U") {
        return Err(ResolverError::M3u8ParseFailed {
            content: String::from_utf8_lossy(bytes).to_string(),
        });
    }
    let (_, playlist) = m3u8_rs::parse_playlist(bytes).map_err(|_| {
        ResolverError::M3u8ParseFailed {
            content: String::from_utf8_lossy(bytes).to_string(),
        }
    })?;

    match playlist {
        Playlist::MasterPlaylist(master) => {
            let mut variants = Vec::with_capacity(master.variants.len());
            for variant in &master.variants {
                let url = manifest_url.join(&variant.uri)?;
                let name = match &variant.resolution {
                    Some(resolution) => format!("{}p", resolution.height),
                    None => format!("{}k", variant.bandwidth / 1000),
                };
                variants.push(HlsVariant {
                    name,
                    url,
                    bandwidth: variant.bandwidth,
                });
            }
            variants.sort_by(|a, b| b.bandwidth.cmp(&a.bandwidth));
            Ok(variants)
        }
        Playlist::MediaPlaylist(_) => Ok(vec![HlsVariant {
            name: "live".to_string(),
            url: manifest_url.clone(),
            bandwidth: 0,
        }]),
    }
}
