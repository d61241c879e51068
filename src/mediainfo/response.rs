use serde::Deserialize;
use url::Url;

use crate::errors::ResolverError;

/// How the provider wants the stream fetched: an HLS manifest, or a refusal
/// carrying its error text (geo-block, subscription tier, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Hls { url: Url },
    Denied { code: i64, error: String },
}

#[derive(Debug, Deserialize)]
struct MediaInfoBody {
    delivery: RawDelivery,
}

#[derive(Debug, Deserialize)]
struct RawDelivery {
    code: i64,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode the mediainfo body into exactly one of the two known delivery
/// shapes. Either `url` or `error` must be present, never both, and the
/// success shape additionally requires `code == 200`, `format == "hls"` and
/// a well-formed URL; everything else is rejected as a contract change.
pub fn parse_delivery(bytes: &[u8]) -> Result<Delivery, ResolverError> {
    let body: MediaInfoBody =
        serde_json::from_slice(bytes).map_err(|e| ResolverError::bad_mediainfo_body(e.to_string()))?;
    let delivery = body.delivery;

    match (delivery.url, delivery.error) {
        (Some(url), None) => {
            if delivery.code != 200 {
                return Err(ResolverError::bad_mediainfo_body(format!(
                    "delivery has a url but code {}",
                    delivery.code
                )));
            }
            if delivery.format.as_deref() != Some("hls") {
                return Err(ResolverError::bad_mediainfo_body(format!(
                    "unexpected delivery format {:?}",
                    delivery.format
                )));
            }
            let url = Url::parse(&url)
                .map_err(|e| ResolverError::bad_mediainfo_body(format!("invalid delivery url: {e}")))?;
            Ok(Delivery::Hls { url })
        }
        (None, Some(error)) => Ok(Delivery::Denied {
            code: delivery.code,
            error,
        }),
        (Some(_), Some(_)) => Err(ResolverError::bad_mediainfo_body(
            "delivery carries both a url and an error",
        )),
        (None, None) => Err(ResolverError::bad_mediainfo_body(
            "delivery carries neither a url nor an error",
        )),
    }
}
