use crate::errors::ResolverError;
use regex::Regex;

/// The three page-URL forms served by the TF1 group:
/// `tf1.fr/<slug>/direct`, `tf1.fr/stream/<slug>`, and the LCI news
/// site (`tf1info.fr` or `lci.fr`) `/direct` page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelAddress {
    Live(String),
    Stream(String),
    Lci,
}

/// A channel as the mediainfo API knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub id: String,
}

impl ChannelAddress {
    /// Classify a live page URL. No network I/O is involved; URLs matching
    /// none of the three forms are rejected as unsupported.
    pub fn parse(url: &str) -> Result<Self, ResolverError> {
        let re = Regex::new(
            r"(?x)
            ^https?://(?:www\.)?
            (?:
                tf1\.fr/(?:
                    (?P<live>[\w-]+)/direct/?
                    |
                    stream/(?P<stream>[\w-]+)
                )
                |
                (?:tf1info|lci)\.fr/direct/?
            )
            (?:[?\#].*)?$
            ",
        )
        .expect("channel url pattern");

        let Some(captures) = re.captures(url) else {
            return Err(ResolverError::UnsupportedUrl {
                url: url.to_string(),
            });
        };

        if let Some(live) = captures.name("live") {
            Ok(Self::Live(live.as_str().to_string()))
        } else if let Some(stream) = captures.name("stream") {
            Ok(Self::Stream(stream.as_str().to_string()))
        } else {
            Ok(Self::Lci)
        }
    }

    /// Derive the display name and canonical mediainfo channel id.
    pub fn channel(&self) -> Channel {
        match self {
            Self::Live(slug) => Channel {
                name: slug.clone(),
                id: format!("L_{}", slug.to_uppercase()),
            },
            Self::Lci => Channel {
                name: "LCI".to_string(),
                id: "L_LCI".to_string(),
            },
            // FAST channel ids keep the slug casing as-is
            Self::Stream(slug) => Channel {
                name: slug.clone(),
                id: format!("L_FAST_v2l-{slug}"),
            },
        }
    }
}
