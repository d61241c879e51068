use reqwest::Client;

use crate::account::Credentials;
use crate::auth;
use crate::channel::ChannelAddress;
use crate::config::Endpoints;
use crate::errors::ResolverError;
use crate::hls::{self, HlsVariant};
use crate::mediainfo::{self, Delivery};

/// Resolves live page URLs into playable HLS variants.
///
/// Every call to [`resolve`](Self::resolve) runs the full sequence on its
/// own: authentication handshake, channel-id derivation, mediainfo call,
/// variant-playlist expansion. Nothing is cached between calls, so the same
/// resolver can serve concurrent resolutions — each holds an independent
/// session.
pub struct StreamResolver {
    client: Client,
    endpoints: Endpoints,
    credentials: Credentials,
}

impl StreamResolver {
    pub fn new(credentials: Credentials) -> Result<Self, ResolverError> {
        Self::with_endpoints(credentials, Endpoints::default())
    }

    pub fn with_endpoints(
        credentials: Credentials,
        endpoints: Endpoints,
    ) -> Result<Self, ResolverError> {
        // the session bootstrap exists to seed cookies the later calls
        // ride on, so the client needs a jar
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            endpoints,
            credentials,
        })
    }

    pub async fn resolve(&self, page_url: &str) -> Result<Vec<HlsVariant>, ResolverError> {
        let address = ChannelAddress::parse(page_url)?;

        let session =
            auth::authenticate(&self.client, &self.endpoints, &self.credentials, page_url).await?;

        let channel = address.channel();
        log::debug!("Found channel {} ({})", channel.name, channel.id);

        let delivery =
            mediainfo::fetch_delivery(&self.client, &self.endpoints, &channel.id, &session).await?;
        match delivery {
            Delivery::Hls { url } => hls::fetch_variants(&self.client, &url).await,
            Delivery::Denied { code, error } => {
                log::error!("Delivery refused ({code}): {error}");
                Err(ResolverError::DeliveryDenied { code, error })
            }
        }
    }
}
