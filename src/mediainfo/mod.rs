pub mod response;

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;

use crate::auth::AuthSession;
use crate::config::Endpoints;
use crate::errors::ResolverError;
pub use response::Delivery;

/// Query mediainfo for a channel. The mobile user agent forces the HLS
/// delivery format; the bearer token authorizes the call. One attempt, no
/// retries — refusals come back as `Delivery::Denied`, anything off-contract
/// as an error.
pub async fn fetch_delivery(
    client: &Client,
    endpoints: &Endpoints,
    channel_id: &str,
    session: &AuthSession,
) -> Result<Delivery, ResolverError> {
    let response = client
        .get(endpoints.mediainfo_for(channel_id))
        .query(&[("context", "MYTF1"), ("pver", "5015000")])
        .header(USER_AGENT, &endpoints.mobile_user_agent)
        .header(AUTHORIZATION, format!("Bearer {}", session.token))
        .send()
        .await?;

    let bytes = response.bytes().await?;
    response::parse_delivery(&bytes)
}
