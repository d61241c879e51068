pub mod gigya;
pub mod response;

use reqwest::Client;

use crate::account::Credentials;
use crate::config::Endpoints;
use crate::errors::ResolverError;

/// Signed proof of identity produced by a Gigya login (or by an already
/// authenticated session). Consumed exactly once by the token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAssertion {
    pub signature: String,
    pub user_id: String,
    pub timestamp: i64,
}

/// Bearer token authorizing mediainfo calls. Valid for one resolution; the
/// crate never caches it across calls.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub refresh_token: String,
    pub ttl: u64,
    pub token_type: String,
}

/// Run the authentication handshake for one resolution:
///
/// bootstrap -> (login unless the session already holds an assertion)
///           -> token exchange
///
/// Credentials are checked before any network call, the login POST is
/// skipped when the bootstrap reports an existing session, and exactly one
/// attempt is made; every failure is terminal for this resolution.
pub async fn authenticate(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
    page_url: &str,
) -> Result<AuthSession, ResolverError> {
    if !credentials.is_complete() {
        return Err(ResolverError::MissingCredentials);
    }

    let bootstrap = gigya::bootstrap_session(client, endpoints, page_url).await?;
    let assertion = match bootstrap.assertion {
        Some(assertion) => {
            log::debug!("Already authenticated, skipping authentication");
            assertion
        }
        None => {
            gigya::login(
                client,
                endpoints,
                credentials,
                bootstrap.redirect_query.as_deref(),
                page_url,
            )
            .await?
        }
    };

    gigya::exchange_token(client, endpoints, assertion, page_url).await
}
