use reqwest::header::REFERER;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::response::{assertion_from_body, TokenResponse};
use super::{AuthSession, UserAssertion};
use crate::account::Credentials;
use crate::config::Endpoints;
use crate::errors::ResolverError;

/// What the session bootstrap GET produced: the query string of the final
/// (post-redirect) URL, to be forwarded verbatim to the login call, and the
/// user assertion when the session was already logged in.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOutcome {
    pub redirect_query: Option<String>,
    pub assertion: Option<UserAssertion>,
}

/// GET the session endpoint with `ptrt=<page url>` so the provider knows
/// where to send the user after login. A 200 means the cookie jar already
/// holds an authenticated session and the body carries the assertion.
pub async fn bootstrap_session(
    client: &Client,
    endpoints: &Endpoints,
    page_url: &str,
) -> Result<BootstrapOutcome, ResolverError> {
    let response = client
        .get(&endpoints.session_url)
        .query(&[("ptrt", page_url)])
        .send()
        .await?;

    let redirect_query = response.url().query().map(ToString::to_string);
    if response.status() != StatusCode::OK {
        return Ok(BootstrapOutcome {
            redirect_query,
            assertion: None,
        });
    }

    // The 200 body is only usable if it is assertion JSON; an HTML login
    // page also comes back as 200 and simply means we still have to login.
    let bytes = response.bytes().await?;
    let assertion = serde_json::from_slice::<Value>(&bytes)
        .ok()
        .as_ref()
        .and_then(assertion_from_body);

    Ok(BootstrapOutcome {
        redirect_query,
        assertion,
    })
}

/// POST the Gigya login. The query parameters captured from the bootstrap
/// redirect are forwarded so the provider ties the login to the right
/// return URL. Any non-200 status is a credential rejection.
pub async fn login(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
    redirect_query: Option<&str>,
    page_url: &str,
) -> Result<UserAssertion, ResolverError> {
    let mut request = client
        .post(&endpoints.login_url)
        .header(REFERER, page_url)
        .form(&[
            ("loginID", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("APIKey", endpoints.api_key.as_str()),
        ]);
    if let Some(query) = redirect_query {
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        request = request.query(&pairs);
    }

    let response = request.send().await?;
    if response.status() != StatusCode::OK {
        return Err(ResolverError::AuthenticationRejected {
            status: response.status(),
        });
    }

    let body: Value = response.json().await?;
    assertion_from_body(&body).ok_or_else(|| {
        ResolverError::bad_login_body("missing userSignature/UID/timestamp fields")
    })
}

/// Exchange a signed assertion for a bearer token. The assertion is consumed;
/// it is only valid for one exchange.
pub async fn exchange_token(
    client: &Client,
    endpoints: &Endpoints,
    assertion: UserAssertion,
    page_url: &str,
) -> Result<AuthSession, ResolverError> {
    let mut form: Vec<(&str, String)> = vec![
        ("uid", assertion.user_id),
        ("signature", assertion.signature),
        ("timestamp", assertion.timestamp.to_string()),
    ];
    for id in &endpoints.consent_ids {
        form.push(("consentIds", id.clone()));
    }

    let response = client
        .post(&endpoints.token_url)
        .header(REFERER, page_url)
        .form(&form)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ResolverError::InvalidResponseStatus {
            status: response.status(),
        });
    }

    let bytes = response.bytes().await?;
    let token: TokenResponse = serde_json::from_slice(&bytes)
        .map_err(|e| ResolverError::bad_token_body(e.to_string()))?;

    Ok(AuthSession {
        token: token.token,
        refresh_token: token.refresh_token,
        ttl: token.ttl,
        token_type: token.token_type,
    })
}
