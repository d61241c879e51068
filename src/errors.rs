use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Unsupported URL: {url}")]
    UnsupportedUrl { url: String },
    #[error("TF1 requires an account you must login with, set both username and password")]
    MissingCredentials,
    #[error("Could not authenticate, check your username and password (status {status})")]
    AuthenticationRejected { status: reqwest::StatusCode },
    #[error("Unexpected {stage} response: {detail}")]
    ContractViolation { stage: &'static str, detail: String },
    #[error("Delivery denied with code {code}: {error}")]
    DeliveryDenied { code: i64, error: String },
    #[error("Invalid response status: {status}")]
    InvalidResponseStatus { status: reqwest::StatusCode },
    #[error("Parse m3u8 content failed: {content}")]
    M3u8ParseFailed { content: String },
    #[error("Invalid URL: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    #[error("Client error: {0}")]
    ClientError(#[from] reqwest::Error),
}

impl ResolverError {
    fn contract(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::ContractViolation {
            stage,
            detail: detail.into(),
        }
    }

    pub(crate) fn bad_login_body(detail: impl Into<String>) -> Self {
        Self::contract("login", detail)
    }

    pub(crate) fn bad_token_body(detail: impl Into<String>) -> Self {
        Self::contract("token exchange", detail)
    }

    pub(crate) fn bad_mediainfo_body(detail: impl Into<String>) -> Self {
        Self::contract("mediainfo", detail)
    }
}
