/// Gigya API key registered for the tf1.fr web frontend.
const GIGYA_API_KEY: &str = "3_hWgJdARhz_7l1oOp3a8BDLoR9cuWZpUaKG4aqF7gum9_iK3uTZ2VlDBl8ANf8FVk";

/// Consent categories the token endpoint expects to be granted.
const CONSENT_IDS: &[&str] = &[
    "1", "2", "3", "4", "10001", "10003", "10005", "10007", "10013", "10015", "10017", "10019",
    "10009", "10011", "13002", "13001", "10004", "10014", "10016", "10018", "10020", "10010",
    "10012", "10006", "10008",
];

// Declaring an iPhone client makes mediainfo hand out HLS instead of DASH.
const IPHONE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";

/// Provider endpoints and fixed request constants, resolved once at startup.
/// `Default` carries the production values; tests point the URLs at a mock
/// server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Session page queried with `ptrt=<page url>` to seed cookies and
    /// detect an existing login.
    pub session_url: String,
    /// Gigya `accounts.login` endpoint.
    pub login_url: String,
    /// Endpoint exchanging a signed user assertion for a bearer token.
    pub token_url: String,
    /// Base of the mediainfo API; the channel id is appended as a path
    /// segment.
    pub mediainfo_url: String,
    pub api_key: String,
    pub consent_ids: Vec<String>,
    pub mobile_user_agent: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            session_url: "https://www.tf1.fr/compte/connexion".to_string(),
            login_url: "https://compte.tf1.fr/accounts.login".to_string(),
            token_url: "https://www.tf1.fr/token/gigya/web".to_string(),
            mediainfo_url: "https://mediainfo.tf1.fr/mediainfocombo".to_string(),
            api_key: GIGYA_API_KEY.to_string(),
            consent_ids: CONSENT_IDS.iter().map(ToString::to_string).collect(),
            mobile_user_agent: IPHONE_USER_AGENT.to_string(),
        }
    }
}

impl Endpoints {
    pub fn mediainfo_for(&self, channel_id: &str) -> String {
        format!("{}/{channel_id}", self.mediainfo_url)
    }
}
