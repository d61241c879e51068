use serde::Deserialize;
use serde_json::Value;

use super::UserAssertion;

/// Body of a successful token exchange. All four fields are required;
/// anything else means the provider changed its contract.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub refresh_token: String,
    pub ttl: u64,
    #[serde(rename = "type")]
    pub token_type: String,
}

/// Extract the signed user assertion from a Gigya login or session body.
/// Gigya serializes `timestamp` either as an integer or a decimal string.
pub fn assertion_from_body(body: &Value) -> Option<UserAssertion> {
    let signature = body["userSignature"].as_str()?.to_string();
    let user_id = body["UID"].as_str()?.to_string();
    let timestamp = match &body["timestamp"] {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.parse().ok()?,
        _ => return None,
    };
    Some(UserAssertion {
        signature,
        user_id,
        timestamp,
    })
}
