//! Access token inspection.
//!
//! Tokens are stored as `bearer <jwt>`. Only the payload claims the client
//! needs are decoded; signatures are the controller's concern.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct Claims {
    user_name: Option<String>,
    exp: Option<i64>,
}

impl TokenInfo {
    /// Decode the JWT payload of an access token. Returns `None` for opaque tokens.
    pub fn decode(access_token: &str) -> Option<Self> {
        let raw = strip_scheme(access_token.trim());
        let payload = raw.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        let claims: Claims = serde_json::from_slice(&bytes).ok()?;
        Some(Self {
            user_name: claims.user_name,
            expires_at: claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)),
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }
}

fn strip_scheme(token: &str) -> &str {
    token
        .strip_prefix("bearer ")
        .or_else(|| token.strip_prefix("Bearer "))
        .unwrap_or(token)
}

/// Build an unsigned `bearer <jwt>` token. Used by test collaborators.
pub fn encode_unsigned(user_name: &str, expires_at: DateTime<Utc>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let claims = serde_json::json!({
        "user_name": user_name,
        "exp": expires_at.timestamp(),
    });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("bearer {}.{}.", header, payload)
}
