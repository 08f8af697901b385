//! Session context shared by the HTTP client and the stores.
//!
//! The session holds the credential returned by login together with the state
//! cached from the backend on behalf of the signed-in user. Both are wiped
//! together: on logout and whenever the backend answers 401.

mod cache;
mod persistence;
mod store;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use cache::{CachedState, CompanionProfile, UserInfo, WalletInfo};
pub use persistence::{MemoryPersistence, StatePersistence};
pub use store::{SessionStore, StoreError};

/// Which token of the credential is presented as the bearer token.
///
/// The access token is the one the gateway verifies per request. Sending the
/// refresh token instead is kept as an explicit option because older
/// deployments were observed doing so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BearerToken {
    #[default]
    Access,
    Refresh,
}

pub const DEFAULT_BEARER_TOKEN: BearerToken = BearerToken::Access;

impl FromStr for BearerToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "access" => Ok(BearerToken::Access),
            "refresh" => Ok(BearerToken::Refresh),
            other => Err(format!("unknown bearer token '{other}', expected 'access' or 'refresh'")),
        }
    }
}

/// Access/refresh token pair issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionCredential {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds, as reported by the login response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

impl SessionCredential {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_in: None,
        }
    }

    /// The token to present for `source`, if the credential holds one.
    pub fn bearer(&self, source: BearerToken) -> Option<&str> {
        let token = match source {
            BearerToken::Access => &self.access_token,
            BearerToken::Refresh => &self.refresh_token,
        };
        (!token.is_empty()).then_some(token.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty() && self.refresh_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_follows_token_source() {
        let credential = SessionCredential::new("tok123", "ref456");
        assert_eq!(credential.bearer(DEFAULT_BEARER_TOKEN), Some("tok123"));
        assert_eq!(credential.bearer(BearerToken::Refresh), Some("ref456"));

        let access_only = SessionCredential::new("tok123", "");
        assert_eq!(access_only.bearer(BearerToken::Refresh), None);
    }

    #[test]
    fn deserializes_login_payload() {
        let credential: SessionCredential =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r","expiresIn":7200}"#).unwrap();
        assert_eq!(credential.access_token, "a");
        assert_eq!(credential.expires_in, Some(7200));
    }
}
