//! Auth token types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk representation of a persisted token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// The access token
    pub access_token: String,
    /// When the token expires, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

impl From<StoredToken> for CachedToken {
    fn from(stored: StoredToken) -> Self {
        Self::new(stored.access_token, stored.expires_at)
    }
}

impl From<&CachedToken> for StoredToken {
    fn from(cached: &CachedToken) -> Self {
        Self {
            access_token: cached.token.clone(),
            expires_at: cached.expires_at,
        }
    }
}
