use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// A signed assertion that `sub` authenticated at `iat`, valid until `exp`.
/// Timestamps are Unix seconds, as RFC 7519 requires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a subject, valid for `ttl` from `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `issued_at` - Issue instant
    /// * `ttl` - Lifetime of the token
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
