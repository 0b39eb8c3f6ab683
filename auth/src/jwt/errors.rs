use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}
