use thiserror::Error;

/// Error type for password hashing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Reason a password was rejected by the password policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("password must contain at least {min} characters (got {got})")]
    TooShort { min: usize, got: usize },

    #[error("password must contain both uppercase and lowercase letters")]
    NoMixedCase,

    #[error("password must contain at least one number")]
    NoNumber,

    #[error("password must contain at least one special character (!@#$%^&* etc.)")]
    NoSpecialChar,

    #[error("password cannot contain your login")]
    ContainsLogin,
}
