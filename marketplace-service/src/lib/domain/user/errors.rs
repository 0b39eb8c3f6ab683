use auth::AuthenticationError;
use auth::PasswordError;
use auth::PolicyViolation;
use auth::TokenError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("invalid login format, expected {min}-{max} characters, got {actual}")]
    TooShort {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("invalid login format, expected {min}-{max} characters, got {actual}")]
    TooLong {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("invalid login format, only letters, digits, '_' and '-' are allowed")]
    InvalidCharacters,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("{0}")]
    InvalidLogin(#[from] LoginError),

    #[error("{0}")]
    PasswordPolicy(#[from] PolicyViolation),

    // Domain-level errors
    #[error("login already exists: {0}")]
    AlreadyExists(String),

    #[error("wrong login or password")]
    WrongLoginOrPassword,

    #[error("user not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => UserError::WrongLoginOrPassword,
            AuthenticationError::Password(e) => UserError::Password(e),
            AuthenticationError::Token(e) => UserError::Token(e),
        }
    }
}
