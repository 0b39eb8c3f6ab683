use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::LoginError;
use crate::domain::user::errors::UserIdError;

/// Lifetime of every session token issued at login.
pub const SESSION_TTL_HOURS: i64 = 48;

/// Session token lifetime as a duration.
pub fn session_ttl() -> Duration {
    Duration::hours(SESSION_TTL_HOURS)
}

/// User entity as seen by callers.
///
/// Carries no credential material; the password hash lives only in
/// [`UserRecord`], which never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login: Login,
    pub created_at: DateTime<Utc>,
}

/// User as persisted, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login value type
///
/// Ensures login is 3-32 characters of letters, digits, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid login.
    ///
    /// # Errors
    /// * `TooShort` - Login shorter than 3 characters
    /// * `TooLong` - Login longer than 32 characters
    /// * `InvalidCharacters` - Contains characters other than letters, digits, `_` and `-`
    pub fn new(login: String) -> Result<Self, LoginError> {
        let login = Self::with_valid_length(login)?;
        let login = Self::with_valid_chars(login)?;
        Ok(Self(login))
    }

    fn with_valid_length(login: String) -> Result<String, LoginError> {
        let length = login.chars().count();
        if length < Self::MIN_LENGTH {
            Err(LoginError::TooShort {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(LoginError::TooLong {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(login)
        }
    }

    fn with_valid_chars(login: String) -> Result<String, LoginError> {
        if login
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(login)
        } else {
            Err(LoginError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to sign up a new user.
pub struct SignUpCommand {
    pub login: Login,
    pub password: String,
}

impl SignUpCommand {
    pub fn new(login: Login, password: String) -> Self {
        Self { login, password }
    }
}

impl fmt::Debug for SignUpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpCommand")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to log in.
///
/// The login is kept raw: a malformed login must fail exactly like an
/// unknown one.
pub struct LogInCommand {
    pub login: String,
    pub password: String,
}

impl LogInCommand {
    pub fn new(login: String, password: String) -> Self {
        Self { login, password }
    }
}

impl fmt::Debug for LogInCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogInCommand")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Issued session returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_in: i64,
}
