use chrono::Duration;

use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordPolicy;
use crate::password::PolicyViolation;

/// Authentication coordinator combining password policy, hashing and session tokens.
///
/// Holds the signing secret for its whole lifetime; it is shared immutably
/// across requests.
pub struct Authenticator {
    password_policy: PasswordPolicy,
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// Hashes a throwaway secret once so that lookups for unknown users can
    /// spend the same verification work as lookups for known ones.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for session token signing
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash could not be computed
    pub fn new(jwt_secret: &[u8]) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash("decoy-credential-for-unknown-users")?;

        Ok(Self {
            password_policy: PasswordPolicy::new(),
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            decoy_hash,
        })
    }

    /// Check a candidate password against the password policy.
    pub fn validate_password(&self, password: &str, login: &str) -> Result<(), PolicyViolation> {
        self.password_policy.validate(password, login)
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// `stored_hash` is `None` when no account matched the login. The password
    /// is then checked against the decoy hash and the outcome is the same
    /// `InvalidCredentials` a wrong password produces.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash, if an account matched
    /// * `subject` - Identity to put in the token
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or wrong password
    /// * `Password` - Stored hash is unparsable
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: impl ToString,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => {
                let _ = self.password_hasher.verify(password, &self.decoy_hash);
                false
            }
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(subject, ttl)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: ttl.num_seconds(),
        })
    }

    /// Issue a session token without password verification.
    pub fn issue_token(&self, subject: impl ToString, ttl: Duration) -> Result<String, TokenError> {
        self.jwt_handler.issue(subject, ttl)
    }

    /// Verify a session token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.jwt_handler.verify(token)
    }
}
