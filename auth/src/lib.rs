//! Authentication utilities library
//!
//! Provides the authentication core used by the marketplace service:
//! - Password policy validation
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS512 JWT)
//! - Authentication coordination
//!
//! Nothing in this crate performs I/O; every operation is a pure, CPU-bound
//! function that is safe to call from any task.
//!
//! # Examples
//!
//! ## Password Policy
//! ```
//! use auth::{PasswordPolicy, PolicyViolation};
//!
//! let policy = PasswordPolicy::new();
//! assert!(policy.validate("Str0ng!Pass", "alice").is_ok());
//! assert_eq!(policy.validate("weak", "alice"), Err(PolicyViolation::TooShort { min: 8, got: 4 }));
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Str0ng!Pass").unwrap();
//! assert!(hasher.verify("Str0ng!Pass", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_64_bytes_long_for_hs512_token_signing_ok!!");
//! let token = handler.issue("user123", Duration::hours(48)).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_64_bytes_long_for_hs512_token_signing_ok!!").unwrap();
//!
//! // Sign up: check policy, hash password
//! auth.validate_password("Str0ng!Pass", "alice").unwrap();
//! let hash = auth.hash_password("Str0ng!Pass").unwrap();
//!
//! // Log in: verify and issue token
//! let result = auth
//!     .authenticate("Str0ng!Pass", Some(&hash), "user123", Duration::hours(48))
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PolicyViolation;
