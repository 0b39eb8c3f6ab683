use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LogInCommand;
use crate::domain::user::models::Login;
use crate::domain::user::models::Session;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;

/// Port for authentication service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// Checks the password policy, hashes the password, then persists.
    ///
    /// # Arguments
    /// * `command` - Validated login and plaintext password
    ///
    /// # Returns
    /// Created user entity (without credentials)
    ///
    /// # Errors
    /// * `PasswordPolicy` - Password rejected by the policy
    /// * `AlreadyExists` - Login is already taken
    /// * `DatabaseError` - Database operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, UserError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Raw login and plaintext password
    ///
    /// # Returns
    /// Session token and its lifetime in seconds
    ///
    /// # Errors
    /// * `WrongLoginOrPassword` - Unknown login or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn log_in(&self, command: LogInCommand) -> Result<Session, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for users.
///
/// Implementations enforce login uniqueness atomically and report a violation
/// as `AlreadyExists`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `AlreadyExists` - Login is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, record: UserRecord) -> Result<User, UserError>;

    /// Retrieve user with credentials by login.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_login(&self, login: &Login) -> Result<Option<UserRecord>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}
