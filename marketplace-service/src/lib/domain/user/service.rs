use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::session_ttl;
use crate::domain::user::models::LogInCommand;
use crate::domain::user::models::Login;
use crate::domain::user::models::Session;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for signup and login.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password policy, hashing and token signing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, UserError> {
        self.authenticator
            .validate_password(&command.password, command.login.as_str())?;

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let record = UserRecord {
            user: User {
                id: UserId::new(),
                login: command.login,
                created_at: Utc::now(),
            },
            password_hash,
        };

        let user = self.repository.create(record).await?;

        tracing::info!(user_id = %user.id, login = %user.login, "User signed up");

        Ok(user)
    }

    async fn log_in(&self, command: LogInCommand) -> Result<Session, UserError> {
        let record = match Login::new(command.login) {
            Ok(login) => self.repository.find_by_login(&login).await?,
            Err(_) => None,
        };

        let (subject, stored_hash) = match &record {
            Some(record) => (record.user.id.to_string(), Some(record.password_hash.as_str())),
            None => (String::new(), None),
        };

        let result = self.authenticator.authenticate(
            &command.password,
            stored_hash,
            subject,
            session_ttl(),
        );

        match result {
            Ok(result) => {
                if let Some(record) = &record {
                    tracing::info!(user_id = %record.user.id, "User logged in");
                }
                Ok(Session {
                    token: result.access_token,
                    expires_in: result.expires_in,
                })
            }
            Err(e) => {
                tracing::debug!(error = %e, "Login rejected");
                Err(e.into())
            }
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::PolicyViolation;
    use mockall::mock;

    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-64-bytes-long-for-hs512";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, record: UserRecord) -> Result<User, UserError>;
            async fn find_by_login(&self, login: &Login) -> Result<Option<UserRecord>, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET).expect("Failed to create authenticator"))
    }

    fn login(s: &str) -> Login {
        Login::new(s.to_string()).unwrap()
    }

    fn stored_record(authenticator: &Authenticator, login_str: &str, password: &str) -> UserRecord {
        UserRecord {
            user: User {
                id: UserId::new(),
                login: login(login_str),
                created_at: Utc::now(),
            },
            password_hash: authenticator.hash_password(password).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|record| {
                record.user.login.as_str() == "real_user"
                    && record.password_hash.starts_with("$argon2")
                    && record.password_hash != "Str0ng!Pass"
            })
            .times(1)
            .returning(|record| Ok(record.user));

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(login("real_user"), "Str0ng!Pass".to_string());

        let user = service.sign_up(command).await.expect("Sign up failed");
        assert_eq!(user.login.as_str(), "real_user");
    }

    #[tokio::test]
    async fn test_sign_up_policy_violation_skips_store() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(login("real_user"), "short".to_string());

        let result = service.sign_up(command).await;
        assert_eq!(
            result,
            Err(UserError::PasswordPolicy(PolicyViolation::TooShort {
                min: 8,
                got: 5
            }))
        );
    }

    #[tokio::test]
    async fn test_sign_up_password_containing_login() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(login("alice"), "My_Alice_1!".to_string());

        let result = service.sign_up(command).await;
        assert_eq!(
            result,
            Err(UserError::PasswordPolicy(PolicyViolation::ContainsLogin))
        );
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_login() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|record| Err(UserError::AlreadyExists(record.user.login.to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(login("real_user"), "Str0ng!Pass".to_string());

        let result = service.sign_up(command).await;
        assert_eq!(
            result,
            Err(UserError::AlreadyExists("real_user".to_string()))
        );
    }

    #[tokio::test]
    async fn test_log_in_success() {
        let authenticator = authenticator();
        let record = stored_record(&authenticator, "real_user", "Str0ng!Pass");
        let user_id = record.user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .withf(|l| l.as_str() == "real_user")
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let session = service
            .log_in(LogInCommand::new(
                "real_user".to_string(),
                "Str0ng!Pass".to_string(),
            ))
            .await
            .expect("Login failed");

        assert_eq!(session.expires_in, 172_800);

        let claims = authenticator
            .validate_token(&session.token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_log_in_unknown_and_wrong_password_are_identical() {
        let authenticator = authenticator();
        let record = stored_record(&authenticator, "real_user", "Str0ng!Pass");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .returning(move |l| {
                if l.as_str() == "real_user" {
                    Ok(Some(record.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = UserService::new(Arc::new(repository), authenticator);

        let ghost = service
            .log_in(LogInCommand::new("ghost".to_string(), "x".to_string()))
            .await;
        let wrong = service
            .log_in(LogInCommand::new(
                "real_user".to_string(),
                "wrong_pw".to_string(),
            ))
            .await;

        assert_eq!(ghost, Err(UserError::WrongLoginOrPassword));
        assert_eq!(ghost, wrong);
    }

    #[tokio::test]
    async fn test_log_in_malformed_login_is_wrong_credentials() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_login().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .log_in(LogInCommand::new("a b".to_string(), "Str0ng!Pass".to_string()))
            .await;
        assert_eq!(result, Err(UserError::WrongLoginOrPassword));
    }

    #[tokio::test]
    async fn test_log_in_store_failure_propagates() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .log_in(LogInCommand::new(
                "real_user".to_string(),
                "Str0ng!Pass".to_string(),
            ))
            .await;
        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let expected_user = User {
            id: user_id,
            login: login("real_user"),
            created_at: Utc::now(),
        };

        let returned_user = expected_user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let user = service.get_user(&user_id).await.expect("Lookup failed");
        assert_eq!(user, expected_user);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
