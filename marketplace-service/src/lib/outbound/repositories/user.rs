use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::Login;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;
use crate::domain::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.try_get("id").map_err(database_error)?),
            login: Login::new(row.try_get("login").map_err(database_error)?)?,
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, record: UserRecord) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, login, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.user.id.0)
        .bind(record.user.login.as_str())
        .bind(&record.password_hash)
        .bind(record.user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_login_key")
                {
                    return UserError::AlreadyExists(record.user.login.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(record.user)
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<UserRecord>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, login, password_hash, created_at
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => Ok(Some(UserRecord {
                user: Self::row_to_user(&r)?,
                password_hash: r.try_get("password_hash").map_err(database_error)?,
            })),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, login, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}
