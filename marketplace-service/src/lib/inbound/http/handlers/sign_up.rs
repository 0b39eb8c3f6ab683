use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::AccessError;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::LoginError;
use crate::domain::user::models::Login;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::Authentication;
use crate::inbound::http::router::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    authentication: Authentication,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignUpResponseData>, ApiError> {
    if let Authentication::Authenticated { .. } = authentication {
        return Err(AccessError::UserAlreadyAuthenticated.into());
    }

    let Json(body) = payload?;

    state
        .user_service
        .sign_up(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for signing up (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequest {
    login: String,
    password: String,
}

impl SignUpRequest {
    fn try_into_command(self) -> Result<SignUpCommand, LoginError> {
        let login = Login::new(self.login)?;
        Ok(SignUpCommand::new(login, self.password))
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponseData {
    pub id: String,
    pub login: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SignUpResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            login: user.login.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
