use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::current_user;
use super::AccessError;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LogInCommand;
use crate::domain::user::models::Session;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::Authentication;
use crate::inbound::http::router::AppState;

pub async fn log_in(
    State(state): State<AppState>,
    authentication: Authentication,
    payload: Result<Json<LogInRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LogInResponseData>, ApiError> {
    let Json(body) = payload?;

    // A token whose subject no longer exists does not block a fresh login.
    if let Some(current) = current_user(&state, &authentication).await? {
        if current.login.as_str() == body.login {
            return Err(AccessError::UserAlreadyAuthenticated.into());
        }
        return Err(AccessError::AlreadyLoggedInAsOther.into());
    }

    state
        .user_service
        .log_in(LogInCommand::new(body.login, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LogInRequestBody {
    login: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInResponseData {
    pub token: String,
    pub expires_in: i64,
}

impl From<&Session> for LogInResponseData {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            expires_in: session.expires_in,
        }
    }
}
