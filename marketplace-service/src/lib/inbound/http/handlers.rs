use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::listing::errors::ListingError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::Authentication;
use crate::inbound::http::router::AppState;

pub mod create_listing;
pub mod health;
pub mod list_listings;
pub mod log_in;
pub mod sign_up;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Authorization outcomes decided by handlers from the request's
/// authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("user already authenticated")]
    UserAlreadyAuthenticated,

    #[error("another user is currently logged in")]
    AlreadyLoggedInAsOther,

    #[error("unauthorized")]
    Unauthorized,
}

/// Looks up the user named by the request's token subject.
///
/// A subject that is not a user id, or whose user no longer exists, yields
/// `None` just like an anonymous request.
async fn current_user(
    state: &AppState,
    authentication: &Authentication,
) -> Result<Option<User>, ApiError> {
    let Some(subject) = authentication.subject() else {
        return Ok(None);
    };

    let Ok(user_id) = UserId::from_string(subject) else {
        tracing::debug!(subject, "Token subject is not a user id");
        return Ok(None);
    };

    match state.user_service.get_user(&user_id).await {
        Ok(user) => Ok(Some(user)),
        Err(UserError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidLogin(_)
            | UserError::InvalidUserId(_)
            | UserError::PasswordPolicy(_) => ApiError::BadRequest(err.to_string()),
            UserError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::WrongLoginOrPassword => ApiError::Unauthorized(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::InvalidTitle { .. }
            | ListingError::InvalidDescription { .. }
            | ListingError::InvalidImageUrl(_)
            | ListingError::InvalidPrice(_)
            | ListingError::InvalidImage(_)
            | ListingError::InvalidPriceRange => ApiError::BadRequest(err.to_string()),
            ListingError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::UserAlreadyAuthenticated => ApiError::Conflict(err.to_string()),
            AccessError::AlreadyLoggedInAsOther => ApiError::Forbidden(err.to_string()),
            AccessError::Unauthorized => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    error: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, error: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            error,
        }
    }
}
