use std::convert::Infallible;
use std::sync::Arc;

use auth::Authenticator;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

/// Authentication state of a single request.
///
/// Inserted into request extensions by [`authenticate`] and read by handlers
/// as an extractor. A request that never went through the middleware is
/// anonymous. The subject is kept exactly as signed; handlers resolve it to a
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Authentication {
    #[default]
    Anonymous,
    Authenticated {
        subject: String,
    },
}

impl Authentication {
    pub fn subject(&self) -> Option<&str> {
        match self {
            Authentication::Anonymous => None,
            Authentication::Authenticated { subject } => Some(subject),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Authentication
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Authentication>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Middleware that resolves the bearer token into an [`Authentication`].
///
/// Never rejects: a missing, malformed or invalid token leaves the request
/// anonymous and handlers decide what that means.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Response {
    let authentication = match extract_token_from_header(&req) {
        Some(token) => resolve(&authenticator, token),
        None => Authentication::Anonymous,
    };

    req.extensions_mut().insert(authentication);

    next.run(req).await
}

fn resolve(authenticator: &Authenticator, token: &str) -> Authentication {
    match authenticator.validate_token(token) {
        Ok(claims) => Authentication::Authenticated { subject: claims.sub },
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            Authentication::Anonymous
        }
    }
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let mut parts = auth_str.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}
