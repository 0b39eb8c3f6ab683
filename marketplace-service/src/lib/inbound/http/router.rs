use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_listing::create_listing;
use super::handlers::health::health;
use super::handlers::list_listings::list_listings;
use super::handlers::log_in::log_in;
use super::handlers::sign_up::sign_up;
use super::middleware::authenticate;
use crate::domain::listing::ports::ListingServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub listing_service: Arc<dyn ListingServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    listing_service: Arc<dyn ListingServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        listing_service,
    };

    // Every route sees the request's authentication state; handlers decide
    // whether it is required.
    let routes = Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/login", post(log_in))
        .route("/listings", post(create_listing).get(list_listings))
        .layer(middleware::from_fn_with_state(authenticator, authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(health))
        .merge(routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
