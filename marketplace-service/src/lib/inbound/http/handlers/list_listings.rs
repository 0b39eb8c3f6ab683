use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::create_listing::ListingData;
use super::current_user;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::listing::models::ListingQuery;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::middleware::Authentication;
use crate::inbound::http::router::AppState;

pub async fn list_listings(
    State(state): State<AppState>,
    authentication: Authentication,
    Query(params): Query<ListListingsParams>,
) -> Result<ApiSuccess<Vec<ListingData>>, ApiError> {
    let viewer = current_user(&state, &authentication).await?.map(|user| user.id);
    let query = params.into_query()?;

    state
        .listing_service
        .list_listings(&query, viewer)
        .await
        .map_err(ApiError::from)
        .map(|views| ApiSuccess::new(StatusCode::OK, views.iter().map(Into::into).collect()))
}

/// Raw query string parameters.
///
/// Kept as strings so that unparsable values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListListingsParams {
    page: Option<String>,
    limit: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
}

impl ListListingsParams {
    fn into_query(self) -> Result<ListingQuery, ApiError> {
        fn parse<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
            value.as_deref().and_then(|v| v.trim().parse().ok())
        }

        Ok(ListingQuery::new(
            parse(&self.page),
            parse(&self.limit),
            self.sort_by.as_deref(),
            self.order.as_deref(),
            parse(&self.min_price),
            parse(&self.max_price),
        )?)
    }
}
