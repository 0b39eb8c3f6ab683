use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::current_user;
use super::AccessError;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::listing::errors::ListingError;
use crate::domain::listing::models::CreateListingCommand;
use crate::domain::listing::models::Description;
use crate::domain::listing::models::ImageUrl;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingView;
use crate::domain::listing::models::Price;
use crate::domain::listing::models::Title;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::middleware::Authentication;
use crate::inbound::http::router::AppState;

pub async fn create_listing(
    State(state): State<AppState>,
    authentication: Authentication,
    payload: Result<Json<CreateListingRequest>, JsonRejection>,
) -> Result<ApiSuccess<ListingData>, ApiError> {
    let owner = current_user(&state, &authentication)
        .await?
        .ok_or(AccessError::Unauthorized)?;

    let Json(body) = payload?;

    state
        .listing_service
        .create_listing(body.try_into_command()?, &owner)
        .await
        .map_err(ApiError::from)
        .map(|ref listing| ApiSuccess::new(StatusCode::CREATED, listing.into()))
}

/// HTTP request body for creating a listing (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateListingRequest {
    title: String,
    description: String,
    image_url: String,
    price: f64,
}

impl CreateListingRequest {
    fn try_into_command(self) -> Result<CreateListingCommand, ListingError> {
        let title = Title::new(self.title)?;
        let description = Description::new(self.description)?;
        let image_url = ImageUrl::new(&self.image_url)?;
        let price = Price::new(self.price)?;
        Ok(CreateListingCommand::new(title, description, image_url, price))
    }
}

/// Listing as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub owner_id: String,
    pub owner_login: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_my_listing: Option<bool>,
}

impl From<&Listing> for ListingData {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.to_string(),
            title: listing.title.as_str().to_string(),
            description: listing.description.as_str().to_string(),
            image_url: listing.image_url.as_str().to_string(),
            price: listing.price.value(),
            owner_id: listing.owner_id.to_string(),
            owner_login: listing.owner_login.as_str().to_string(),
            created_at: listing.created_at,
            is_my_listing: None,
        }
    }
}

impl From<&ListingView> for ListingData {
    fn from(view: &ListingView) -> Self {
        Self {
            is_my_listing: view.is_mine,
            ..Self::from(&view.listing)
        }
    }
}
