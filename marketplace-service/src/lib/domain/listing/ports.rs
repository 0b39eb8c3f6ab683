use async_trait::async_trait;

use crate::domain::listing::errors::ImageError;
use crate::domain::listing::errors::ListingError;
use crate::domain::listing::models::CreateListingCommand;
use crate::domain::listing::models::ImageUrl;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingQuery;
use crate::domain::listing::models::ListingView;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for listing service operations.
#[async_trait]
pub trait ListingServicePort: Send + Sync + 'static {
    /// Publish a new listing owned by `owner`.
    ///
    /// # Errors
    /// * `InvalidImage` - URL does not resolve to an image
    /// * `DatabaseError` - Database operation failed
    async fn create_listing(
        &self,
        command: CreateListingCommand,
        owner: &User,
    ) -> Result<Listing, ListingError>;

    /// Fetch one page of listings as seen by `viewer`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_listings(
        &self,
        query: &ListingQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<ListingView>, ListingError>;
}

/// Persistence operations for listings.
#[async_trait]
pub trait ListingRepository: Send + Sync + 'static {
    /// Persist new listing to storage.
    async fn create(&self, listing: Listing) -> Result<Listing, ListingError>;

    /// Retrieve one filtered, sorted page of listings.
    async fn find_page(&self, query: &ListingQuery) -> Result<Vec<Listing>, ListingError>;
}

/// Checks that a URL serves an image.
#[async_trait]
pub trait ImageInspector: Send + Sync + 'static {
    async fn inspect(&self, url: &ImageUrl) -> Result<(), ImageError>;
}
