use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::listing::errors::ListingError;
use crate::domain::listing::models::CreateListingCommand;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::models::ListingQuery;
use crate::domain::listing::models::ListingView;
use crate::domain::listing::ports::ImageInspector;
use crate::domain::listing::ports::ListingRepository;
use crate::domain::listing::ports::ListingServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Domain service implementation for listing operations.
pub struct ListingService<LR, II>
where
    LR: ListingRepository,
    II: ImageInspector,
{
    repository: Arc<LR>,
    image_inspector: Arc<II>,
}

impl<LR, II> ListingService<LR, II>
where
    LR: ListingRepository,
    II: ImageInspector,
{
    pub fn new(repository: Arc<LR>, image_inspector: Arc<II>) -> Self {
        Self {
            repository,
            image_inspector,
        }
    }
}

#[async_trait]
impl<LR, II> ListingServicePort for ListingService<LR, II>
where
    LR: ListingRepository,
    II: ImageInspector,
{
    async fn create_listing(
        &self,
        command: CreateListingCommand,
        owner: &User,
    ) -> Result<Listing, ListingError> {
        self.image_inspector.inspect(&command.image_url).await?;

        let listing = Listing {
            id: ListingId::new(),
            title: command.title,
            description: command.description,
            image_url: command.image_url,
            price: command.price,
            owner_id: owner.id,
            owner_login: owner.login.clone(),
            created_at: Utc::now(),
        };

        let listing = self.repository.create(listing).await?;

        tracing::info!(
            listing_id = %listing.id,
            owner_id = %listing.owner_id,
            "Listing created"
        );

        Ok(listing)
    }

    async fn list_listings(
        &self,
        query: &ListingQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<ListingView>, ListingError> {
        let listings = self.repository.find_page(query).await?;

        Ok(listings
            .into_iter()
            .map(|listing| ListingView::for_viewer(listing, viewer))
            .collect())
    }
}
