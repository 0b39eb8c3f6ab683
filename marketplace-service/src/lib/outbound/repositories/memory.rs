//! In-memory repositories.
//!
//! Same contracts as the PostgreSQL adapters, backed by maps guarded with
//! `tokio::sync::RwLock`. Test fixtures for exercising the services and the
//! HTTP API without a database.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::listing::errors::ListingError;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingQuery;
use crate::domain::listing::models::SortField;
use crate::domain::listing::models::SortOrder;
use crate::domain::listing::ports::ListingRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Login;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;
use crate::domain::user::ports::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, record: UserRecord) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|r| r.user.login == record.user.login) {
            return Err(UserError::AlreadyExists(record.user.login.to_string()));
        }

        let user = record.user.clone();
        users.insert(user.id, record);

        Ok(user)
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<UserRecord>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|r| &r.user.login == login).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.get(id).map(|r| r.user.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Listing, b: &Listing, query: &ListingQuery) -> Ordering {
    let ordering = match query.sort_by {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Price => a.price.value().total_cmp(&b.price.value()),
    };

    let ordering = match query.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };

    ordering.then_with(|| a.id.0.cmp(&b.id.0))
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, ListingError> {
        self.listings.write().await.push(listing.clone());
        Ok(listing)
    }

    async fn find_page(&self, query: &ListingQuery) -> Result<Vec<Listing>, ListingError> {
        let listings = self.listings.read().await;

        let mut matching: Vec<Listing> = listings
            .iter()
            .filter(|l| l.price.value() >= query.min_price)
            .filter(|l| query.max_price.map_or(true, |max| l.price.value() <= max))
            .cloned()
            .collect();

        matching.sort_by(|a, b| compare(a, b, query));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .collect())
    }
}
