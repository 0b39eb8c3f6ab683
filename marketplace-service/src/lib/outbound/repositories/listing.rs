use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::listing::errors::ListingError;
use crate::domain::listing::models::Description;
use crate::domain::listing::models::ImageUrl;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::models::ListingQuery;
use crate::domain::listing::models::Price;
use crate::domain::listing::models::Title;
use crate::domain::listing::ports::ListingRepository;
use crate::domain::user::models::Login;
use crate::domain::user::models::UserId;

pub struct PostgresListingRepository {
    pool: PgPool,
}

impl PostgresListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_listing(row: &PgRow) -> Result<Listing, ListingError> {
        let image_url: String = row.try_get("image_url").map_err(database_error)?;
        let owner_login: String = row.try_get("owner_login").map_err(database_error)?;

        Ok(Listing {
            id: ListingId(row.try_get("id").map_err(database_error)?),
            title: Title::new(row.try_get("title").map_err(database_error)?)?,
            description: Description::new(row.try_get("description").map_err(database_error)?)?,
            image_url: ImageUrl::new(&image_url)?,
            price: Price::new(row.try_get("price").map_err(database_error)?)?,
            owner_id: UserId(row.try_get("owner_id").map_err(database_error)?),
            owner_login: Login::new(owner_login)
                .map_err(|e| ListingError::DatabaseError(e.to_string()))?,
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> ListingError {
    ListingError::DatabaseError(e.to_string())
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, ListingError> {
        sqlx::query(
            r#"
            INSERT INTO listings
                (id, title, description, image_url, price, owner_id, owner_login, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(listing.id.0)
        .bind(listing.title.as_str())
        .bind(listing.description.as_str())
        .bind(listing.image_url.as_str())
        .bind(listing.price.value())
        .bind(listing.owner_id.0)
        .bind(listing.owner_login.as_str())
        .bind(listing.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(listing)
    }

    async fn find_page(&self, query: &ListingQuery) -> Result<Vec<Listing>, ListingError> {
        // Sort column and direction come from closed enums, never from input.
        let sql = format!(
            r#"
            SELECT id, title, description, image_url, price, owner_id, owner_login, created_at
            FROM listings
            WHERE price >= $1
              AND ($2::DOUBLE PRECISION IS NULL OR price <= $2)
            ORDER BY {} {}, id
            LIMIT $3 OFFSET $4
            "#,
            query.sort_by.column(),
            query.order.keyword(),
        );

        let rows = sqlx::query(&sql)
            .bind(query.min_price)
            .bind(query.max_price)
            .bind(i64::from(query.limit))
            .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(Self::row_to_listing).collect()
    }
}
