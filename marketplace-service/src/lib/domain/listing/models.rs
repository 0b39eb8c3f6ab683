use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::domain::listing::errors::ListingError;
use crate::domain::user::models::Login;
use crate::domain::user::models::UserId;

/// Listing entity
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    pub title: Title,
    pub description: Description,
    pub image_url: ImageUrl,
    pub price: Price,
    pub owner_id: UserId,
    pub owner_login: Login,
    pub created_at: DateTime<Utc>,
}

/// Listing as shown to a particular viewer.
///
/// `is_mine` is only known when the viewer is authenticated.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub listing: Listing,
    pub is_mine: Option<bool>,
}

impl ListingView {
    pub fn for_viewer(listing: Listing, viewer: Option<UserId>) -> Self {
        let is_mine = viewer.map(|viewer| viewer == listing.owner_id);
        Self { listing, is_mine }
    }
}

/// Listing unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingId(pub Uuid);

impl ListingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Listing title value type
///
/// Ensures title is 3-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 100;

    pub fn new(title: String) -> Result<Self, ListingError> {
        let length = title.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(ListingError::InvalidTitle {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Listing description value type
///
/// Ensures description is 10-5000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    const MIN_LENGTH: usize = 10;
    const MAX_LENGTH: usize = 5000;

    pub fn new(description: String) -> Result<Self, ListingError> {
        let length = description.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(ListingError::InvalidDescription {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Absolute http(s) URL of the listing image, at most 500 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(Url);

impl ImageUrl {
    const MAX_LENGTH: usize = 500;

    pub fn new(raw: &str) -> Result<Self, ListingError> {
        if raw.chars().count() > Self::MAX_LENGTH {
            return Err(ListingError::InvalidImageUrl(format!(
                "expected at most {} chars",
                Self::MAX_LENGTH
            )));
        }

        let url = Url::parse(raw).map_err(|e| ListingError::InvalidImageUrl(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ListingError::InvalidImageUrl(format!(
                    "unsupported scheme '{}'",
                    other
                )))
            }
        }

        if url.host_str().is_none() {
            return Err(ListingError::InvalidImageUrl("missing host".to_string()));
        }

        Ok(Self(url))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Listing price value type
///
/// Finite, between 0 and 1 000 000 000 inclusive, kept to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1_000_000_000.0;

    pub fn new(value: f64) -> Result<Self, ListingError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ListingError::InvalidPrice(value));
        }
        Ok(Self((value * 100.0).round() / 100.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Command to create a listing. All fields are already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListingCommand {
    pub title: Title,
    pub description: Description,
    pub image_url: ImageUrl,
    pub price: Price,
}

impl CreateListingCommand {
    pub fn new(title: Title, description: Description, image_url: ImageUrl, price: Price) -> Self {
        Self {
            title,
            description,
            image_url,
            price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(Self::CreatedAt),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One page of the listing feed with its filters.
///
/// Construction clamps every parameter into its allowed range; only an
/// inverted price range is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub min_price: f64,
    /// `None` means no upper bound.
    pub max_price: Option<f64>,
}

impl ListingQuery {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Build a query from optional raw parameters.
    ///
    /// # Errors
    /// * `InvalidPriceRange` - Bounded max price is below the min price
    pub fn new(
        page: Option<i64>,
        limit: Option<i64>,
        sort_by: Option<&str>,
        order: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Result<Self, ListingError> {
        let page = match page {
            Some(page) if page >= 1 => u32::try_from(page).unwrap_or(u32::MAX),
            _ => Self::DEFAULT_PAGE,
        };

        let limit = match limit {
            Some(limit) if (1..=i64::from(Self::MAX_LIMIT)).contains(&limit) => limit as u32,
            _ => Self::DEFAULT_LIMIT,
        };

        let sort_by = sort_by.and_then(SortField::parse).unwrap_or_default();
        let order = order.and_then(SortOrder::parse).unwrap_or_default();

        let min_price = match min_price {
            Some(min) if min.is_finite() && min > 0.0 => min,
            _ => 0.0,
        };

        let max_price = match max_price {
            Some(max) if max.is_finite() && max > 0.0 && max <= Price::MAX => Some(max),
            _ => None,
        };

        if let Some(max) = max_price {
            if max < min_price {
                return Err(ListingError::InvalidPriceRange);
            }
        }

        Ok(Self {
            page,
            limit,
            sort_by,
            order,
            min_price,
            max_price,
        })
    }

    /// Number of listings to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
            sort_by: SortField::default(),
            order: SortOrder::default(),
            min_price: 0.0,
            max_price: None,
        }
    }
}
