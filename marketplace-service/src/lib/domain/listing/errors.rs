use thiserror::Error;

/// Reasons an image URL is rejected by the image inspector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("URL does not point to an image")]
    Unreachable,

    #[error("image is too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },

    #[error("invalid image mime type")]
    NotAnImage,
}

/// Top-level error for all listing-related operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListingError {
    // Value object validation errors
    #[error("invalid title format, expected {min}-{max} chars, got {actual}")]
    InvalidTitle {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("invalid description format, expected {min}-{max} chars, got {actual}")]
    InvalidDescription {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("invalid image URL: {0}")]
    InvalidImageUrl(String),

    #[error("invalid price, expected a number between 0 and 1000000000, got {0}")]
    InvalidPrice(f64),

    #[error("{0}")]
    InvalidImage(#[from] ImageError),

    #[error("max price must be greater than min price")]
    InvalidPriceRange,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
