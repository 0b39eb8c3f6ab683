pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::listing;
pub use domain::listing::service::ListingService;
pub use domain::user;
pub use domain::user::service::UserService;
pub use inbound::http::router::create_router;
pub use outbound::repositories;
