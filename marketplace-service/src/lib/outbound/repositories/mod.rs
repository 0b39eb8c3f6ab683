pub mod listing;
pub mod memory;
pub mod user;

pub use listing::PostgresListingRepository;
pub use memory::InMemoryListingRepository;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
