pub mod images;
pub mod repositories;
