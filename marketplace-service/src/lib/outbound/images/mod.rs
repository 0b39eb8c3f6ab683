pub mod http;

pub use http::HttpImageInspector;
