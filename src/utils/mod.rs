//! Shared utilities

pub mod http;
pub mod url;

pub use http::build_http_client;
pub use url::UrlUtils;
