//! HTTP payload types for the URL info API

pub mod error;
pub mod json;
pub mod url_info;

pub use error::UrlInfoError;
pub use json::{json_line, to_json_line};
pub use url_info::UrlInfoResponse;
