//! HTTP API Client
//!
//! Bindings to the backend `/items` endpoints, organized by concern:
//! - http: gloo-net transport used in the browser
//! - items: list/create/delete calls and their wire encoding

mod http;
mod items;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpTransport;
pub use items::ItemsApi;

/// Request failure. Every variant ends up in the same user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("{0}")]
    Transport(String),
    /// Non-2xx response; displays the status reason phrase
    #[error("{reason}")]
    Status { code: u16, reason: String },
    /// The response body was not the expected JSON
    #[error("{0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Minimal request surface the item calls need.
///
/// Paths are absolute (`/items/...`); implementations prepend their base URL.
/// Both calls resolve to the response body text of a 2xx response.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<String, ApiError>;

    /// POST an `application/x-www-form-urlencoded` body
    async fn post_form(&self, path: &str, body: String) -> Result<String, ApiError>;
}
