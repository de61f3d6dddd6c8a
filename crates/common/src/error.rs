//! Unified error type for the weather service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("no geocoding result for city '{0}'")]
    CityNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("aggregation timed out after {0}s")]
    Timeout(u64),

    #[error("Config error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}
