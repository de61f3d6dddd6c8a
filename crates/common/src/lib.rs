//! Shared types for the weather service: the unified error enum and the
//! runtime configuration value.

pub mod config;
pub mod error;

pub use config::ServiceConfig;
pub use error::Error;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
