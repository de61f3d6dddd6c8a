//! Concurrent multi-source aggregation with cache-aside reads.
//!
//! [`WeatherService`] wraps the upstream client and the cache store into
//! one read-through fetcher per data kind, and composes them into a
//! single deadline-bounded aggregation.

mod keys;
mod service;

pub use keys::{cache_key, DataKind};
pub use service::{WeatherReport, WeatherService};
