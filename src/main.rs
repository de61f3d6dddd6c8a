//! weather-service: HTTP aggregation proxy for city weather data.
//!
//! Single-binary Tokio application that:
//! 1. Loads environment-driven configuration
//! 2. Connects to the Redis cache backend
//! 3. Serves per-kind and aggregated weather endpoints over HTTP

mod config;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use aggregator::WeatherService;
use clap::Parser;
use kv_cache::RedisCache;
use openweather_client::OpenWeatherClient;
use tracing::{error, info};

use routes::AppState;

/// City weather aggregation service
#[derive(Parser)]
#[command(name = "weather-service", about = "City weather aggregation service")]
struct Cli {
    /// Validate configuration and exit.
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "weather_service=info,aggregator=info,openweather_client=info,kv_cache=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    // Load configuration.
    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Upstream: weather={}, geo={}",
        cfg.weather_api_base_url, cfg.geo_api_base_url
    );
    info!(
        "Cache: {}:{}, ttl={}s; aggregation deadline={}s",
        cfg.redis_host, cfg.redis_port, cfg.cache_ttl_secs, cfg.aggregate_timeout_secs
    );

    if cli.check_config {
        info!("Configuration OK");
        return;
    }

    // Connect the cache backend; an unreachable backend is fatal here
    // rather than a surprise on the first request.
    let cache = match RedisCache::connect(&cfg.redis_host, cfg.redis_port).await {
        Ok(c) => c,
        Err(e) => {
            error!("Cache backend unavailable: {}", e);
            std::process::exit(1);
        }
    };

    let client = match OpenWeatherClient::new(&cfg) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build upstream client: {}", e);
            std::process::exit(1);
        }
    };

    let service = Arc::new(WeatherService::new(
        Arc::new(client),
        Arc::new(cache),
        Duration::from_secs(cfg.cache_ttl_secs),
        Duration::from_secs(cfg.aggregate_timeout_secs),
    ));

    let app = routes::create_router(AppState { service });

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Listening on {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("weather-service shut down.");
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
