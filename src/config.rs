//! Configuration loader: merges .env, environment variables, and defaults.

use common::{Error, ServiceConfig};

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64, Error> {
    match raw.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(Error::Config(format!("{env_name} must be an integer > 0"))),
    }
}

fn parse_port(raw: &str, env_name: &str) -> Result<u16, Error> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| Error::Config(format!("{env_name} must be a TCP port number")))
}

fn validate_config(config: &ServiceConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.api_key.trim().is_empty() {
        issues.push("API_KEY is required (set in .env or environment)".into());
    }
    if config.weather_api_base_url.trim().is_empty() {
        issues.push("WEATHER_API_BASE_URL must not be empty".into());
    }
    if config.geo_api_base_url.trim().is_empty() {
        issues.push("GEO_API_BASE_URL must not be empty".into());
    }
    if config.redis_host.trim().is_empty() {
        issues.push("REDIS_HOST must not be empty".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Load service configuration from the environment and an optional .env file.
pub fn load_config() -> Result<ServiceConfig, Error> {
    // 1. Load .env file if present.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = ServiceConfig::default();

    // 3. Override with environment variables.
    if let Ok(key) = std::env::var("API_KEY") {
        config.api_key = key;
    }
    if let Ok(url) = std::env::var("WEATHER_API_BASE_URL") {
        config.weather_api_base_url = url;
    }
    if let Ok(url) = std::env::var("GEO_API_BASE_URL") {
        config.geo_api_base_url = url;
    }
    if let Ok(host) = std::env::var("REDIS_HOST") {
        config.redis_host = host;
    }
    if let Ok(port) = std::env::var("REDIS_PORT") {
        config.redis_port = parse_port(&port, "REDIS_PORT")?;
    }
    if let Ok(ttl) = std::env::var("CACHE_TTL_SECS") {
        config.cache_ttl_secs = parse_positive_u64(&ttl, "CACHE_TTL_SECS")?;
    }
    if let Ok(secs) = std::env::var("AGGREGATE_TIMEOUT_SECS") {
        config.aggregate_timeout_secs = parse_positive_u64(&secs, "AGGREGATE_TIMEOUT_SECS")?;
    }
    if let Ok(port) = std::env::var("PORT") {
        config.port = parse_port(&port, "PORT")?;
    }

    // 4. Validate required fields.
    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "API_KEY",
        "WEATHER_API_BASE_URL",
        "GEO_API_BASE_URL",
        "REDIS_HOST",
        "REDIS_PORT",
        "CACHE_TTL_SECS",
        "AGGREGATE_TIMEOUT_SECS",
        "PORT",
    ];

    fn clear_env() {
        for key in VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_missing_api_key_is_rejected() {
        clear_env();

        let err = load_config().expect_err("API_KEY is required");
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_defaults() {
        clear_env();
        std::env::set_var("API_KEY", "test_api_key");
        std::env::set_var("REDIS_HOST", "cache.internal");
        std::env::set_var("REDIS_PORT", "6380");
        std::env::set_var("CACHE_TTL_SECS", "120");

        let config = load_config().expect("config should load");
        assert_eq!(config.api_key, "test_api_key");
        assert_eq!(config.redis_host, "cache.internal");
        assert_eq!(config.redis_port, 6380);
        assert_eq!(config.cache_ttl_secs, 120);
        // Untouched fields keep their defaults.
        assert_eq!(config.port, 8061);
        assert_eq!(config.aggregate_timeout_secs, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_ttl_is_rejected() {
        clear_env();
        std::env::set_var("API_KEY", "test_api_key");
        std::env::set_var("CACHE_TTL_SECS", "0");

        assert!(load_config().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_non_numeric_port_is_rejected() {
        clear_env();
        std::env::set_var("API_KEY", "test_api_key");
        std::env::set_var("REDIS_PORT", "not-a-port");

        let err = load_config().expect_err("port must parse");
        assert!(err.to_string().contains("REDIS_PORT"));

        clear_env();
    }
}
