//! Cache key construction.
//!
//! Keys are `<city>_<kind>`. The kind suffix keeps the four data kinds
//! for one city from ever sharing an entry.

use std::fmt;

/// The four independent data kinds fetched per city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Geo,
    Weather,
    Forecast,
    Aqi,
}

impl DataKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DataKind::Geo => "geo",
            DataKind::Weather => "weather",
            DataKind::Forecast => "forecast",
            DataKind::Aqi => "aqi",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the cache key for one city and data kind.
pub fn cache_key(city: &str, kind: DataKind) -> String {
    format!("{city}_{kind}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_kind_suffixed() {
        assert_eq!(cache_key("London", DataKind::Geo), "London_geo");
        assert_eq!(cache_key("London", DataKind::Weather), "London_weather");
        assert_eq!(cache_key("London", DataKind::Forecast), "London_forecast");
        assert_eq!(cache_key("London", DataKind::Aqi), "London_aqi");
    }

    #[test]
    fn test_kinds_never_collide_for_one_city() {
        let kinds = [DataKind::Geo, DataKind::Weather, DataKind::Forecast, DataKind::Aqi];
        let keys: HashSet<String> = kinds.iter().map(|k| cache_key("Paris", *k)).collect();
        assert_eq!(keys.len(), kinds.len());
    }
}
