use std::env;
use std::path::PathBuf;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DEFAULT_STORE_PATH: &str = "data";
const DEFAULT_JWT_SECRET: &str = "default_secret";
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File,
    Mongo,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" => Some(StoreBackend::Memory),
            "file" | "json" => Some(StoreBackend::File),
            "mongo" | "mongodb" => Some(StoreBackend::Mongo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    /// Directory for the JSON file store
    pub store_path: PathBuf,
    pub mongo_uri: Option<String>,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            store_backend: StoreBackend::Memory,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            mongo_uri: None,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
        }
    }
}

impl AppConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                log::warn!("Unknown STORE_BACKEND {:?}, falling back to memory", value);
                StoreBackend::Memory
            }),
            None => defaults.store_backend,
        };

        if lookup("JWT_SECRET").is_none() {
            log::warn!("JWT_SECRET not set, using the development secret");
        }

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            store_backend,
            store_path: lookup("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            mongo_uri: lookup("MONGODB_URI"),
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            session_ttl_hours: lookup("SESSION_TTL_HOURS")
                .and_then(|s| s.parse().ok())
                .filter(|hours: &i64| *hours > 0)
                .unwrap_or(defaults.session_ttl_hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.session_ttl_hours, 24);
        assert!(config.mongo_uri.is_none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("STORE_BACKEND", "File"),
            ("STORE_PATH", "/var/lib/staybook"),
            ("JWT_SECRET", "s3cret"),
            ("SESSION_TTL_HOURS", "2"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.store_backend, StoreBackend::File);
        assert_eq!(config.store_path, PathBuf::from("/var/lib/staybook"));
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.session_ttl_hours, 2);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("STORE_BACKEND", "redis"),
            ("SESSION_TTL_HOURS", "-5"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.session_ttl_hours, 24);
    }
}
