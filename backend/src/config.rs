use std::net::SocketAddr;
use std::num::NonZeroU32;

use nonzero_ext::nonzero;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("BIND_ADDR is not a socket address: {0}")]
    BindAddr(String),
    #[error("CONTACT_REQUESTS_PER_HOUR must be a positive integer, got {0}")]
    RequestsPerHour(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_url: Option<String>, // cors origin, any origin when unset
    pub requests_per_hour: NonZeroU32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "contact.db".to_string());

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::BindAddr(raw))?,
            None => SocketAddr::from(([127, 0, 0, 1], 3001)),
        };

        let frontend_url = lookup("FRONTEND_URL").filter(|url| !url.trim().is_empty());

        let requests_per_hour = match lookup("CONTACT_REQUESTS_PER_HOUR") {
            Some(raw) => raw
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::RequestsPerHour(raw))?,
            None => nonzero!(5u32),
        };

        Ok(Self {
            database_url,
            bind_addr,
            frontend_url,
            requests_per_hour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "contact.db");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3001");
        assert_eq!(config.frontend_url, None);
        assert_eq!(config.requests_per_hour.get(), 5);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "/var/lib/club/contact.db"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("FRONTEND_URL", "https://club.example"),
            ("CONTACT_REQUESTS_PER_HOUR", "12"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "/var/lib/club/contact.db");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.frontend_url.as_deref(), Some("https://club.example"));
        assert_eq!(config.requests_per_hour.get(), 12);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config_from(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::BindAddr("localhost".to_string()))
        );
        assert_eq!(
            config_from(&[("CONTACT_REQUESTS_PER_HOUR", "0")]),
            Err(ConfigError::RequestsPerHour("0".to_string()))
        );
    }
}
