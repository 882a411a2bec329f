use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/wiki/";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Order in which extracted headings are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingOrder {
    /// All `h1` first, then all `h2`, and so on; document order within a level.
    #[default]
    ByLevel,
    /// Plain document order across all levels.
    Document,
}

impl FromStr for HeadingOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "level" | "by_level" | "by-level" => Ok(HeadingOrder::ByLevel),
            "document" | "doc" => Ok(HeadingOrder::Document),
            other => Err(AppError::config(format!("Invalid heading order: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::config(format!("Invalid log format: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub wiki_base_url: String,
    pub fetch_timeout: Duration,
    pub heading_order: HeadingOrder,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            wiki_base_url: DEFAULT_BASE_URL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            heading_order: HeadingOrder::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source, falling back to
    /// defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("HOST").unwrap_or_else(|| defaults.server_addr.ip().to_string());
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::config(format!("Invalid host address: {}", e)))?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid port: {}", e)))?,
            None => defaults.server_addr.port(),
        };

        let wiki_base_url = lookup("WIKI_BASE_URL").unwrap_or(defaults.wiki_base_url);

        let fetch_timeout = match lookup("FETCH_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| AppError::config(format!("Invalid fetch timeout: {}", e)))?,
            None => defaults.fetch_timeout,
        };

        let heading_order = match lookup("OUTLINE_HEADING_ORDER") {
            Some(order) => order.parse()?,
            None => defaults.heading_order,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(format) => format.parse()?,
            None => defaults.log_format,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            wiki_base_url,
            fetch_timeout,
            heading_order,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.server_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.wiki_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.heading_order, HeadingOrder::ByLevel);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9001"),
            ("FETCH_TIMEOUT_SECS", "3"),
            ("OUTLINE_HEADING_ORDER", "document"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr.to_string(), "127.0.0.1:9001");
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.heading_order, HeadingOrder::Document);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid port"));

        let err = Config::from_lookup(lookup_from(&[("OUTLINE_HEADING_ORDER", "random")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
