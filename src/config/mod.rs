//! 환경 변수 기반 설정

use crate::error::{MarketError, MarketResult};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 700;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub listen_addr: String,
    /// 설정되어 있으면 PostgreSQL 저장소, 없으면 메모리 저장소
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub reset_database: bool,
    pub simulated_latency: Duration,
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            reset_database: false,
            simulated_latency: Duration::from_millis(DEFAULT_SIMULATED_LATENCY_MS),
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> MarketResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정 구성
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MarketResult<Self> {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            listen_addr: get("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            database_url: get("DATABASE_URL"),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), defaults.max_connections)?,
            reset_database: parse_bool("RESET_DATABASE", get("RESET_DATABASE"), defaults.reset_database)?,
            simulated_latency: Duration::from_millis(parse_or(
                "SIMULATED_LATENCY_MS",
                get("SIMULATED_LATENCY_MS"),
                DEFAULT_SIMULATED_LATENCY_MS,
            )?),
            fetch_timeout: Duration::from_millis(parse_or(
                "FETCH_TIMEOUT_MS",
                get("FETCH_TIMEOUT_MS"),
                DEFAULT_FETCH_TIMEOUT_MS,
            )?),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> MarketResult<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| MarketError::Config(format!("{key}: invalid value {raw:?}"))),
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> MarketResult<bool> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(MarketError::Config(format!("{key}: invalid boolean {v:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> MarketResult<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
        assert_eq!(cfg.simulated_latency, Duration::from_millis(700));
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("LISTEN_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/auction"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("RESET_DATABASE", "TRUE"),
            ("SIMULATED_LATENCY_MS", "0"),
            ("FETCH_TIMEOUT_MS", "250"),
        ])
        .unwrap();
        assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/auction"));
        assert_eq!(cfg.max_connections, 12);
        assert!(cfg.reset_database);
        assert!(cfg.simulated_latency.is_zero());
        assert_eq!(cfg.fetch_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let cfg = config(&[("DATABASE_URL", "  "), ("LISTEN_ADDR", "")]).unwrap();
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("DATABASE_MAX_CONNECTIONS", "many")]),
            Err(MarketError::Config(_))
        ));
        assert!(matches!(
            config(&[("RESET_DATABASE", "maybe")]),
            Err(MarketError::Config(_))
        ));
    }
}
