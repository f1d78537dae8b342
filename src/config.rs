//! Configuration loader and application settings.

use crate::arbitrage::ScanSettings;
use crate::errors::{AppError, Result};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_EXCHANGE_INFO_URL: &str = "https://api.binance.com/api/v3/exchangeInfo";
pub const DEFAULT_TICKER_WS_URL: &str = "wss://stream.binance.com:9443/ws/!ticker@arr";

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// REST endpoint serving venue symbol metadata.
    pub exchange_info_url: String,
    /// WebSocket endpoint publishing all-market best bid/ask tickers.
    pub ticker_ws_url: String,
    pub scan: ScanSettings,
    pub reconnect: ReconnectConfig,
    /// Log a heartbeat every N scans.
    pub heartbeat_every: u64,
}

/// Stream reconnection policy
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectConfig {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Consecutive failed attempts before giving up; 0 retries forever.
    pub max_attempts: u32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
            max_attempts: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let exchange_info_url =
            lookup("EXCHANGE_INFO_URL").unwrap_or_else(|| DEFAULT_EXCHANGE_INFO_URL.into());
        let ticker_ws_url =
            lookup("TICKER_WS_URL").unwrap_or_else(|| DEFAULT_TICKER_WS_URL.into());

        let history_capacity: usize = parse_or(&lookup, "HISTORY_CAPACITY", 10)?;
        if history_capacity == 0 {
            return Err(AppError::Config("HISTORY_CAPACITY must be at least 1".into()));
        }
        let min_profit_pct: f64 = parse_or(&lookup, "MIN_PROFIT_PCT", 0.0)?;
        if !min_profit_pct.is_finite() {
            return Err(AppError::Config("MIN_PROFIT_PCT must be finite".into()));
        }

        let initial_ms: u64 = parse_or(&lookup, "RECONNECT_INITIAL_MS", 1000)?;
        let max_ms: u64 = parse_or(&lookup, "RECONNECT_MAX_MS", 30_000)?;
        if max_ms < initial_ms {
            return Err(AppError::Config(
                "RECONNECT_MAX_MS must not be below RECONNECT_INITIAL_MS".into(),
            ));
        }
        let max_attempts: u32 = parse_or(&lookup, "RECONNECT_MAX_ATTEMPTS", 10)?;
        let heartbeat_every: u64 = parse_or(&lookup, "HEARTBEAT_EVERY", 50)?;

        Ok(Self {
            exchange_info_url,
            ticker_ws_url,
            scan: ScanSettings {
                min_profit_pct,
                history_capacity,
            },
            reconnect: ReconnectConfig {
                initial_delay: Duration::from_millis(initial_ms),
                max_delay: Duration::from_millis(max_ms),
                max_attempts,
            },
            heartbeat_every: heartbeat_every.max(1),
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key}={raw:?}: {e}"))),
        None => Ok(default),
    }
}
