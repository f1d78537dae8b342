//! Shared data structures used throughout the application.

use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::fmt;

/// Currency or token identifier, e.g. "BTC".
pub type Asset = String;

/// Raw symbol record as published by the venue metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolRecord {
    pub symbol: String,
    #[serde(rename = "baseAsset")]
    pub base_asset: Asset,
    #[serde(rename = "quoteAsset")]
    pub quote_asset: Asset,
    pub status: String,
}

impl SymbolRecord {
    pub fn new(symbol: &str, base: &str, quote: &str, status: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            base_asset: base.to_string(),
            quote_asset: quote.to_string(),
            status: status.to_string(),
        }
    }
}

/// Base/quote pair of a tradable symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub base: Asset,
    pub quote: Asset,
}

impl SymbolInfo {
    /// The asset on the other side of the pair, if `asset` is one of its two sides.
    pub fn other_side(&self, asset: &str) -> Option<&str> {
        if self.base == asset {
            Some(&self.quote)
        } else if self.quote == asset {
            Some(&self.base)
        } else {
            None
        }
    }
}

/// Best bid/ask for a single symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    /// Best price to sell the base asset.
    pub bid: f64,
    /// Best price to buy the base asset.
    pub ask: f64,
}

/// Price field as it appears on the wire: venues send both `"0.0123"` and `0.0123`.
///
/// Anything else (`null`, booleans, objects, a missing field) is kept as
/// `Other` so that only the owning tick is rejected, not the whole message.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceValue {
    Number(f64),
    Text(String),
    Other(String),
}

impl<'de> Deserialize<'de> for PriceValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(PriceValue::from_raw(raw.get()))
    }
}

impl PriceValue {
    /// Classify raw JSON text. Numbers are read with `str::parse`, so values
    /// beyond the f64 range become infinite and fail `parse` later.
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with('"') {
            return match serde_json::from_str::<String>(raw) {
                Ok(s) => PriceValue::Text(s),
                Err(_) => PriceValue::Other(raw.to_string()),
            };
        }
        match raw.parse::<f64>() {
            Ok(v) => PriceValue::Number(v),
            Err(_) => PriceValue::Other(raw.to_string()),
        }
    }

    fn missing() -> Self {
        PriceValue::Other("<missing>".to_string())
    }

    /// Parse into a finite, non-negative float.
    pub fn parse(&self) -> Result<f64, String> {
        let value = match self {
            PriceValue::Number(v) => *v,
            PriceValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("{s:?} is not numeric ({e})"))?,
            PriceValue::Other(raw) => return Err(format!("{raw} is not numeric")),
        };
        if !value.is_finite() {
            return Err(format!("{value} is not finite"));
        }
        if value < 0.0 {
            return Err(format!("{value} is negative"));
        }
        Ok(value)
    }
}

impl From<f64> for PriceValue {
    fn from(v: f64) -> Self {
        PriceValue::Number(v)
    }
}

impl From<&str> for PriceValue {
    fn from(s: &str) -> Self {
        PriceValue::Text(s.to_string())
    }
}

/// One streamed best bid/ask update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tick {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "b", default = "PriceValue::missing")]
    pub bid: PriceValue,
    #[serde(rename = "a", default = "PriceValue::missing")]
    pub ask: PriceValue,
}

impl Tick {
    pub fn new(symbol: &str, bid: impl Into<PriceValue>, ask: impl Into<PriceValue>) -> Self {
        Self {
            symbol: symbol.to_string(),
            bid: bid.into(),
            ask: ask.into(),
        }
    }
}

/// Outcome of walking one triangle against the current prices.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummary {
    pub path: [String; 3],
    /// Multiplicative return, 1.0 is breakeven.
    pub return_factor: f64,
    pub profit_pct: f64,
}

impl TradeSummary {
    pub fn new(path: [String; 3], return_factor: f64) -> Self {
        Self {
            path,
            return_factor,
            profit_pct: (return_factor - 1.0) * 100.0,
        }
    }
}

impl fmt::Display for TradeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} → {} | Return: {:.6} | Profit: {:.4}%",
            self.path[0], self.path[1], self.path[2], self.return_factor, self.profit_pct
        )
    }
}
