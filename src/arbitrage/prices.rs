//! Live best bid/ask table, last write wins.

use crate::errors::{AppError, Result};
use crate::models::{Price, PriceValue};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, Price>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate both sides, then overwrite the entry for `symbol`.
    ///
    /// On error the previous entry (if any) is left untouched.
    pub fn update(&mut self, symbol: &str, bid: &PriceValue, ask: &PriceValue) -> Result<()> {
        let bid = bid
            .parse()
            .map_err(|e| AppError::invalid_price(symbol, format!("bid {e}")))?;
        let ask = ask
            .parse()
            .map_err(|e| AppError::invalid_price(symbol, format!("ask {e}")))?;
        self.prices.insert(symbol.to_string(), Price { bid, ask });
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<Price> {
        self.prices.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
