//! Symbol metadata index: base/quote lookup plus a reverse asset → symbols index.

use crate::models::{Asset, SymbolInfo, SymbolRecord};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// Status the venue reports for symbols that are open for trading.
pub const TRADING_STATUS: &str = "TRADING";

#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    symbols: HashMap<String, SymbolInfo>,
    /// Symbol ids in load order; triangle enumeration walks this.
    order: Vec<String>,
    by_asset: HashMap<Asset, BTreeSet<String>>,
}

impl MetadataIndex {
    pub fn from_records(records: &[SymbolRecord]) -> Self {
        let mut index = Self::default();
        index.load(records);
        index
    }

    /// Replace the whole index with the tradeable subset of `records`.
    pub fn load(&mut self, records: &[SymbolRecord]) {
        self.symbols.clear();
        self.order.clear();
        self.by_asset.clear();

        let mut skipped = 0usize;
        for rec in records {
            if rec.status != TRADING_STATUS {
                skipped += 1;
                continue;
            }
            if rec.base_asset == rec.quote_asset {
                warn!(symbol = %rec.symbol, asset = %rec.base_asset, "[META] base equals quote, skipping");
                continue;
            }
            if self.symbols.contains_key(&rec.symbol) {
                warn!(symbol = %rec.symbol, "[META] duplicate symbol, keeping first");
                continue;
            }
            let info = SymbolInfo {
                base: rec.base_asset.clone(),
                quote: rec.quote_asset.clone(),
            };
            self.symbols.insert(rec.symbol.clone(), info);
            self.order.push(rec.symbol.clone());
            self.by_asset
                .entry(rec.base_asset.clone())
                .or_default()
                .insert(rec.symbol.clone());
            self.by_asset
                .entry(rec.quote_asset.clone())
                .or_default()
                .insert(rec.symbol.clone());
        }
        debug!(
            symbols = self.order.len(),
            assets = self.by_asset.len(),
            skipped,
            "[META] index loaded"
        );
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.get(symbol)
    }

    /// Symbols having `asset` as base or quote, in lexical order.
    pub fn symbols_for(&self, asset: &str) -> impl Iterator<Item = &str> {
        self.by_asset
            .get(asset)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// All symbols with their pair info, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolInfo)> {
        self.order
            .iter()
            .filter_map(|s| self.symbols.get(s).map(|info| (s.as_str(), info)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn asset_count(&self) -> usize {
        self.by_asset.len()
    }
}
