//! Directional conversion rates through a single symbol.

use super::metadata::MetadataIndex;
use super::prices::PriceTable;
use crate::models::{Price, SymbolInfo};

/// Rate for converting `from` into `to` through a symbol with the given pair and price.
///
/// base → quote uses `1 / ask`, quote → base uses `bid`. Any other pairing
/// is not a direction this symbol can trade, and yields `None`.
pub fn rate_for(info: &SymbolInfo, price: &Price, from: &str, to: &str) -> Option<f64> {
    if from == info.base && to == info.quote {
        if price.ask > 0.0 {
            Some(1.0 / price.ask)
        } else {
            None
        }
    } else if from == info.quote && to == info.base {
        Some(price.bid)
    } else {
        None
    }
}

/// Look up `symbol` in the index and price table, then resolve the rate.
pub fn rate(
    index: &MetadataIndex,
    prices: &PriceTable,
    symbol: &str,
    from: &str,
    to: &str,
) -> Option<f64> {
    let info = index.get(symbol)?;
    let price = prices.get(symbol)?;
    rate_for(info, &price, from, to)
}
