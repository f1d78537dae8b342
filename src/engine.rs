//! Arbitrage engine state: metadata, triangles, live prices, best trade and history.

use crate::arbitrage::{
    MetadataIndex, PriceTable, ScanReport, ScanSettings, TradeHistory, Triangle,
    build_triangles, evaluate_opportunities,
};
use crate::models::{Tick, TradeSummary};
use tracing::warn;

/// Owns all mutable detection state; driven from a single control flow.
#[derive(Debug)]
pub struct ArbitrageEngine {
    index: MetadataIndex,
    triangles: Vec<Triangle>,
    prices: PriceTable,
    settings: ScanSettings,
    best: Option<TradeSummary>,
    last_opportunities: Vec<TradeSummary>,
    history: TradeHistory,
}

impl ArbitrageEngine {
    /// Build the triangle set once from `index`.
    pub fn new(index: MetadataIndex, settings: ScanSettings) -> Self {
        let triangles = build_triangles(&index);
        let history = TradeHistory::with_capacity(settings.history_capacity);
        Self {
            index,
            triangles,
            prices: PriceTable::new(),
            settings,
            best: None,
            last_opportunities: Vec::new(),
            history,
        }
    }

    /// Apply a batch of ticks in order; invalid ticks are dropped.
    ///
    /// Returns the number of ticks accepted.
    pub fn apply_ticks(&mut self, ticks: &[Tick]) -> usize {
        let mut accepted = 0;
        for tick in ticks {
            match self.prices.update(&tick.symbol, &tick.bid, &tick.ask) {
                Ok(()) => accepted += 1,
                Err(e) => warn!(error = %e, "[FEED] dropping tick"),
            }
        }
        accepted
    }

    /// Evaluate every triangle and record the outcome.
    ///
    /// A scan without any profitable cycle clears the current best trade;
    /// earlier bests stay in the history.
    pub fn scan(&mut self) -> ScanReport {
        let report =
            evaluate_opportunities(&self.triangles, &self.prices, &self.index, &self.settings);
        self.best = report.best().cloned();
        if let Some(best) = &self.best {
            self.history.push(best.clone());
        }
        self.last_opportunities = report.opportunities.clone();
        report
    }

    /// Apply one stream message worth of ticks, then scan.
    pub fn on_batch(&mut self, ticks: &[Tick]) -> ScanReport {
        self.apply_ticks(ticks);
        self.scan()
    }

    pub fn best_trade(&self) -> Option<&TradeSummary> {
        self.best.as_ref()
    }

    /// Past best trades, newest first.
    pub fn history(&self) -> Vec<TradeSummary> {
        self.history.to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Profitable cycles from the most recent scan, best first.
    pub fn last_opportunities(&self) -> &[TradeSummary] {
        &self.last_opportunities
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn symbol_count(&self) -> usize {
        self.index.len()
    }

    pub fn priced_symbols(&self) -> usize {
        self.prices.len()
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Price, SymbolRecord};

    fn engine(capacity: usize) -> ArbitrageEngine {
        let index = MetadataIndex::from_records(&[
            SymbolRecord::new("BTCUSDT", "BTC", "USDT", "TRADING"),
            SymbolRecord::new("ETHBTC", "ETH", "BTC", "TRADING"),
            SymbolRecord::new("ETHUSDT", "ETH", "USDT", "TRADING"),
            SymbolRecord::new("BNBUSDT", "BNB", "USDT", "HALT"),
        ]);
        ArbitrageEngine::new(
            index,
            ScanSettings {
                history_capacity: capacity,
                ..ScanSettings::default()
            },
        )
    }

    fn profitable_batch() -> Vec<Tick> {
        vec![
            Tick::new("BTCUSDT", "30000", "30010"),
            Tick::new("ETHBTC", "0.07", "0.069"),
            Tick::new("ETHUSDT", "2105", "2110"),
        ]
    }

    #[test]
    fn startup_builds_triangles_once() {
        let engine = engine(10);
        assert_eq!(engine.symbol_count(), 3);
        assert_eq!(engine.triangle_count(), 1);
        assert!(engine.best_trade().is_none());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn profitable_batch_sets_best_and_history() {
        let mut engine = engine(10);
        let report = engine.on_batch(&profitable_batch());
        assert_eq!(report.evaluated, 1);

        let best = engine.best_trade().cloned().expect("scenario is profitable");
        assert!(best.profit_pct > 0.0);
        assert_eq!(engine.history(), vec![best.clone()]);
        assert_eq!(engine.last_opportunities(), &[best]);
    }

    #[test]
    fn partial_prices_produce_no_candidate() {
        let mut engine = engine(10);
        let report = engine.on_batch(&profitable_batch()[..2]);
        assert_eq!(report.evaluated, 0);
        assert_eq!(report.skipped, 1);
        assert!(engine.best_trade().is_none());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn unprofitable_scan_clears_best_but_keeps_history() {
        let mut engine = engine(10);
        engine.on_batch(&profitable_batch());
        assert!(engine.best_trade().is_some());

        engine.on_batch(&[Tick::new("ETHUSDT", "2000", "2001")]);
        assert!(engine.best_trade().is_none());
        assert!(engine.last_opportunities().is_empty());
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn invalid_ticks_are_dropped_without_touching_table() {
        let mut engine = engine(10);
        engine.apply_ticks(&profitable_batch());
        let accepted = engine.apply_ticks(&[
            Tick::new("ETHUSDT", "-5", "2110"),
            Tick::new("BTCUSDT", "oops", "30010"),
            Tick::new("ETHBTC", 0.071, 0.0695),
        ]);
        assert_eq!(accepted, 1);
        assert_eq!(
            engine.prices().get("ETHUSDT"),
            Some(Price {
                bid: 2105.0,
                ask: 2110.0
            })
        );
        assert_eq!(
            engine.prices().get("ETHBTC"),
            Some(Price {
                bid: 0.071,
                ask: 0.0695
            })
        );
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let mut engine = engine(3);
        let mut bids = Vec::new();
        for i in 0..7 {
            let bid = 2105.0 + i as f64;
            bids.push(bid);
            let mut batch = profitable_batch();
            batch[2] = Tick::new("ETHUSDT", bid, 2110.0);
            engine.on_batch(&batch);
        }
        let history = engine.history();
        assert_eq!(history.len(), 3);
        let expected: Vec<f64> = bids
            .iter()
            .rev()
            .take(3)
            .map(|bid| (1.0 / 30010.0) * bid * (1.0 / 0.069))
            .collect();
        for (trade, want) in history.iter().zip(expected) {
            assert!((trade.return_factor - want).abs() < 1e-12);
        }
    }

    #[test]
    fn unknown_symbols_are_stored_but_ignored_by_scan() {
        let mut engine = engine(10);
        let accepted = engine.apply_ticks(&[Tick::new("DOGEUSDT", "0.1", "0.11")]);
        assert_eq!(accepted, 1);
        assert_eq!(engine.priced_symbols(), 1);
        let report = engine.scan();
        assert_eq!(report.skipped, engine.triangle_count());
    }
}
