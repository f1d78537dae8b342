use crate::models::TradeSummary;

/// Configuration for triangle scanning
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Only cycles strictly above this profit (percent) are reported.
    pub min_profit_pct: f64,
    /// Number of past best trades to keep.
    pub history_capacity: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            min_profit_pct: 0.0,
            history_capacity: 10,
        }
    }
}

/// Result of evaluating every triangle once
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Triangles for which all three rates resolved.
    pub evaluated: usize,
    /// Triangles dropped for a missing price or a direction mismatch.
    pub skipped: usize,
    /// Profitable cycles, highest profit first; ties keep scan order.
    pub opportunities: Vec<TradeSummary>,
}

impl ScanReport {
    pub fn best(&self) -> Option<&TradeSummary> {
        self.opportunities.first()
    }
}
