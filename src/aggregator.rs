//! Per-scan reporting for the detector loop.

use crate::arbitrage::ScanReport;
use crate::engine::ArbitrageEngine;
use tracing;

/// What the reporter emitted for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanLog {
    Opportunity,
    Heartbeat,
    Quiet,
}

/// Logs opportunities as they appear and a heartbeat every `heartbeat_every` quiet scans.
#[derive(Debug, Clone)]
pub struct ScanReporter {
    heartbeat_every: u64,
    scans: u64,
    quiet: u64,
}

impl ScanReporter {
    pub fn new(heartbeat_every: u64) -> Self {
        Self {
            heartbeat_every: heartbeat_every.max(1),
            scans: 0,
            quiet: 0,
        }
    }

    pub fn scans(&self) -> u64 {
        self.scans
    }

    pub fn observe(&mut self, engine: &ArbitrageEngine, report: &ScanReport) -> ScanLog {
        self.scans += 1;

        if let Some(best) = engine.best_trade() {
            let top: Vec<String> = report
                .opportunities
                .iter()
                .take(3)
                .map(|t| t.to_string())
                .collect();
            tracing::info!(
                path = %best.path.join(" → "),
                return_factor = best.return_factor,
                profit_pct = best.profit_pct,
                candidates = report.opportunities.len(),
                top = ?top,
                "[OPP] best triangle"
            );
            ScanLog::Opportunity
        } else {
            self.quiet += 1;
            if self.quiet % self.heartbeat_every != 0 {
                return ScanLog::Quiet;
            }
            tracing::info!(
                scans = self.scans,
                priced = engine.priced_symbols(),
                triangles = engine.triangle_count(),
                evaluated = report.evaluated,
                skipped = report.skipped,
                history = engine.history_len(),
                "[HEARTBEAT] no profitable triangle"
            );
            ScanLog::Heartbeat
        }
    }
}
