use super::metadata::MetadataIndex;
use super::prices::PriceTable;
use super::rate::rate_for;
use super::triangles::Triangle;
use super::types::{ScanReport, ScanSettings};
use crate::models::TradeSummary;
use std::cmp::Ordering;
use tracing::debug;

/// Walk every triangle once against the current prices and rank the profitable ones.
pub fn evaluate_opportunities(
    triangles: &[Triangle],
    prices: &PriceTable,
    index: &MetadataIndex,
    settings: &ScanSettings,
) -> ScanReport {
    let mut report = ScanReport::default();

    for triangle in triangles {
        let Some(trade) = evaluate_triangle(triangle, prices, index) else {
            report.skipped += 1;
            continue;
        };
        report.evaluated += 1;
        debug!("[ARB] {}", trade);
        if trade.profit_pct > settings.min_profit_pct {
            report.opportunities.push(trade);
        }
    }

    // stable: equal profits stay in triangle order, so the first one wins
    report.opportunities.sort_by(|a, b| {
        b.profit_pct
            .partial_cmp(&a.profit_pct)
            .unwrap_or(Ordering::Equal)
    });
    report
}

/// Chain the three legs of `triangle` starting from the base asset of its first symbol.
///
/// Returns `None` when any leg has no price yet or the live pair layout does
/// not fit the stored orientation.
pub fn evaluate_triangle(
    triangle: &Triangle,
    prices: &PriceTable,
    index: &MetadataIndex,
) -> Option<TradeSummary> {
    let [sym1, sym2, sym3] = &triangle.legs;

    let (info1, info2, info3) = (index.get(sym1)?, index.get(sym2)?, index.get(sym3)?);
    // one read per leg
    let (p1, p2, p3) = (prices.get(sym1)?, prices.get(sym2)?, prices.get(sym3)?);

    let start = info1.base.as_str();
    let quote1 = info1.quote.as_str();
    let quote2 = if info2.base != quote1 {
        info2.base.as_str()
    } else {
        info2.quote.as_str()
    };

    let rate1 = rate_for(info1, &p1, start, quote1)?;
    let rate2 = rate_for(info2, &p2, quote1, quote2)?;
    let rate3 = rate_for(info3, &p3, quote2, start)?;

    let product = rate1 * rate2 * rate3;
    if !product.is_finite() {
        return None;
    }
    Some(TradeSummary::new(triangle.legs.clone(), product))
}
