//! Timeframe aggregation for daily bar series.
//!
//! Collapses a date-ascending run of daily bars into weekly or monthly
//! bars. Daily aggregation is the identity transform.

use chrono::NaiveDate;

use crate::types::{Bar, Timeframe};

/// Merge a date-ascending bar sequence into `timeframe` periods.
///
/// Input must be sorted ascending by date and belong to a single symbol;
/// the store's history queries guarantee both. Each aggregate carries the
/// period-start date, the symbol metadata of the first bar in its period,
/// the first open, the last close, the extreme high/low, and the summed
/// volume (absent volumes count as zero). Source bars are never mutated.
pub fn aggregate(bars: &[Bar], timeframe: Timeframe) -> Vec<Bar> {
    if timeframe == Timeframe::Daily {
        return bars.to_vec();
    }

    let mut aggregated = Vec::new();
    let mut current: Option<(NaiveDate, Bar)> = None;

    for bar in bars {
        let period = timeframe.period_start(bar.date);
        match &mut current {
            Some((key, acc)) if *key == period => {
                acc.high = acc.high.max(bar.high);
                acc.low = acc.low.min(bar.low);
                // Last bar in the period wins the close
                acc.close = bar.close;
                acc.volume = Some(acc.volume.unwrap_or(0.0) + bar.volume_or_zero());
            }
            slot => {
                if let Some((_, finished)) = slot.take() {
                    aggregated.push(finished);
                }
                *slot = Some((period, seed_aggregate(bar, period)));
            }
        }
    }

    if let Some((_, finished)) = current {
        aggregated.push(finished);
    }

    aggregated
}

/// Start a new period accumulator from its first bar.
fn seed_aggregate(bar: &Bar, period: NaiveDate) -> Bar {
    Bar {
        id: None,
        symbol: bar.symbol.clone(),
        date: period,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: Some(bar.volume_or_zero()),
        quote_asset_volume: None,
        base_asset: bar.base_asset.clone(),
        quote_asset: bar.quote_asset.clone(),
    }
}
