//! Commodity Channel Index.

use super::CandleSeries;

const PERIOD: usize = 20;

/// Latest CCI(20) value.
///
/// CCI = (TP - SMA(TP)) / (0.015 * mean deviation), where TP is the
/// typical price (high + low + close) / 3. A zero mean deviation reads
/// as 0.
pub fn latest(series: &CandleSeries) -> Option<f64> {
    if series.len() < PERIOD {
        return None;
    }

    let start = series.len() - PERIOD;
    let typical_prices: Vec<f64> = (start..series.len())
        .map(|i| (series.highs[i] + series.lows[i] + series.closes[i]) / 3.0)
        .collect();

    let sma = typical_prices.iter().sum::<f64>() / PERIOD as f64;
    let mean_dev =
        typical_prices.iter().map(|tp| (tp - sma).abs()).sum::<f64>() / PERIOD as f64;

    let current_tp = *typical_prices.last()?;
    if mean_dev == 0.0 {
        return Some(0.0);
    }
    Some((current_tp - sma) / (0.015 * mean_dev))
}
