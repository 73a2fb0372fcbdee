//! MACD level (fast EMA minus slow EMA).

use super::moving_average::ema;
use super::CandleSeries;

const FAST_PERIOD: usize = 12;
const SLOW_PERIOD: usize = 26;

/// Latest MACD(12, 26) level over closes.
///
/// Positive when the fast EMA sits above the slow one, i.e. recent
/// momentum is up.
pub fn latest(series: &CandleSeries) -> Option<f64> {
    let fast = ema(&series.closes, FAST_PERIOD)?;
    let slow = ema(&series.closes, SLOW_PERIOD)?;
    Some(fast - slow)
}
