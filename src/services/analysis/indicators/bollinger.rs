//! Bollinger Bands: SMA(20) middle band with bands at two standard
//! deviations.

use super::moving_average::{sma, PERIOD};
use super::CandleSeries;

const MULTIPLIER: f64 = 2.0;

/// Latest upper band value.
pub fn upper(series: &CandleSeries) -> Option<f64> {
    bands(series).map(|(upper, _, _)| upper)
}

/// Latest middle band value (the SMA itself).
pub fn middle(series: &CandleSeries) -> Option<f64> {
    bands(series).map(|(_, middle, _)| middle)
}

/// Latest lower band value.
pub fn lower(series: &CandleSeries) -> Option<f64> {
    bands(series).map(|(_, _, lower)| lower)
}

fn bands(series: &CandleSeries) -> Option<(f64, f64, f64)> {
    let middle = sma(&series.closes, PERIOD)?;
    let window = &series.closes[series.closes.len() - PERIOD..];

    let variance =
        window.iter().map(|v| (v - middle).powi(2)).sum::<f64>() / window.len() as f64;
    let std_dev = variance.sqrt();

    Some((
        middle + MULTIPLIER * std_dev,
        middle,
        middle - MULTIPLIER * std_dev,
    ))
}
