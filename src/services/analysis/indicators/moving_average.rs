//! Price and volume moving averages.

use super::CandleSeries;

/// Shared period for the price/volume moving averages.
pub const PERIOD: usize = 20;

/// Latest SMA(20) over closes.
pub fn sma_latest_close(series: &CandleSeries) -> Option<f64> {
    sma(&series.closes, PERIOD)
}

/// Latest EMA(20) over closes.
pub fn ema_latest_close(series: &CandleSeries) -> Option<f64> {
    ema(&series.closes, PERIOD)
}

/// Latest WMA(20) over closes.
pub fn wma_latest_close(series: &CandleSeries) -> Option<f64> {
    wma(&series.closes, PERIOD)
}

/// Latest SMA(20) over volumes.
pub fn volume_sma_latest(series: &CandleSeries) -> Option<f64> {
    sma(&series.volumes, PERIOD)
}

/// Simple moving average over the trailing window.
pub(super) fn sma(values: &[f64], period: usize) -> Option<f64> {
    if values.len() < period || period == 0 {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average, seeded with the SMA of the first window.
pub(super) fn ema(values: &[f64], period: usize) -> Option<f64> {
    if values.len() < period || period == 0 {
        return None;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = values.iter().take(period).sum::<f64>() / period as f64;
    for value in values.iter().skip(period) {
        ema = (value - ema) * multiplier + ema;
    }
    Some(ema)
}

/// Weighted moving average: the most recent value carries weight `period`.
fn wma(values: &[f64], period: usize) -> Option<f64> {
    if values.len() < period || period == 0 {
        return None;
    }

    let window = &values[values.len() - period..];
    let weight_sum = (period * (period + 1)) as f64 / 2.0;
    let weighted: f64 = window
        .iter()
        .enumerate()
        .map(|(i, value)| value * (i + 1) as f64)
        .sum();
    Some(weighted / weight_sum)
}
