//! Fixed threshold rules mapping indicator values to signals.
//!
//! Every rule takes the raw (unrounded) indicator value plus the series
//! it was computed from, so price- and volume-relative rules can compare
//! against the latest bar.

use super::indicators::CandleSeries;
use crate::types::Signal;

/// RSI: overbought at 70 and above, oversold at 30 and below.
pub fn rsi(value: f64, _series: &CandleSeries) -> Signal {
    if value >= 70.0 {
        Signal::Sell
    } else if value <= 30.0 {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

/// MACD: sign of the level decides, with no neutral band.
pub fn macd(value: f64, _series: &CandleSeries) -> Signal {
    if value > 0.0 {
        Signal::Buy
    } else {
        Signal::Sell
    }
}

/// Stochastic %K: overbought at 80 and above, oversold at 20 and below.
pub fn stochastic(value: f64, _series: &CandleSeries) -> Signal {
    if value >= 80.0 {
        Signal::Sell
    } else if value <= 20.0 {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

/// ADX: trending above 25, ranging between 20 and 25, weak below.
pub fn adx(value: f64, _series: &CandleSeries) -> Signal {
    if value > 25.0 {
        Signal::Buy
    } else if value > 20.0 {
        Signal::Neutral
    } else {
        Signal::Sell
    }
}

/// CCI: overbought above +100, oversold below -100.
pub fn cci(value: f64, _series: &CandleSeries) -> Signal {
    if value > 100.0 {
        Signal::Sell
    } else if value < -100.0 {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

/// Price vs. moving average: latest close above the average is bullish.
pub fn price_above(value: f64, series: &CandleSeries) -> Signal {
    match series.last_close() {
        Some(close) if close > value => Signal::Buy,
        _ => Signal::Sell,
    }
}

/// Volume vs. volume average: latest volume above the average is bullish.
pub fn volume_above(value: f64, series: &CandleSeries) -> Signal {
    match series.last_volume() {
        Some(volume) if volume > value => Signal::Buy,
        _ => Signal::Sell,
    }
}

/// Fixed signal for the upper Bollinger band.
pub fn always_sell(_value: f64, _series: &CandleSeries) -> Signal {
    Signal::Sell
}

/// Fixed signal for the middle Bollinger band.
pub fn always_neutral(_value: f64, _series: &CandleSeries) -> Signal {
    Signal::Neutral
}

/// Fixed signal for the lower Bollinger band.
pub fn always_buy(_value: f64, _series: &CandleSeries) -> Signal {
    Signal::Buy
}
