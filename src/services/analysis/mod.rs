//! Technical analysis pipeline.
//!
//! One request flows fetch -> aggregate -> evaluate -> classify ->
//! summarize. The whole computation is a pure function of the stored
//! history; nothing is cached and nothing shared is mutated, so
//! concurrent requests need no coordination.

pub mod classify;
pub mod indicators;

use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::{aggregate, BarStore};
use crate::types::{IndicatorReading, SignalSummary, TechnicalAnalysis, Timeframe};
use self::indicators::{indicator_table, CandleSeries, IndicatorGroup};

/// Minimum aggregated bars before any analysis is attempted.
const MIN_BARS: usize = 50;

/// Compute technical analysis for a symbol at the requested granularity.
///
/// Fails with a client-input error when the symbol has no stored history
/// or the aggregated series is shorter than 50 bars. Individual
/// indicators the series is too short for are omitted, not errors.
pub fn analyze(store: &BarStore, symbol: &str, timeframe: Timeframe) -> Result<TechnicalAnalysis> {
    let history = store.fetch_history(symbol)?;
    if history.is_empty() {
        return Err(AppError::BadRequest(format!(
            "No data found for symbol: {symbol}"
        )));
    }

    let bars = aggregate::aggregate(&history, timeframe);
    let series = CandleSeries::from_bars(&bars);
    if series.len() < MIN_BARS {
        return Err(AppError::insufficient_data(symbol));
    }

    debug!(
        "Analyzing {} at {} over {} aggregated bars",
        symbol,
        timeframe.name(),
        series.len()
    );

    Ok(evaluate(symbol, timeframe, &series))
}

/// Evaluate the indicator table over an already-aggregated series.
pub fn evaluate(symbol: &str, timeframe: Timeframe, series: &CandleSeries) -> TechnicalAnalysis {
    let mut oscillators = Vec::new();
    let mut moving_averages = Vec::new();

    for def in indicator_table() {
        if series.len() <= def.min_bars {
            continue;
        }
        let Some(value) = (def.compute)(series) else {
            continue;
        };

        let reading = IndicatorReading {
            name: def.name.to_string(),
            value: round_to(value, def.decimals),
            signal: (def.classify)(value, series),
            label: def.label.to_string(),
        };
        match def.group {
            IndicatorGroup::Oscillator => oscillators.push(reading),
            IndicatorGroup::MovingAverage => moving_averages.push(reading),
        }
    }

    TechnicalAnalysis {
        symbol: symbol.to_uppercase(),
        timeframe,
        oscillator_summary: SignalSummary::from_readings(&oscillators),
        moving_average_summary: SignalSummary::from_readings(&moving_averages),
        oscillators,
        moving_averages,
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::indicators::test_series::uptrend;
    use super::*;
    use crate::types::Signal;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(62.4567, 2), 62.46);
        assert_eq!(round_to(1234.56, 0), 1235.0);
    }

    #[test]
    fn test_evaluate_emits_all_indicators_with_long_series() {
        let series = uptrend(100);
        let analysis = evaluate("btcusdt", Timeframe::Daily, &series);

        assert_eq!(analysis.symbol, "BTCUSDT");
        assert_eq!(analysis.oscillators.len(), 5);
        assert_eq!(analysis.moving_averages.len(), 7);
    }

    #[test]
    fn test_evaluate_omits_short_indicators() {
        // 25 bars: RSI (>14), CCI (>20), the period-20 averages and bands
        // fit; MACD (>26) and ADX (>28) do not
        let series = uptrend(25);
        let analysis = evaluate("BTCUSDT", Timeframe::Daily, &series);

        let names: Vec<&str> = analysis
            .oscillators
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["RSI", "STOCH", "CCI"]);
        assert_eq!(analysis.moving_averages.len(), 7);
    }

    #[test]
    fn test_summary_counts_match_readings() {
        let series = uptrend(100);
        let analysis = evaluate("BTCUSDT", Timeframe::Daily, &series);

        let summary = &analysis.oscillator_summary;
        assert_eq!(
            summary.buy_count + summary.sell_count + summary.neutral_count,
            analysis.oscillators.len() as u32
        );
    }

    #[test]
    fn test_moving_averages_read_buy_in_uptrend() {
        let series = uptrend(100);
        let analysis = evaluate("BTCUSDT", Timeframe::Daily, &series);

        for name in ["SMA", "EMA", "WMA"] {
            let reading = analysis
                .moving_averages
                .iter()
                .find(|r| r.name == name)
                .unwrap();
            assert_eq!(reading.signal, Signal::Buy, "{name} in a sustained uptrend");
        }
    }

    #[test]
    fn test_volume_value_is_rounded_to_integer() {
        let series = uptrend(100);
        let analysis = evaluate("BTCUSDT", Timeframe::Daily, &series);
        let volume = analysis
            .moving_averages
            .iter()
            .find(|r| r.name == "VOLUME_SMA")
            .unwrap();
        assert_eq!(volume.value.fract(), 0.0);
    }
}
