//! Latest-value technical indicator implementations.
//!
//! Each indicator is an entry in [`indicator_table`]: what to compute,
//! how many bars it needs, and how its value is classified. The
//! evaluator walks the table and skips entries the series is too short
//! for, so adding an indicator means adding a row here plus its math
//! module.

pub mod adx;
pub mod bollinger;
pub mod cci;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod stochastic;

use crate::services::analysis::classify;
use crate::types::{Bar, Signal};

/// Which summary group an indicator contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorGroup {
    Oscillator,
    MovingAverage,
}

/// Bar series converted to the evaluator's working form.
///
/// Built from aggregated bars; malformed entries (non-finite prices) are
/// skipped during conversion rather than reported.
#[derive(Debug, Default)]
pub struct CandleSeries {
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl CandleSeries {
    pub fn from_bars(bars: &[Bar]) -> Self {
        let mut series = Self::default();
        for bar in bars {
            if !bar.is_well_formed() {
                continue;
            }
            series.highs.push(bar.high);
            series.lows.push(bar.low);
            series.closes.push(bar.close);
            series.volumes.push(bar.volume_or_zero());
        }
        series
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn last_volume(&self) -> Option<f64> {
        self.volumes.last().copied()
    }
}

/// One entry in the indicator table.
pub struct IndicatorDef {
    /// Short name used in responses (e.g., "RSI").
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub group: IndicatorGroup,
    /// Emitted only when the series holds strictly more bars than this.
    pub min_bars: usize,
    /// Decimal places for the reported value.
    pub decimals: u32,
    pub compute: fn(&CandleSeries) -> Option<f64>,
    pub classify: fn(f64, &CandleSeries) -> Signal,
}

/// The full indicator table, oscillators first.
pub fn indicator_table() -> &'static [IndicatorDef] {
    &TABLE
}

static TABLE: [IndicatorDef; 12] = [
    IndicatorDef {
        name: "RSI",
        label: "Relative Strength Index (14)",
        group: IndicatorGroup::Oscillator,
        min_bars: 14,
        decimals: 2,
        compute: rsi::latest,
        classify: classify::rsi,
    },
    IndicatorDef {
        name: "MACD",
        label: "MACD Level (12, 26)",
        group: IndicatorGroup::Oscillator,
        min_bars: 26,
        decimals: 2,
        compute: macd::latest,
        classify: classify::macd,
    },
    IndicatorDef {
        name: "STOCH",
        label: "Stochastic %K (14, 3, 3)",
        group: IndicatorGroup::Oscillator,
        min_bars: 17,
        decimals: 2,
        compute: stochastic::latest,
        classify: classify::stochastic,
    },
    IndicatorDef {
        name: "ADX",
        label: "Average Directional Index (14)",
        group: IndicatorGroup::Oscillator,
        min_bars: 28,
        decimals: 2,
        compute: adx::latest,
        classify: classify::adx,
    },
    IndicatorDef {
        name: "CCI",
        label: "Commodity Channel Index (20)",
        group: IndicatorGroup::Oscillator,
        min_bars: 20,
        decimals: 2,
        compute: cci::latest,
        classify: classify::cci,
    },
    IndicatorDef {
        name: "SMA",
        label: "Simple Moving Average",
        group: IndicatorGroup::MovingAverage,
        min_bars: 20,
        decimals: 2,
        compute: moving_average::sma_latest_close,
        classify: classify::price_above,
    },
    IndicatorDef {
        name: "EMA",
        label: "Exponential Moving Average",
        group: IndicatorGroup::MovingAverage,
        min_bars: 20,
        decimals: 2,
        compute: moving_average::ema_latest_close,
        classify: classify::price_above,
    },
    IndicatorDef {
        name: "WMA",
        label: "Weighted Moving Average",
        group: IndicatorGroup::MovingAverage,
        min_bars: 20,
        decimals: 2,
        compute: moving_average::wma_latest_close,
        classify: classify::price_above,
    },
    IndicatorDef {
        name: "BB_UPPER",
        label: "Bollinger Bands Upper",
        group: IndicatorGroup::MovingAverage,
        min_bars: 20,
        decimals: 2,
        compute: bollinger::upper,
        classify: classify::always_sell,
    },
    IndicatorDef {
        name: "BB_MIDDLE",
        label: "Bollinger Bands Middle",
        group: IndicatorGroup::MovingAverage,
        min_bars: 20,
        decimals: 2,
        compute: bollinger::middle,
        classify: classify::always_neutral,
    },
    IndicatorDef {
        name: "BB_LOWER",
        label: "Bollinger Bands Lower",
        group: IndicatorGroup::MovingAverage,
        min_bars: 20,
        decimals: 2,
        compute: bollinger::lower,
        classify: classify::always_buy,
    },
    IndicatorDef {
        name: "VOLUME_SMA",
        label: "Volume Simple Moving Average",
        group: IndicatorGroup::MovingAverage,
        min_bars: 20,
        decimals: 0,
        compute: moving_average::volume_sma_latest,
        classify: classify::volume_above,
    },
];


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;
    use chrono::NaiveDate;

    #[test]
    fn test_table_shape() {
        let table = indicator_table();
        assert_eq!(table.len(), 12);

        let oscillators: Vec<&str> = table
            .iter()
            .filter(|d| d.group == IndicatorGroup::Oscillator)
            .map(|d| d.name)
            .collect();
        assert_eq!(oscillators, vec!["RSI", "MACD", "STOCH", "ADX", "CCI"]);

        let volume = table.iter().find(|d| d.name == "VOLUME_SMA").unwrap();
        assert_eq!(volume.decimals, 0);
    }

    #[test]
    fn test_series_conversion_skips_malformed_bars() {
        let good = Bar {
            id: None,
            symbol: "BTCUSDT".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 95.0,
            close: 105.0,
            volume: None,
            quote_asset_volume: None,
            base_asset: None,
            quote_asset: None,
        };
        let mut bad = good.clone();
        bad.high = f64::NAN;

        let series = CandleSeries::from_bars(&[good, bad]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.last_close(), Some(105.0));
        assert_eq!(series.last_volume(), Some(0.0));
    }
}
