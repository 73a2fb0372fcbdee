use serde::{Deserialize, Serialize};

use crate::types::Timeframe;

/// Direction of a single indicator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

/// Overall directional verdict for a group of indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallSignal {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

/// A single indicator value with its classified signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReading {
    /// Indicator name (e.g., "RSI", "BB_UPPER").
    pub name: String,
    /// Latest value, rounded for display.
    pub value: f64,
    pub signal: Signal,
    /// Human-readable label (e.g., "Relative Strength Index (14)").
    pub label: String,
}

/// BUY/SELL/NEUTRAL counts and the overall verdict for one indicator group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub overall_signal: OverallSignal,
    pub buy_count: u32,
    pub sell_count: u32,
    pub neutral_count: u32,
}

impl SignalSummary {
    /// Summarize a group of classified readings.
    pub fn from_readings(readings: &[IndicatorReading]) -> Self {
        let mut buy_count = 0;
        let mut sell_count = 0;
        let mut neutral_count = 0;

        for reading in readings {
            match reading.signal {
                Signal::Buy => buy_count += 1,
                Signal::Sell => sell_count += 1,
                Signal::Neutral => neutral_count += 1,
            }
        }

        Self::from_counts(buy_count, sell_count, neutral_count)
    }

    /// Derive the overall verdict from raw counts.
    ///
    /// A side wins only with a majority over everything else combined; a
    /// better-than-2x edge over the opposing side upgrades the verdict to
    /// the strong variant.
    pub fn from_counts(buy_count: u32, sell_count: u32, neutral_count: u32) -> Self {
        let overall_signal = if buy_count > sell_count + neutral_count {
            if buy_count > sell_count * 2 {
                OverallSignal::StrongBuy
            } else {
                OverallSignal::Buy
            }
        } else if sell_count > buy_count + neutral_count {
            if sell_count > buy_count * 2 {
                OverallSignal::StrongSell
            } else {
                OverallSignal::Sell
            }
        } else {
            OverallSignal::Neutral
        };

        Self {
            overall_signal,
            buy_count,
            sell_count,
            neutral_count,
        }
    }
}

/// Technical analysis response for one symbol and timeframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalAnalysis {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub oscillator_summary: SignalSummary,
    pub moving_average_summary: SignalSummary,
    pub oscillators: Vec<IndicatorReading>,
    pub moving_averages: Vec<IndicatorReading>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_buy_needs_majority_and_2x_edge() {
        // 6 > 2 + 1 and 6 > 2 * 2
        let summary = SignalSummary::from_counts(6, 2, 1);
        assert_eq!(summary.overall_signal, OverallSignal::StrongBuy);
    }

    #[test]
    fn test_buy_without_2x_edge() {
        // 7 > 4 + 2 gives the majority, but 7 <= 2 * 4 keeps it plain BUY
        let summary = SignalSummary::from_counts(7, 4, 2);
        assert_eq!(summary.overall_signal, OverallSignal::Buy);
    }

    #[test]
    fn test_no_majority_stays_neutral() {
        // 4 > 2 + 3 is false, so the buy side has no majority
        let summary = SignalSummary::from_counts(4, 2, 3);
        assert_eq!(summary.overall_signal, OverallSignal::Neutral);
    }

    #[test]
    fn test_strong_sell() {
        let summary = SignalSummary::from_counts(1, 7, 2);
        assert_eq!(summary.overall_signal, OverallSignal::StrongSell);
    }

    #[test]
    fn test_sell_without_2x_edge() {
        // 7 > 4 + 2 gives the majority, but 7 <= 2 * 4 keeps it plain SELL
        let summary = SignalSummary::from_counts(4, 7, 2);
        assert_eq!(summary.overall_signal, OverallSignal::Sell);
    }

    #[test]
    fn test_empty_group_is_neutral() {
        let summary = SignalSummary::from_readings(&[]);
        assert_eq!(summary.overall_signal, OverallSignal::Neutral);
        assert_eq!(summary.buy_count, 0);
    }

    #[test]
    fn test_from_readings_counts() {
        let readings = vec![
            reading("RSI", Signal::Buy),
            reading("MACD", Signal::Buy),
            reading("CCI", Signal::Sell),
            reading("ADX", Signal::Neutral),
        ];
        let summary = SignalSummary::from_readings(&readings);
        assert_eq!(summary.buy_count, 2);
        assert_eq!(summary.sell_count, 1);
        assert_eq!(summary.neutral_count, 1);
        assert_eq!(summary.overall_signal, OverallSignal::Neutral);
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_string(&OverallSignal::StrongBuy).unwrap(),
            "\"STRONG_BUY\""
        );
        assert_eq!(serde_json::to_string(&Signal::Neutral).unwrap(), "\"NEUTRAL\"");
    }

    fn reading(name: &str, signal: Signal) -> IndicatorReading {
        IndicatorReading {
            name: name.to_string(),
            value: 0.0,
            signal,
            label: name.to_string(),
        }
    }
}
