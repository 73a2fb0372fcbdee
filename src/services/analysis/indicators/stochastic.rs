//! Stochastic oscillator %K.

use super::CandleSeries;

const K_PERIOD: usize = 14;

/// Latest %K(14) value.
///
/// %K = (close - lowest low) / (highest high - lowest low) * 100 over the
/// trailing window; a flat range reads as 50.
pub fn latest(series: &CandleSeries) -> Option<f64> {
    if series.len() < K_PERIOD {
        return None;
    }

    let start = series.len() - K_PERIOD;
    let lowest_low = series.lows[start..]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let highest_high = series.highs[start..]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let close = series.last_close()?;

    if highest_high == lowest_low {
        return Some(50.0);
    }
    Some((close - lowest_low) / (highest_high - lowest_low) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::super::test_series::{downtrend, uptrend};
    use super::*;

    #[test]
    fn test_insufficient_data() {
        assert!(latest(&uptrend(13)).is_none());
        assert!(latest(&uptrend(14)).is_some());
    }

    #[test]
    fn test_uptrend_reads_high() {
        let value = latest(&uptrend(50)).unwrap();
        assert!(value > 80.0, "%K near the top of the range, got {value}");
    }

    #[test]
    fn test_downtrend_reads_low() {
        let value = latest(&downtrend(50)).unwrap();
        assert!(value < 20.0, "%K near the bottom of the range, got {value}");
    }

    #[test]
    fn test_flat_range_reads_midpoint() {
        let mut series = CandleSeries::default();
        for _ in 0..20 {
            series.highs.push(100.0);
            series.lows.push(100.0);
            series.closes.push(100.0);
            series.volumes.push(1.0);
        }
        assert_eq!(latest(&series), Some(50.0));
    }

    #[test]
    fn test_value_range() {
        let value = latest(&uptrend(30)).unwrap();
        assert!((0.0..=100.0).contains(&value));
    }
}
