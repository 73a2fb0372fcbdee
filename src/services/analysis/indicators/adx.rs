//! Average Directional Index.

use super::CandleSeries;

const PERIOD: usize = 14;

/// Latest ADX(14) value.
///
/// Directional movement and true range are Wilder-smoothed into +DI/-DI,
/// their spread becomes DX, and ADX is the Wilder-smoothed DX. Needs at
/// least 2 * period + 1 bars.
pub fn latest(series: &CandleSeries) -> Option<f64> {
    if series.len() < PERIOD * 2 + 1 {
        return None;
    }

    let mut plus_dm = Vec::with_capacity(series.len() - 1);
    let mut minus_dm = Vec::with_capacity(series.len() - 1);
    let mut tr = Vec::with_capacity(series.len() - 1);

    for i in 1..series.len() {
        let up_move = series.highs[i] - series.highs[i - 1];
        let down_move = series.lows[i - 1] - series.lows[i];

        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
        tr.push(true_range(
            series.highs[i],
            series.lows[i],
            series.closes[i - 1],
        ));
    }

    let smoothed_plus_dm = wilders_smooth(&plus_dm, PERIOD);
    let smoothed_minus_dm = wilders_smooth(&minus_dm, PERIOD);
    let smoothed_tr = wilders_smooth(&tr, PERIOD);
    if smoothed_tr.is_empty() {
        return None;
    }

    let mut dx_values = Vec::with_capacity(smoothed_tr.len());
    for i in 0..smoothed_tr.len() {
        let atr = smoothed_tr[i];
        if atr == 0.0 {
            dx_values.push(0.0);
            continue;
        }

        let plus_di = smoothed_plus_dm[i] / atr * 100.0;
        let minus_di = smoothed_minus_dm[i] / atr * 100.0;
        let di_sum = plus_di + minus_di;
        dx_values.push(if di_sum > 0.0 {
            (plus_di - minus_di).abs() / di_sum * 100.0
        } else {
            0.0
        });
    }

    wilders_smooth(&dx_values, PERIOD).last().copied()
}

fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Wilder's smoothing: seed with a simple average, then blend each new
/// value with weight 1/period.
fn wilders_smooth(values: &[f64], period: usize) -> Vec<f64> {
    if values.len() < period {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(values.len() - period + 1);
    let initial: f64 = values.iter().take(period).sum::<f64>() / period as f64;
    result.push(initial);

    for value in values.iter().skip(period) {
        let previous = result[result.len() - 1];
        result.push((previous * (period - 1) as f64 + value) / period as f64);
    }

    result
}
