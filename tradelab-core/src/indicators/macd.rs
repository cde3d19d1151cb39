//! MACD line — difference of two exponential moving averages.
//!
//! macd[t] = EMA(fast)[t] - EMA(slow)[t]; defined once both EMAs are.
//! The signal line (EMA of the MACD line) is computed by the MACD strategy
//! via `ema`, which tolerates the MACD line's NaN warmup prefix.

use super::ema::ema;

/// MACD line of `values` with the given fast/slow EMA periods.
pub fn macd_line(values: &[f64], fast_period: usize, slow_period: usize) -> Vec<f64> {
    let fast = ema(values, fast_period);
    let slow = ema(values, slow_period);

    fast.iter()
        .zip(&slow)
        .map(|(f, s)| {
            if f.is_nan() || s.is_nan() {
                f64::NAN
            } else {
                f - s
            }
        })
        .collect()
}
