//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and average losses:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! First defined value at index `period`.
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; no movement → 50.

/// Wilder RSI of `values` over `period` changes.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // Seed: simple average of gains and losses over the first `period` changes.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    result[period] = rsi_from_averages(avg_gain, avg_loss);

    // Wilder smoothing for the remaining changes.
    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        let change = values[i] - values[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;

        result[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    result
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_all_gains_is_100() {
        let values = [100.0, 101.0, 102.0, 103.0, 104.0, 105.0];
        let result = rsi(&values, 3);
        assert_approx(result[3], 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let values = [105.0, 104.0, 103.0, 102.0, 101.0, 100.0];
        let result = rsi(&values, 3);
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_flat_is_50() {
        let values = [100.0; 6];
        let result = rsi(&values, 3);
        assert_approx(result[3], 50.0, 1e-6);
    }

    #[test]
    fn rsi_known_seed_value() {
        // Changes over period 3: +0.34, -0.25, -0.48
        // avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI[3] = 100 - 100/(1 + 0.34/0.73) ≈ 31.776
        let values = [44.0, 44.34, 44.09, 43.61];
        let result = rsi(&values, 3);
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-6);
    }

    #[test]
    fn rsi_warmup_is_nan() {
        let values = [44.0, 44.34, 44.09, 43.61, 44.33];
        let result = rsi(&values, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
    }

    #[test]
    fn rsi_bounds() {
        let values = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        for (i, v) in rsi(&values, 3).iter().enumerate() {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(v), "RSI out of bounds at {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_too_few_values() {
        let result = rsi(&[100.0, 101.0], 14);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
