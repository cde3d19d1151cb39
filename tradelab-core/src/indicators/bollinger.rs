//! Bollinger Bands — moving average ± standard deviation multiplier.
//!
//! Middle band: SMA(period). Upper/lower: middle ± mult × rolling stddev.
//! Uses population stddev (divide by N). First defined value at `period - 1`.

use super::sma::sma;

/// The three band series, parallel to the input.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Compute all three Bollinger bands over `values`.
pub fn bollinger_bands(values: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let n = values.len();
    let middle = sma(values, period);
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];

    if period == 0 || n < period {
        return BollingerBands { middle, upper, lower };
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        let mean = middle[i];
        let variance =
            window.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / period as f64;
        let stddev = variance.sqrt();
        upper[i] = mean + multiplier * stddev;
        lower[i] = mean - multiplier * stddev;
    }

    BollingerBands { middle, upper, lower }
}
