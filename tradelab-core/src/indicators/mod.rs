//! Rolling indicator primitives.
//!
//! Free functions over a close-price slice. Every function returns a series
//! the same length as its input, with `f64::NAN` at positions where the
//! rolling computation is not yet defined (the warmup prefix). Signal
//! generators map NaN to a flat (0) direction.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use ema::ema;
pub use macd::macd_line;
pub use rsi::rsi;
pub use sma::sma;

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "expected {expected}, got {actual}"
    );
}
