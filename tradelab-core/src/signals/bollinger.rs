//! Bollinger band mean reversion.
//!
//! Long bias while the close sits below the lower band, short bias while
//! above the upper band, flat inside the bands or while they are undefined.

use crate::domain::{closes, Bar};
use crate::indicators::bollinger_bands;

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct BollingerReversion {
    pub period: usize,
    pub std_dev: f64,
}

impl BollingerReversion {
    pub fn new(period: usize, std_dev: f64) -> Self {
        assert!(period >= 2, "period must be >= 2");
        assert!(
            std_dev.is_finite() && std_dev > 0.0,
            "std_dev multiplier must be positive"
        );
        Self { period, std_dev }
    }

    pub fn default_params() -> Self {
        Self::new(20, 2.0)
    }
}

impl SignalGenerator for BollingerReversion {
    fn name(&self) -> &str {
        "bollinger"
    }

    fn warmup_bars(&self) -> usize {
        self.period - 1
    }

    fn directions(&self, bars: &[Bar]) -> Vec<i8> {
        let values = closes(bars);
        let bands = bollinger_bands(&values, self.period, self.std_dev);

        values
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let (upper, lower) = (bands.upper[i], bands.lower[i]);
                if upper.is_nan() || lower.is_nan() {
                    0
                } else if close < lower {
                    1
                } else if close > upper {
                    -1
                } else {
                    0
                }
            })
            .collect()
    }
}
