//! RSI momentum — mean-reversion on oversold/overbought readings.
//!
//! Long bias while RSI is below the oversold threshold, short bias while
//! above the overbought threshold, flat in between or while RSI is undefined.

use crate::domain::{closes, Bar};
use crate::indicators::rsi;

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct RsiMomentum {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl RsiMomentum {
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Self {
        assert!(period >= 1, "period must be >= 1");
        assert!(
            oversold < overbought,
            "oversold threshold must be below overbought"
        );
        Self {
            period,
            oversold,
            overbought,
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, 30.0, 70.0)
    }
}

impl SignalGenerator for RsiMomentum {
    fn name(&self) -> &str {
        "rsi"
    }

    fn warmup_bars(&self) -> usize {
        self.period
    }

    fn directions(&self, bars: &[Bar]) -> Vec<i8> {
        let values = closes(bars);
        rsi(&values, self.period)
            .iter()
            .map(|&r| {
                if r.is_nan() {
                    0
                } else if r < self.oversold {
                    1
                } else if r > self.overbought {
                    -1
                } else {
                    0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::make_bars;

    #[test]
    fn sustained_selloff_goes_long() {
        // Monotonic decline → RSI 0 < 30 → long (mean-reversion buy).
        let bars = make_bars(&[110.0, 108.0, 106.0, 104.0, 102.0, 100.0]);
        let sig = RsiMomentum::new(3, 30.0, 70.0);
        let dirs = sig.directions(&bars);
        assert_eq!(dirs[5], 1);
    }

    #[test]
    fn sustained_rally_goes_short() {
        let bars = make_bars(&[100.0, 102.0, 104.0, 106.0, 108.0, 110.0]);
        let sig = RsiMomentum::new(3, 30.0, 70.0);
        let dirs = sig.directions(&bars);
        assert_eq!(dirs[5], -1);
    }

    #[test]
    fn neutral_band_is_flat() {
        // Flat prices → RSI 50, inside the (30, 70) band.
        let bars = make_bars(&[100.0; 6]);
        let sig = RsiMomentum::new(3, 30.0, 70.0);
        assert_eq!(sig.directions(&bars), vec![0; 6]);
    }

    #[test]
    fn warmup_is_flat() {
        let bars = make_bars(&[110.0, 108.0, 106.0, 104.0]);
        let sig = RsiMomentum::new(3, 30.0, 70.0);
        let dirs = sig.directions(&bars);
        assert_eq!(&dirs[..3], &[0, 0, 0]);
    }

    #[test]
    fn name_and_warmup() {
        let sig = RsiMomentum::default_params();
        assert_eq!(sig.name(), "rsi");
        assert_eq!(sig.warmup_bars(), 14);
    }

    #[test]
    #[should_panic(expected = "oversold threshold must be below overbought")]
    fn rejects_inverted_thresholds() {
        RsiMomentum::new(14, 70.0, 30.0);
    }
}
