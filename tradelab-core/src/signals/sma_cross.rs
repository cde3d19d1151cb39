//! Simple moving average crossover.
//!
//! Long bias while the short-window SMA sits above the long-window SMA,
//! short bias while below, flat while either average is undefined or they
//! are exactly equal.

use crate::domain::{closes, Bar};
use crate::indicators::sma;

use super::{direction_from_cmp, SignalGenerator};

#[derive(Debug, Clone)]
pub struct SmaCrossover {
    pub short_window: usize,
    pub long_window: usize,
}

impl SmaCrossover {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        assert!(short_window >= 1, "short_window must be >= 1");
        assert!(
            long_window > short_window,
            "long_window must be > short_window"
        );
        Self {
            short_window,
            long_window,
        }
    }

    pub fn default_params() -> Self {
        Self::new(20, 50)
    }
}

impl SignalGenerator for SmaCrossover {
    fn name(&self) -> &str {
        "sma_cross"
    }

    fn warmup_bars(&self) -> usize {
        self.long_window - 1
    }

    fn directions(&self, bars: &[Bar]) -> Vec<i8> {
        let values = closes(bars);
        let short = sma(&values, self.short_window);
        let long = sma(&values, self.long_window);

        short
            .iter()
            .zip(&long)
            .map(|(&s, &l)| direction_from_cmp(s, l))
            .collect()
    }
}
