//! MACD crossover with the standard 12/26/9 configuration.
//!
//! Long bias while the MACD line is above its signal line, short bias while
//! below, flat while either is undefined or they are equal. The periods are
//! fixed; this strategy takes no parameters.

use crate::domain::{closes, Bar};
use crate::indicators::{ema, macd_line};

use super::{direction_from_cmp, SignalGenerator};

const FAST_PERIOD: usize = 12;
const SLOW_PERIOD: usize = 26;
const SIGNAL_PERIOD: usize = 9;

#[derive(Debug, Clone, Default)]
pub struct MacdCross;

impl MacdCross {
    pub fn new() -> Self {
        Self
    }
}

impl SignalGenerator for MacdCross {
    fn name(&self) -> &str {
        "macd"
    }

    fn warmup_bars(&self) -> usize {
        // MACD line defined from SLOW_PERIOD - 1; the signal line needs
        // SIGNAL_PERIOD MACD values on top of that.
        SLOW_PERIOD + SIGNAL_PERIOD - 2
    }

    fn directions(&self, bars: &[Bar]) -> Vec<i8> {
        let values = closes(bars);
        let macd = macd_line(&values, FAST_PERIOD, SLOW_PERIOD);
        let signal = ema(&macd, SIGNAL_PERIOD);

        macd.iter()
            .zip(&signal)
            .map(|(&m, &s)| direction_from_cmp(m, s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::make_bars;

    fn v_shaped_closes(n: usize) -> Vec<f64> {
        // Decline then recovery; the MACD line crosses its signal line on the
        // way back up.
        (0..n)
            .map(|i| {
                if i < n / 2 {
                    200.0 - i as f64
                } else {
                    200.0 - (n / 2) as f64 + (i - n / 2) as f64 * 2.0
                }
            })
            .collect()
    }

    #[test]
    fn warmup_is_flat() {
        let bars = make_bars(&v_shaped_closes(80));
        let sig = MacdCross::new();
        let dirs = sig.directions(&bars);
        for (i, d) in dirs.iter().enumerate().take(sig.warmup_bars()) {
            assert_eq!(*d, 0, "expected flat during warmup at bar {i}");
        }
    }

    #[test]
    fn recovery_turns_long() {
        let bars = make_bars(&v_shaped_closes(80));
        let dirs = MacdCross::new().directions(&bars);
        assert_eq!(dirs[79], 1);
    }

    #[test]
    fn decline_turns_short() {
        let closes: Vec<f64> = (0..80)
            .map(|i| if i < 40 { 100.0 + i as f64 } else { 140.0 - (i - 40) as f64 * 2.0 })
            .collect();
        let bars = make_bars(&closes);
        let dirs = MacdCross::new().directions(&bars);
        assert_eq!(dirs[79], -1);
    }

    #[test]
    fn directions_parallel_to_bars() {
        let bars = make_bars(&v_shaped_closes(50));
        assert_eq!(MacdCross::new().directions(&bars).len(), 50);
    }

    #[test]
    fn name_and_warmup() {
        let sig = MacdCross::new();
        assert_eq!(sig.name(), "macd");
        assert_eq!(sig.warmup_bars(), 33);
    }
}
