//! Signal generators — pure transforms from a price series to a directional
//! bias series.
//!
//! Each strategy maps bars to a per-bar direction in {-1, 0, +1} (short,
//! flat, long). The tradable events are the *transitions*: `change[t] =
//! direction[t] - direction[t-1]`, so an entry fires at `change == +2` (a
//! sign flip from -1 to +1) and an exit at `change == -2`. The first bar has
//! no predecessor and never produces a transition.

pub mod bollinger;
pub mod factory;
pub mod macd;
pub mod rsi;
pub mod sma_cross;

pub use bollinger::BollingerReversion;
pub use factory::{create_signal, ParseStrategyError, StrategyId, StrategyParams};
pub use macd::MacdCross;
pub use rsi::RsiMomentum;
pub use sma_cross::SmaCrossover;

use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// Direction change that marks a tradable entry (-1 → +1).
pub const ENTRY_CHANGE: i8 = 2;
/// Direction change that marks a tradable exit (+1 → -1).
pub const EXIT_CHANGE: i8 = -2;

/// Per-bar directions and their bar-over-bar changes, parallel to the input
/// bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSeries {
    /// -1 short bias, 0 flat/undefined, +1 long bias.
    pub directions: Vec<i8>,
    /// directions[t] - directions[t-1]; 0 at t = 0.
    pub changes: Vec<i8>,
}

impl SignalSeries {
    /// Derive the change series from a direction series.
    pub fn from_directions(directions: Vec<i8>) -> Self {
        let mut changes = vec![0i8; directions.len()];
        for i in 1..directions.len() {
            changes[i] = directions[i] - directions[i - 1];
        }
        Self { directions, changes }
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

/// A trading strategy: a pure, stateless function of the price series.
///
/// Implementations read only bar closes and their own numeric parameters.
/// They hold no run state, so one instance may serve many backtests.
pub trait SignalGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Bars before any nonzero direction can appear (indicator warmup).
    fn warmup_bars(&self) -> usize;

    /// The per-bar direction series, same length as `bars`.
    fn directions(&self, bars: &[Bar]) -> Vec<i8>;

    /// Directions plus derived transition markers.
    fn generate(&self, bars: &[Bar]) -> SignalSeries {
        SignalSeries::from_directions(self.directions(bars))
    }
}

/// Compare a fast line against a slow line: +1 above, -1 below, 0 when equal
/// or either side is undefined.
pub(crate) fn direction_from_cmp(fast: f64, slow: f64) -> i8 {
    if fast.is_nan() || slow.is_nan() {
        0
    } else if fast > slow {
        1
    } else if fast < slow {
        -1
    } else {
        0
    }
}

/// Build bars from a close series, one day apart. Test helper shared by the
/// strategy test modules.
#[cfg(test)]
pub(crate) fn make_bars(closes: &[f64]) -> Vec<Bar> {
    use chrono::{Duration, TimeZone, Utc};
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Bar::new(
                start + Duration::days(i as i64),
                close,
                close + 1.0,
                (close - 1.0).max(0.01),
                close,
                10_000,
            )
        })
        .collect()
}
