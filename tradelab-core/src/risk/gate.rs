//! Risk gate — drawdown ratchet, stop/take-profit checks, entry vetoes.
//!
//! One `RiskManager` lives for exactly one backtest run. Its peak-equity
//! high-water mark only ratchets upward, so sharing an instance across runs
//! would corrupt the drawdown state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sizing::position_size;

/// Minimum acceptable reward-to-risk ratio for a new entry.
pub const MIN_RISK_REWARD: f64 = 2.0;

/// Risk limits for one run. All fields optional in serialized form, with the
/// stated defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub initial_capital: f64,
    /// Maximum fraction of capital committed to a single position.
    pub max_position_size: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    /// Drawdown fraction at which new entries are halted.
    pub max_drawdown_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            max_position_size: 0.2,
            stop_loss_pct: 0.05,
            take_profit_pct: 0.10,
            max_drawdown_pct: 0.20,
        }
    }
}

/// Snapshot returned by [`RiskManager::update_drawdown`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrawdownStatus {
    pub current_drawdown: f64,
    pub peak_value: f64,
    pub halt_trading: bool,
}

/// Why the gate refused an entry. A decision, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RejectReason {
    /// Drawdown from peak equity reached the configured limit.
    DrawdownExceeded { drawdown: f64 },
    /// Reward-to-risk below [`MIN_RISK_REWARD`].
    PoorRiskReward { ratio: f64 },
    /// The sizer produced zero shares at this price.
    InsufficientCapital,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::DrawdownExceeded { drawdown } => {
                write!(f, "maximum drawdown exceeded ({:.1}%)", drawdown * 100.0)
            }
            RejectReason::PoorRiskReward { ratio } => {
                write!(f, "poor risk/reward ratio: {ratio:.2}")
            }
            RejectReason::InsufficientCapital => write!(f, "insufficient capital for position"),
        }
    }
}

/// Outcome of [`RiskManager::should_enter`]. The engine branches on this and
/// continues either way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum EntryDecision {
    Approved {
        shares: u64,
        stop_loss_price: f64,
        risk_reward: f64,
        /// Worst-case loss if the stop fires: shares × entry × stop_loss_pct.
        max_loss: f64,
    },
    Rejected {
        reason: RejectReason,
    },
}

impl EntryDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, EntryDecision::Approved { .. })
    }
}

/// Stateful arbiter for one backtest run.
#[derive(Debug, Clone)]
pub struct RiskManager {
    config: RiskConfig,
    peak_value: f64,
    current_drawdown: f64,
}

impl RiskManager {
    pub fn new(config: RiskConfig) -> Self {
        let peak_value = config.initial_capital;
        Self {
            config,
            peak_value,
            current_drawdown: 0.0,
        }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Ratchet the peak and recompute drawdown from it.
    ///
    /// The peak never decreases. Trading halts while the drawdown fraction is
    /// at or beyond the configured limit.
    pub fn update_drawdown(&mut self, current_value: f64) -> DrawdownStatus {
        if current_value > self.peak_value {
            self.peak_value = current_value;
        }
        self.current_drawdown = (self.peak_value - current_value) / self.peak_value;

        DrawdownStatus {
            current_drawdown: self.current_drawdown,
            peak_value: self.peak_value,
            halt_trading: self.current_drawdown >= self.config.max_drawdown_pct,
        }
    }

    /// True when the loss from entry has reached the stop-loss threshold.
    pub fn check_stop_loss(&self, entry_price: f64, current_price: f64) -> bool {
        (entry_price - current_price) / entry_price >= self.config.stop_loss_pct
    }

    /// True when the gain from entry has reached the take-profit threshold.
    pub fn check_take_profit(&self, entry_price: f64, current_price: f64) -> bool {
        (current_price - entry_price) / entry_price >= self.config.take_profit_pct
    }

    /// Potential gain per unit of potential loss; 0 when the stop is not
    /// below the entry.
    pub fn risk_reward_ratio(&self, entry: f64, target: f64, stop: f64) -> f64 {
        let potential_loss = entry - stop;
        if potential_loss <= 0.0 {
            return 0.0;
        }
        (target - entry) / potential_loss
    }

    /// Gate a proposed entry: drawdown halt, then risk/reward, then sizing.
    pub fn should_enter(&mut self, capital: f64, entry_price: f64, target_price: f64) -> EntryDecision {
        let stop_loss_price = entry_price * (1.0 - self.config.stop_loss_pct);

        let drawdown = self.update_drawdown(capital);
        if drawdown.halt_trading {
            return EntryDecision::Rejected {
                reason: RejectReason::DrawdownExceeded {
                    drawdown: drawdown.current_drawdown,
                },
            };
        }

        let risk_reward = self.risk_reward_ratio(entry_price, target_price, stop_loss_price);
        if risk_reward < MIN_RISK_REWARD {
            return EntryDecision::Rejected {
                reason: RejectReason::PoorRiskReward { ratio: risk_reward },
            };
        }

        let shares = position_size(capital, entry_price, self.config.max_position_size, None);
        if shares == 0 {
            return EntryDecision::Rejected {
                reason: RejectReason::InsufficientCapital,
            };
        }

        EntryDecision::Approved {
            shares,
            stop_loss_price,
            risk_reward,
            max_loss: shares as f64 * entry_price * self.config.stop_loss_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> RiskManager {
        RiskManager::new(RiskConfig::default())
    }

    // ── Drawdown ratchet ──

    #[test]
    fn peak_ratchets_up_never_down() {
        let mut rm = manager();
        assert_eq!(rm.update_drawdown(120_000.0).peak_value, 120_000.0);
        let status = rm.update_drawdown(110_000.0);
        assert_eq!(status.peak_value, 120_000.0);
        assert!((status.current_drawdown - 10_000.0 / 120_000.0).abs() < 1e-12);
    }

    #[test]
    fn halt_at_limit() {
        let mut rm = manager();
        rm.update_drawdown(100_000.0);
        let status = rm.update_drawdown(80_000.0); // exactly 20%
        assert!(status.halt_trading);
    }

    #[test]
    fn no_halt_below_limit() {
        let mut rm = manager();
        let status = rm.update_drawdown(85_000.0); // 15%
        assert!(!status.halt_trading);
    }

    // ── Stop-loss / take-profit ──

    #[test]
    fn stop_loss_at_threshold() {
        let rm = manager();
        assert!(rm.check_stop_loss(100.0, 95.0)); // exactly 5%
        assert!(rm.check_stop_loss(100.0, 90.0));
        assert!(!rm.check_stop_loss(100.0, 96.0));
        assert!(!rm.check_stop_loss(100.0, 105.0));
    }

    #[test]
    fn take_profit_at_threshold() {
        let rm = manager();
        assert!(rm.check_take_profit(100.0, 110.0)); // exactly 10%
        assert!(rm.check_take_profit(100.0, 115.0));
        assert!(!rm.check_take_profit(100.0, 109.0));
        assert!(!rm.check_take_profit(100.0, 95.0));
    }

    // ── Risk/reward ──

    #[test]
    fn risk_reward_basic() {
        let rm = manager();
        // gain 10, loss 5 → 2.0
        assert!((rm.risk_reward_ratio(100.0, 110.0, 95.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn risk_reward_zero_when_stop_above_entry() {
        let rm = manager();
        assert_eq!(rm.risk_reward_ratio(100.0, 110.0, 100.0), 0.0);
        assert_eq!(rm.risk_reward_ratio(100.0, 110.0, 105.0), 0.0);
    }

    // ── should_enter ──

    #[test]
    fn rejects_poor_risk_reward() {
        // entry 100, target 105, stop 95 → ratio 1.0 < 2.0, regardless of
        // capital or drawdown state.
        let mut rm = manager();
        let decision = rm.should_enter(100_000.0, 100.0, 105.0);
        match decision {
            EntryDecision::Rejected {
                reason: RejectReason::PoorRiskReward { ratio },
            } => assert!((ratio - 1.0).abs() < 1e-12),
            other => panic!("expected PoorRiskReward, got {other:?}"),
        }
    }

    #[test]
    fn rejects_when_halted() {
        let mut rm = manager();
        rm.update_drawdown(100_000.0);
        // 25% below peak → halted; checked before risk/reward.
        let decision = rm.should_enter(75_000.0, 100.0, 120.0);
        assert!(matches!(
            decision,
            EntryDecision::Rejected {
                reason: RejectReason::DrawdownExceeded { .. }
            }
        ));
    }

    #[test]
    fn rejects_undersized_position() {
        let mut rm = manager();
        // 20% of $100 = $20 < $100 entry price → 0 shares.
        let decision = rm.should_enter(100.0, 100.0, 120.0);
        assert!(matches!(
            decision,
            EntryDecision::Rejected {
                reason: RejectReason::InsufficientCapital
            }
        ));
    }

    #[test]
    fn approves_with_sizing_and_stop() {
        let mut rm = manager();
        // entry 100, target 120 → stop 95, ratio 4.0; 20% of 100k → 200 shares.
        match rm.should_enter(100_000.0, 100.0, 120.0) {
            EntryDecision::Approved {
                shares,
                stop_loss_price,
                risk_reward,
                max_loss,
            } => {
                assert_eq!(shares, 200);
                assert!((stop_loss_price - 95.0).abs() < 1e-12);
                assert!((risk_reward - 4.0).abs() < 1e-12);
                assert!((max_loss - 200.0 * 100.0 * 0.05).abs() < 1e-9);
            }
            other => panic!("expected approval, got {other:?}"),
        }
    }

    #[test]
    fn reject_reason_display() {
        let reason = RejectReason::PoorRiskReward { ratio: 1.25 };
        assert_eq!(reason.to_string(), "poor risk/reward ratio: 1.25");
    }
}
