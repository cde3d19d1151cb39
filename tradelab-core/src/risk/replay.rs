//! Ledger replay — risk management applied after the fact.
//!
//! Takes a trade ledger an engine already produced and re-walks its BUY/SELL
//! pairs through the risk gate. Cash and share counts are not re-simulated:
//! approved buys are annotated with what the gate *would* have sized, sells
//! are tagged with the exit reason, and vetoed buys (plus their now-orphaned
//! sells) are dropped.

use serde::{Deserialize, Serialize};

use crate::domain::{ExitReason, Trade, TradeSide};

use super::gate::{EntryDecision, RiskManager};

/// A ledger row that survived the replay, with the gate's annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedTrade {
    pub trade: Trade,
    /// Gate-approved share count (BUY rows only).
    pub approved_shares: Option<u64>,
    /// Stop price implied by the entry (BUY rows only).
    pub stop_loss_price: Option<f64>,
    /// Reward-to-risk the gate saw (BUY rows only).
    pub risk_reward: Option<f64>,
}

/// Replay `trades` through the gate.
///
/// Every BUY is checked with `should_enter`, using the configured initial
/// capital and a target of entry × (1 + take_profit_pct). SELLs are matched
/// to the most recent surviving BUY and tagged with `exit_reason`; a SELL
/// with no surviving entry is dropped.
pub fn apply_risk_management(trades: &[Trade], risk: &mut RiskManager) -> Vec<ManagedTrade> {
    let capital = risk.config().initial_capital;
    let take_profit_pct = risk.config().take_profit_pct;

    let mut managed = Vec::new();
    let mut open_entry_price: Option<f64> = None;

    for trade in trades {
        match trade.side {
            TradeSide::Buy => {
                let target = trade.price * (1.0 + take_profit_pct);
                match risk.should_enter(capital, trade.price, target) {
                    EntryDecision::Approved {
                        shares,
                        stop_loss_price,
                        risk_reward,
                        ..
                    } => {
                        managed.push(ManagedTrade {
                            trade: trade.clone(),
                            approved_shares: Some(shares),
                            stop_loss_price: Some(stop_loss_price),
                            risk_reward: Some(risk_reward),
                        });
                        open_entry_price = Some(trade.price);
                    }
                    EntryDecision::Rejected { .. } => {}
                }
            }
            TradeSide::Sell => {
                let Some(entry_price) = open_entry_price.take() else {
                    continue;
                };
                let exit_reason = if risk.check_stop_loss(entry_price, trade.price) {
                    ExitReason::StopLoss
                } else if risk.check_take_profit(entry_price, trade.price) {
                    ExitReason::TakeProfit
                } else {
                    ExitReason::Signal
                };

                let mut tagged = trade.clone();
                tagged.exit_reason = Some(exit_reason);
                managed.push(ManagedTrade {
                    trade: tagged,
                    approved_shares: None,
                    stop_loss_price: None,
                    risk_reward: None,
                });
            }
        }
    }

    managed
}
