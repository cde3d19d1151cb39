//! Backtest run output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EquityPoint, Trade};
use crate::risk::RejectReason;

/// An entry the risk gate vetoed during a risk-managed run.
///
/// Vetoes are normal outcomes, surfaced as data so callers can audit why the
/// managed run traded less than the signal series suggested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedEntry {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub reason: RejectReason,
}

/// Everything a single run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_capital: f64,
    /// Cash plus any still-open position marked at the last close.
    pub final_value: f64,
    pub total_return_pct: f64,
    /// Ledger length: buys and sells both count.
    pub total_trades: usize,
    /// Winning sells over total sells × 100; 0 with no sells.
    pub win_rate_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,
    pub trades: Vec<Trade>,
    /// One point per input bar.
    pub equity_curve: Vec<EquityPoint>,
    /// Empty for naive-sized runs.
    pub rejected_entries: Vec<RejectedEntry>,
}
