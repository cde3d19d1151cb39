//! Trade — one row of the append-only trade ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Why a position was closed.
///
/// Only set on Sell rows, and only when the run (or the risk replay) applied
/// risk management. Plain signal-driven runs leave it `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    Signal,
}

/// One executed fill. Immutable once appended to the ledger.
///
/// The ledger is chronological and append-only; it is the source of truth for
/// all trade-derived metrics. `profit` is present only on Sell rows and is
/// measured against the value recorded on the matching entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub side: TradeSide,
    pub price: f64,
    pub shares: u64,
    /// price × shares at fill time.
    pub value: f64,
    pub profit: Option<f64>,
    pub exit_reason: Option<ExitReason>,
    pub timestamp: DateTime<Utc>,
}

impl Trade {
    pub fn buy(price: f64, shares: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            side: TradeSide::Buy,
            price,
            shares,
            value: price * shares as f64,
            profit: None,
            exit_reason: None,
            timestamp,
        }
    }

    pub fn sell(
        price: f64,
        shares: u64,
        profit: f64,
        exit_reason: Option<ExitReason>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            side: TradeSide::Sell,
            price,
            shares,
            value: price * shares as f64,
            profit: Some(profit),
            exit_reason,
            timestamp,
        }
    }

    /// A Sell that realized a positive profit.
    pub fn is_winner(&self) -> bool {
        self.side == TradeSide::Sell && self.profit.is_some_and(|p| p > 0.0)
    }
}
