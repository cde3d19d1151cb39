//! Position — the single open lot the engine may hold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open long position. At most one exists at any time; the backtest engine
/// owns it exclusively and clears it on exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub entry_price: f64,
    pub shares: u64,
    /// Cash debited at entry (entry_price × shares). Profit on exit is
    /// measured against this value.
    pub entry_value: f64,
    pub entry_timestamp: DateTime<Utc>,
}

impl Position {
    pub fn open(entry_price: f64, shares: u64, entry_timestamp: DateTime<Utc>) -> Self {
        Self {
            entry_price,
            shares,
            entry_value: entry_price * shares as f64,
            entry_timestamp,
        }
    }

    /// Mark-to-market value at the given price.
    pub fn market_value(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn open_records_entry_value() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let pos = Position::open(50.0, 20, ts);
        assert_eq!(pos.entry_value, 1000.0);
        assert_eq!(pos.market_value(55.0), 1100.0);
    }
}
