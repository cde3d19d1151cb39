//! EquityPoint — one sample of the portfolio value time series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Portfolio value at one bar close: cash plus marked-to-market position.
///
/// The engine appends exactly one point per input bar, trade or no trade, so
/// the equity curve is a complete, ordered series parallel to the bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub total_value: f64,
}

/// Strip timestamps, keeping the value series metrics operate on.
pub fn equity_values(curve: &[EquityPoint]) -> Vec<f64> {
    curve.iter().map(|p| p.total_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn values_extraction() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let curve = vec![
            EquityPoint { timestamp: ts, total_value: 100.0 },
            EquityPoint { timestamp: ts, total_value: 120.0 },
        ];
        assert_eq!(equity_values(&curve), vec![100.0, 120.0]);
    }
}
