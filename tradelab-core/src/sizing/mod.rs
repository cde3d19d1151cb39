//! Position sizing — capital into whole-share quantities.
//!
//! Two per-run modes: `Naive` commits all available cash at the entry price
//! (the classic full-allocation backtest), `RiskManaged` routes every entry
//! through the risk gate, which sizes with `position_size` below.

use serde::{Deserialize, Serialize};

/// Ceiling on the volatility-scaled allocation fraction.
pub const KELLY_CAP: f64 = 0.25;

/// How the engine sizes new entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// All available cash at the entry price.
    #[default]
    Naive,
    /// Position sizer + risk gate consulted before every entry, stop-loss
    /// and take-profit checked on every held bar.
    RiskManaged,
}

/// Shares for a new position under a maximum-fraction-of-capital cap.
///
/// `raw = floor(capital * max_fraction / price)`; when a positive volatility
/// is supplied the result is scaled by a capped Kelly fraction
/// `min(0.25, 1/volatility)`. Degenerate inputs (non-positive or non-finite
/// capital or price) size to zero — never an error.
pub fn position_size(capital: f64, price: f64, max_fraction: f64, volatility: Option<f64>) -> u64 {
    if !capital.is_finite() || !price.is_finite() || capital <= 0.0 || price <= 0.0 {
        return 0;
    }

    let mut shares = (capital * max_fraction / price).floor();
    if shares <= 0.0 {
        return 0;
    }

    if let Some(vol) = volatility {
        if vol > 0.0 {
            let kelly = KELLY_CAP.min(1.0 / vol);
            shares = (shares * kelly).floor();
        }
    }

    shares.max(0.0) as u64
}

/// Full-cash sizing: every dollar at the given price, whole shares.
pub fn naive_size(cash: f64, price: f64) -> u64 {
    if !cash.is_finite() || !price.is_finite() || cash <= 0.0 || price <= 0.0 {
        return 0;
    }
    (cash / price).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_at_max_fraction() {
        // 20% of 100k at $50 → 400 shares.
        assert_eq!(position_size(100_000.0, 50.0, 0.2, None), 400);
    }

    #[test]
    fn floors_fractional_shares() {
        // 20% of 100k at $300 → 66.67 → 66.
        assert_eq!(position_size(100_000.0, 300.0, 0.2, None), 66);
    }

    #[test]
    fn volatility_scales_down() {
        // vol 10 → kelly 0.1 → 400 * 0.1 = 40.
        assert_eq!(position_size(100_000.0, 50.0, 0.2, Some(10.0)), 40);
    }

    #[test]
    fn kelly_fraction_is_capped() {
        // vol 2 → 1/vol = 0.5, capped at 0.25 → 400 * 0.25 = 100.
        assert_eq!(position_size(100_000.0, 50.0, 0.2, Some(2.0)), 100);
    }

    #[test]
    fn zero_or_negative_volatility_is_ignored() {
        assert_eq!(position_size(100_000.0, 50.0, 0.2, Some(0.0)), 400);
        assert_eq!(position_size(100_000.0, 50.0, 0.2, Some(-1.0)), 400);
    }

    #[test]
    fn degenerate_inputs_size_zero() {
        assert_eq!(position_size(0.0, 50.0, 0.2, None), 0);
        assert_eq!(position_size(-100.0, 50.0, 0.2, None), 0);
        assert_eq!(position_size(100_000.0, 0.0, 0.2, None), 0);
        assert_eq!(position_size(100_000.0, -5.0, 0.2, None), 0);
        assert_eq!(position_size(f64::NAN, 50.0, 0.2, None), 0);
        assert_eq!(position_size(100_000.0, f64::INFINITY, 0.2, None), 0);
    }

    #[test]
    fn insufficient_capital_sizes_zero() {
        // 20% of 100 = $20, price $50 → 0 shares.
        assert_eq!(position_size(100.0, 50.0, 0.2, None), 0);
    }

    #[test]
    fn naive_uses_all_cash() {
        assert_eq!(naive_size(100_000.0, 30.0), 3333);
        assert_eq!(naive_size(0.0, 30.0), 0);
        assert_eq!(naive_size(100.0, 0.0), 0);
    }

    #[test]
    fn default_mode_is_naive() {
        assert_eq!(SizingMode::default(), SizingMode::Naive);
    }
}
