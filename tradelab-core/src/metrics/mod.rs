//! Risk and performance metrics — pure functions over return or equity series.
//!
//! Returns are fractional period-over-period changes. Degenerate inputs
//! (too few observations, zero variance, zero drawdown, zero tracking error)
//! are not errors: every function returns 0.0 by convention in those cases,
//! as documented per function.

pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Fractional changes between consecutive equity values. The first point has
/// no predecessor and produces no observation.
pub fn returns_from_equity(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| if w[0] != 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

/// Maximum drawdown of an equity series as a positive fraction.
///
/// Left-to-right scan maintaining the running peak; the result is the largest
/// (peak − value) / peak observed. 0.0 for constant or monotonically rising
/// series.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = match equity.first() {
        Some(&v) => v,
        None => return 0.0,
    };
    let mut max_dd = 0.0_f64;

    for &value in equity {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio: mean(returns) / std(returns) × √252.
///
/// Sample standard deviation. 0.0 with fewer than 2 observations or zero
/// variance.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let std = std_dev(returns);
    if std < 1e-15 {
        return 0.0;
    }
    mean(returns) / std * (TRADING_DAYS_PER_YEAR as f64).sqrt()
}

/// Value at Risk: the (1 − confidence) percentile of the return distribution.
///
/// Linear interpolation between order statistics. 0.0 on an empty series.
pub fn value_at_risk(returns: &[f64], confidence: f64) -> f64 {
    percentile(returns, (1.0 - confidence) * 100.0)
}

/// Conditional VaR: mean of all returns at or below the VaR cutoff.
///
/// 0.0 on an empty series.
pub fn conditional_var(returns: &[f64], confidence: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let var = value_at_risk(returns, confidence);
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= var).collect();
    if tail.is_empty() {
        return 0.0;
    }
    mean(&tail)
}

/// Annualized Sortino ratio: mean excess return over downside deviation.
///
/// The denominator is the root-mean-square of the *negative* excess returns
/// only. 0.0 when there are no downside observations or the downside
/// deviation is zero.
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: usize) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let period_rf = risk_free_rate / periods_per_year as f64;
    let excess: Vec<f64> = returns.iter().map(|r| r - period_rf).collect();

    let downside_sq: Vec<f64> = excess.iter().filter(|r| **r < 0.0).map(|r| r * r).collect();
    if downside_sq.is_empty() {
        return 0.0;
    }
    let downside_std = mean(&downside_sq).sqrt();
    if downside_std < 1e-15 {
        return 0.0;
    }

    mean(&excess) / downside_std * (periods_per_year as f64).sqrt()
}

/// Calmar ratio: annualized compounded return over the maximum drawdown of
/// the cumulative-return curve.
///
/// 0.0 when the cumulative curve never draws down, or when compounding
/// destroys the whole stake.
pub fn calmar_ratio(returns: &[f64], periods_per_year: usize) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let mut cumulative = Vec::with_capacity(returns.len());
    let mut acc = 1.0;
    for r in returns {
        acc *= 1.0 + r;
        cumulative.push(acc);
    }

    let dd = max_drawdown(&cumulative);
    if dd == 0.0 {
        return 0.0;
    }

    let last = *cumulative.last().expect("non-empty");
    if last <= 0.0 {
        return 0.0;
    }
    let annualized = last.powf(periods_per_year as f64 / returns.len() as f64) - 1.0;
    annualized / dd
}

/// Beta: covariance of asset vs market returns over market variance.
///
/// Sample covariance (n − 1) over population variance (n). 0.0 when the
/// series lengths differ, there are fewer than 2 observations, or the market
/// variance is zero.
pub fn beta(asset_returns: &[f64], market_returns: &[f64]) -> f64 {
    let n = asset_returns.len();
    if n != market_returns.len() || n < 2 {
        return 0.0;
    }

    let market_mean = mean(market_returns);
    let market_variance =
        market_returns.iter().map(|r| (r - market_mean).powi(2)).sum::<f64>() / n as f64;
    if market_variance < 1e-15 {
        return 0.0;
    }

    let asset_mean = mean(asset_returns);
    let covariance = asset_returns
        .iter()
        .zip(market_returns)
        .map(|(a, m)| (a - asset_mean) * (m - market_mean))
        .sum::<f64>()
        / (n - 1) as f64;

    covariance / market_variance
}

/// Information ratio: mean active return over its standard deviation.
///
/// Active return is portfolio minus benchmark, element-wise. 0.0 when the
/// lengths differ, there are fewer than 2 observations, or the tracking
/// error is zero.
pub fn information_ratio(portfolio_returns: &[f64], benchmark_returns: &[f64]) -> f64 {
    let n = portfolio_returns.len();
    if n != benchmark_returns.len() || n < 2 {
        return 0.0;
    }

    let active: Vec<f64> = portfolio_returns
        .iter()
        .zip(benchmark_returns)
        .map(|(p, b)| p - b)
        .collect();

    let tracking_error = std_dev(&active);
    if tracking_error < 1e-15 {
        return 0.0;
    }
    mean(&active) / tracking_error
}

// ─── Helpers ────────────────────────────────────────────────────────

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator).
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Percentile with linear interpolation between order statistics.
/// `pct` in [0, 100]. 0.0 on an empty series.
pub(crate) fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("non-NaN returns"));

    let rank = pct.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = rank - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}
