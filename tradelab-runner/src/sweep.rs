//! Strategy sweeps — independent backtests fanned out across threads.
//!
//! Each worker builds its own `Backtester` (and therefore its own risk
//! gate), so runs share nothing; rayon just schedules them.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use tradelab_core::domain::Bar;
use tradelab_core::engine::{BacktestConfig, BacktestError, Backtester};
use tradelab_core::signals::{StrategyId, StrategyParams};

/// Which summary number ranks the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessMetric {
    #[default]
    Sharpe,
    TotalReturn,
    MaxDrawdown,
}

impl FitnessMetric {
    pub fn extract(&self, row: &LeaderboardRow) -> f64 {
        match self {
            Self::Sharpe => row.sharpe_ratio,
            Self::TotalReturn => row.total_return_pct,
            Self::MaxDrawdown => row.max_drawdown_pct,
        }
    }

    /// True when `a` ranks ahead of `b`. Drawdown is a positive fraction
    /// here, so smaller wins; for everything else larger wins.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        match self {
            Self::MaxDrawdown => a < b,
            _ => a > b,
        }
    }
}

/// One candidate in a sweep.
#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub label: String,
    pub strategy: StrategyId,
    pub params: StrategyParams,
}

impl SweepEntry {
    pub fn new(label: impl Into<String>, strategy: StrategyId, params: StrategyParams) -> Self {
        Self {
            label: label.into(),
            strategy,
            params,
        }
    }
}

/// Summary row for one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub label: String,
    pub strategy: StrategyId,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub win_rate_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,
    pub total_trades: usize,
}

/// The four strategies at their documented defaults.
pub fn default_strategies() -> Vec<SweepEntry> {
    StrategyId::ALL
        .iter()
        .map(|&id| SweepEntry::new(id.as_str(), id, StrategyParams::new()))
        .collect()
}

/// SMA crossover window grid; short ≥ long combinations are skipped.
pub fn sma_window_grid(shorts: &[usize], longs: &[usize]) -> Vec<SweepEntry> {
    let mut entries = Vec::new();
    for &short in shorts {
        for &long in longs {
            if short >= long {
                continue;
            }
            let mut params = StrategyParams::new();
            params.insert("short_window".into(), short as f64);
            params.insert("long_window".into(), long as f64);
            entries.push(SweepEntry::new(
                format!("sma_{short}_{long}"),
                StrategyId::SmaCross,
                params,
            ));
        }
    }
    entries
}

/// Run every entry over the same bars and rank by `fitness`.
///
/// Fails fast on invalid input (the first run to report it); policy
/// rejections inside individual runs are data, not failures.
pub fn run_sweep(
    bars: &[Bar],
    config: &BacktestConfig,
    entries: &[SweepEntry],
    fitness: FitnessMetric,
) -> Result<Vec<LeaderboardRow>, BacktestError> {
    let mut rows: Vec<LeaderboardRow> = entries
        .par_iter()
        .map(|entry| {
            let backtester = Backtester::new(config.clone());
            let result = backtester.run(bars, entry.strategy, &entry.params)?;
            Ok(LeaderboardRow {
                label: entry.label.clone(),
                strategy: entry.strategy,
                final_value: result.final_value,
                total_return_pct: result.total_return_pct,
                win_rate_pct: result.win_rate_pct,
                max_drawdown_pct: result.max_drawdown_pct,
                sharpe_ratio: result.sharpe_ratio,
                total_trades: result.total_trades,
            })
        })
        .collect::<Result<_, BacktestError>>()?;

    rows.sort_by(|a, b| {
        let (fa, fb) = (fitness.extract(a), fitness.extract(b));
        if fitness.is_better(fa, fb) {
            std::cmp::Ordering::Less
        } else if fitness.is_better(fb, fa) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_data::{random_walk_bars, WalkConfig};

    #[test]
    fn default_strategies_covers_all_four() {
        let entries = default_strategies();
        assert_eq!(entries.len(), 4);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["sma_cross", "rsi", "bollinger", "macd"]);
    }

    #[test]
    fn grid_skips_degenerate_windows() {
        let entries = sma_window_grid(&[10, 50], &[20, 50]);
        // (10,20), (10,50) survive; (50,20) and (50,50) are skipped.
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn sweep_runs_every_entry() {
        let bars = random_walk_bars(200, WalkConfig::default());
        let rows = run_sweep(
            &bars,
            &BacktestConfig::default(),
            &default_strategies(),
            FitnessMetric::Sharpe,
        )
        .unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn sweep_sorts_by_fitness() {
        let bars = random_walk_bars(300, WalkConfig::default());
        let entries = sma_window_grid(&[1, 5, 10], &[2, 20, 50]);
        let rows = run_sweep(
            &bars,
            &BacktestConfig::default(),
            &entries,
            FitnessMetric::Sharpe,
        )
        .unwrap();
        for pair in rows.windows(2) {
            assert!(pair[0].sharpe_ratio >= pair[1].sharpe_ratio);
        }
    }

    #[test]
    fn drawdown_ranking_prefers_smaller() {
        assert!(FitnessMetric::MaxDrawdown.is_better(2.0, 10.0));
        assert!(!FitnessMetric::MaxDrawdown.is_better(10.0, 2.0));
        assert!(FitnessMetric::Sharpe.is_better(1.5, 0.5));
    }

    #[test]
    fn sweep_propagates_invalid_input() {
        let bars = random_walk_bars(1, WalkConfig::default());
        let err = run_sweep(
            &bars,
            &BacktestConfig::default(),
            &default_strategies(),
            FitnessMetric::Sharpe,
        );
        assert!(err.is_err());
    }
}
