//! End-to-end walkthrough: synthetic data → strategy sweep → risk report.
//!
//! Run with `cargo run --example quickstart` (set `RUST_LOG=debug` to watch
//! the engine's per-fill events).

use anyhow::Result;
use tradelab_core::engine::{BacktestConfig, Backtester};
use tradelab_core::sizing::SizingMode;
use tradelab_runner::{
    default_strategies, logging, random_walk_bars, run_sweep, FitnessMetric, RiskReport,
    WalkConfig,
};

fn main() -> Result<()> {
    logging::init_tracing();

    let bars = random_walk_bars(500, WalkConfig::default());

    // Rank the four strategies on naive (full-cash) sizing.
    let config = BacktestConfig::default();
    let rows = run_sweep(&bars, &config, &default_strategies(), FitnessMetric::Sharpe)?;

    println!("strategy leaderboard (by Sharpe):");
    for row in &rows {
        println!(
            "  {:<10} return {:>8.2}%  sharpe {:>6.2}  max dd {:>6.2}%  trades {}",
            row.label, row.total_return_pct, row.sharpe_ratio, row.max_drawdown_pct, row.total_trades
        );
    }

    // Re-run the winner with the risk gate engaged and report on it.
    let best = &rows[0];
    let managed = Backtester::new(config.with_sizing(SizingMode::RiskManaged));
    let result = managed.run(&bars, best.strategy, &Default::default())?;

    println!(
        "\n{} (risk-managed): final value {:.2}, {} vetoed entries",
        best.label,
        result.final_value,
        result.rejected_entries.len()
    );
    println!("\n{}", RiskReport::from_result(&result).to_markdown());

    Ok(())
}
