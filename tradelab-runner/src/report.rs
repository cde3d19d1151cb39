//! Risk reporting — the metric suite over a finished run, plus CSV artifacts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use tradelab_core::domain::{equity_values, EquityPoint, ExitReason, Trade, TradeSide};
use tradelab_core::engine::BacktestResult;
use tradelab_core::metrics;

const DEFAULT_CONFIDENCE: f64 = 0.95;
const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Advanced risk metrics for one run, computed over its equity returns.
///
/// `beta` and `information_ratio` need a benchmark return series and stay
/// `None` without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub var_95: f64,
    pub cvar_95: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub beta: Option<f64>,
    pub information_ratio: Option<f64>,
}

impl RiskReport {
    pub fn from_result(result: &BacktestResult) -> Self {
        let returns = metrics::returns_from_equity(&equity_values(&result.equity_curve));
        Self::from_returns(&returns, None)
    }

    pub fn with_benchmark(result: &BacktestResult, benchmark_returns: &[f64]) -> Self {
        let returns = metrics::returns_from_equity(&equity_values(&result.equity_curve));
        Self::from_returns(&returns, Some(benchmark_returns))
    }

    fn from_returns(returns: &[f64], benchmark: Option<&[f64]>) -> Self {
        Self {
            var_95: metrics::value_at_risk(returns, DEFAULT_CONFIDENCE),
            cvar_95: metrics::conditional_var(returns, DEFAULT_CONFIDENCE),
            sortino_ratio: metrics::sortino_ratio(
                returns,
                DEFAULT_RISK_FREE_RATE,
                metrics::TRADING_DAYS_PER_YEAR,
            ),
            calmar_ratio: metrics::calmar_ratio(returns, metrics::TRADING_DAYS_PER_YEAR),
            beta: benchmark.map(|b| metrics::beta(returns, b)),
            information_ratio: benchmark.map(|b| metrics::information_ratio(returns, b)),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("| metric | value |\n|---|---|\n");
        out.push_str(&format!("| VaR (95%) | {:.4} |\n", self.var_95));
        out.push_str(&format!("| CVaR (95%) | {:.4} |\n", self.cvar_95));
        out.push_str(&format!("| Sortino | {:.3} |\n", self.sortino_ratio));
        out.push_str(&format!("| Calmar | {:.3} |\n", self.calmar_ratio));
        if let Some(beta) = self.beta {
            out.push_str(&format!("| Beta | {beta:.3} |\n"));
        }
        if let Some(ir) = self.information_ratio {
            out.push_str(&format!("| Information ratio | {ir:.3} |\n"));
        }
        out
    }
}

/// Write the equity curve as `timestamp,total_value`.
pub fn export_equity_csv(path: &Path, curve: &[EquityPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating equity artifact {}", path.display()))?;
    writer.write_record(["timestamp", "total_value"])?;
    for point in curve {
        writer.write_record([point.timestamp.to_rfc3339(), point.total_value.to_string()])?;
    }
    writer.flush().context("flushing equity artifact")?;
    Ok(())
}

/// Write the trade ledger as one row per fill.
pub fn export_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating trades artifact {}", path.display()))?;
    writer.write_record([
        "timestamp",
        "side",
        "price",
        "shares",
        "value",
        "profit",
        "exit_reason",
    ])?;
    for trade in trades {
        let side = match trade.side {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        };
        let exit_reason = match trade.exit_reason {
            Some(ExitReason::StopLoss) => "stop_loss",
            Some(ExitReason::TakeProfit) => "take_profit",
            Some(ExitReason::Signal) => "signal",
            None => "",
        };
        writer.write_record([
            trade.timestamp.to_rfc3339(),
            side.to_string(),
            trade.price.to_string(),
            trade.shares.to_string(),
            trade.value.to_string(),
            trade.profit.map(|p| p.to_string()).unwrap_or_default(),
            exit_reason.to_string(),
        ])?;
    }
    writer.flush().context("flushing trades artifact")?;
    Ok(())
}
