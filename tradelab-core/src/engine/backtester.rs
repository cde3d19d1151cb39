//! The backtest engine — a single chronological fold over the bar sequence.
//!
//! Fills are instantaneous at the bar close. At most one position is open at
//! a time; every bar contributes exactly one equity point. Each `run` owns
//! its state exclusively, so independent runs may execute on parallel
//! threads as long as each uses its own `Backtester`.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{equity_values, Bar, EquityPoint, ExitReason, Position, Trade};
use crate::metrics;
use crate::risk::{EntryDecision, RiskConfig, RiskManager};
use crate::signals::{
    create_signal, ParseStrategyError, StrategyId, StrategyParams, ENTRY_CHANGE, EXIT_CHANGE,
};
use crate::sizing::{naive_size, SizingMode};

use super::result::{BacktestResult, RejectedEntry};

/// Invalid input — reported before any simulation work.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("empty bar sequence")]
    EmptySeries,

    #[error("bar sequence too short: {len} bars (need at least 2)")]
    TooShort { len: usize },

    #[error(transparent)]
    UnknownStrategy(#[from] ParseStrategyError),
}

/// Per-run configuration.
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub sizing: SizingMode,
    /// Limits for the risk gate; used only in `RiskManaged` sizing.
    pub risk: RiskConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            sizing: SizingMode::Naive,
            risk: RiskConfig::default(),
        }
    }
}

impl BacktestConfig {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            ..Self::default()
        }
    }

    pub fn with_sizing(mut self, sizing: SizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_risk(mut self, risk: RiskConfig) -> Self {
        self.risk = risk;
        self
    }
}

pub struct Backtester {
    config: BacktestConfig,
}

impl Backtester {
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run with a string strategy identifier, failing fast on an unknown one.
    pub fn run_named(
        &self,
        bars: &[Bar],
        strategy: &str,
        params: &StrategyParams,
    ) -> Result<BacktestResult, BacktestError> {
        let id: StrategyId = strategy.parse()?;
        self.run(bars, id, params)
    }

    /// Run one backtest: signals, then the bar-by-bar fold, then the summary.
    pub fn run(
        &self,
        bars: &[Bar],
        strategy: StrategyId,
        params: &StrategyParams,
    ) -> Result<BacktestResult, BacktestError> {
        if bars.is_empty() {
            return Err(BacktestError::EmptySeries);
        }
        if bars.len() < 2 {
            return Err(BacktestError::TooShort { len: bars.len() });
        }

        let generator = create_signal(strategy, params);
        let series = generator.generate(bars);

        let mut cash = self.config.initial_capital;
        let mut position: Option<Position> = None;
        let mut trades: Vec<Trade> = Vec::new();
        let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(bars.len());
        let mut rejected_entries: Vec<RejectedEntry> = Vec::new();

        let managed = self.config.sizing == SizingMode::RiskManaged;
        let mut risk = RiskManager::new(RiskConfig {
            initial_capital: self.config.initial_capital,
            ..self.config.risk.clone()
        });
        let take_profit_pct = risk.config().take_profit_pct;

        for (i, bar) in bars.iter().enumerate() {
            let close = bar.close;

            // Managed runs exit on the risk thresholds before looking at the
            // signal; the stop-loss takes precedence over the take-profit.
            if managed {
                if let Some(pos) = &position {
                    let reason = if risk.check_stop_loss(pos.entry_price, close) {
                        Some(ExitReason::StopLoss)
                    } else if risk.check_take_profit(pos.entry_price, close) {
                        Some(ExitReason::TakeProfit)
                    } else {
                        None
                    };
                    if let Some(reason) = reason {
                        close_position(&mut position, &mut cash, &mut trades, bar, Some(reason));
                    }
                }
            }

            let change = series.changes[i];
            if change == ENTRY_CHANGE && position.is_none() {
                let shares = if managed {
                    let target = close * (1.0 + take_profit_pct);
                    match risk.should_enter(cash, close, target) {
                        EntryDecision::Approved { shares, .. } => shares,
                        EntryDecision::Rejected { reason } => {
                            debug!(bar = i, price = close, %reason, "entry vetoed");
                            rejected_entries.push(RejectedEntry {
                                timestamp: bar.timestamp,
                                price: close,
                                reason,
                            });
                            0
                        }
                    }
                } else {
                    naive_size(cash, close)
                };

                if shares > 0 {
                    let trade = Trade::buy(close, shares, bar.timestamp);
                    cash -= trade.value;
                    position = Some(Position::open(close, shares, bar.timestamp));
                    debug!(bar = i, price = close, shares, "opened position");
                    trades.push(trade);
                }
            } else if change == EXIT_CHANGE && position.is_some() {
                let reason = managed.then_some(ExitReason::Signal);
                close_position(&mut position, &mut cash, &mut trades, bar, reason);
            }

            let total_value = cash + position.as_ref().map_or(0.0, |p| p.market_value(close));
            equity_curve.push(EquityPoint {
                timestamp: bar.timestamp,
                total_value,
            });
        }

        let result = self.summarize(trades, equity_curve, rejected_entries);
        info!(
            strategy = %strategy,
            trades = result.total_trades,
            return_pct = result.total_return_pct,
            sharpe = result.sharpe_ratio,
            "backtest complete"
        );
        Ok(result)
    }

    fn summarize(
        &self,
        trades: Vec<Trade>,
        equity_curve: Vec<EquityPoint>,
        rejected_entries: Vec<RejectedEntry>,
    ) -> BacktestResult {
        let initial_capital = self.config.initial_capital;
        let final_value = equity_curve
            .last()
            .map_or(initial_capital, |p| p.total_value);
        let total_return_pct = (final_value - initial_capital) / initial_capital * 100.0;

        let sells = trades.iter().filter(|t| t.profit.is_some()).count();
        let wins = trades.iter().filter(|t| t.is_winner()).count();
        let win_rate_pct = if sells == 0 {
            0.0
        } else {
            wins as f64 / sells as f64 * 100.0
        };

        let values = equity_values(&equity_curve);
        let max_drawdown_pct = metrics::max_drawdown(&values) * 100.0;
        let sharpe_ratio = metrics::sharpe_ratio(&metrics::returns_from_equity(&values));

        BacktestResult {
            initial_capital,
            final_value,
            total_return_pct,
            total_trades: trades.len(),
            win_rate_pct,
            max_drawdown_pct,
            sharpe_ratio,
            trades,
            equity_curve,
            rejected_entries,
        }
    }
}

/// Liquidate the open position at this bar's close and append the SELL row.
fn close_position(
    position: &mut Option<Position>,
    cash: &mut f64,
    trades: &mut Vec<Trade>,
    bar: &Bar,
    reason: Option<ExitReason>,
) {
    let Some(pos) = position.take() else {
        return;
    };
    let value = pos.market_value(bar.close);
    let profit = value - pos.entry_value;
    *cash += value;
    debug!(
        price = bar.close,
        shares = pos.shares,
        profit,
        ?reason,
        "closed position"
    );
    trades.push(Trade::sell(
        bar.close,
        pos.shares,
        profit,
        reason,
        bar.timestamp,
    ));
}
