//! Backtest engine — configuration, the bar loop, and run results.

pub mod backtester;
pub mod result;

pub use backtester::{BacktestConfig, BacktestError, Backtester};
pub use result::{BacktestResult, RejectedEntry};
