//! tradelab-core — backtesting and risk-management engine.
//!
//! Converts a price-bar sequence plus a strategy's buy/sell signals into a
//! simulated trade ledger, an equity curve, and risk/performance metrics,
//! while enforcing position-sizing and capital-preservation rules:
//!
//! - Domain types (bars, trades, positions, equity points)
//! - Rolling indicator primitives (SMA, EMA, RSI, Bollinger, MACD)
//! - Four pure signal generators behind one trait
//! - Position sizing (full-cash or capped-Kelly fraction)
//! - Risk gate with drawdown ratchet and entry vetoes
//! - Single-pass backtest loop and result summary
//! - Pure metric functions (drawdown, Sharpe, Sortino, Calmar, VaR/CVaR,
//!   beta, information ratio)
//!
//! The crate is pure computation: no I/O, no async, no shared state. Every
//! run owns its engine and risk-gate instances, so independent runs can be
//! executed from parallel threads.

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod metrics;
pub mod risk;
pub mod signals;
pub mod sizing;
