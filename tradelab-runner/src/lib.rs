//! tradelab-runner — orchestration around the engine.
//!
//! The engine (`tradelab-core`) is pure computation; this crate holds the
//! thin shells a real deployment composes around it:
//!
//! - Run configuration (TOML) with content-addressed run ids
//! - CSV bar loading and synthetic sample data
//! - Parallel strategy sweeps and leaderboards
//! - Risk reports and CSV artifacts
//! - In-process price fan-out (publish/subscribe)
//! - Tracing initialization

pub mod broadcast;
pub mod config;
pub mod data_loader;
pub mod logging;
pub mod report;
pub mod sample_data;
pub mod sweep;

pub use broadcast::{PriceFeed, PriceUpdate, SubscriberId};
pub use config::RunConfig;
pub use data_loader::load_bars_csv;
pub use report::{export_equity_csv, export_trades_csv, RiskReport};
pub use sample_data::{random_walk_bars, WalkConfig};
pub use sweep::{
    default_strategies, run_sweep, sma_window_grid, FitnessMetric, LeaderboardRow, SweepEntry,
};
