//! Serializable run configuration.
//!
//! A `RunConfig` captures everything needed to reproduce a backtest:
//! strategy, parameters, capital, sizing mode, and risk limits. Configs load
//! from TOML with every field optional, and hash to a deterministic run id
//! so collaborators can key persisted results.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use tradelab_core::engine::BacktestConfig;
use tradelab_core::risk::RiskConfig;
use tradelab_core::signals::{StrategyId, StrategyParams};
use tradelab_core::sizing::SizingMode;

/// Configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub strategy: StrategyId,
    pub params: StrategyParams,
    pub initial_capital: f64,
    pub sizing: SizingMode,
    pub risk: RiskConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyId::SmaCross,
            params: StrategyParams::new(),
            initial_capital: 100_000.0,
            sizing: SizingMode::Naive,
            risk: RiskConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load from a TOML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading run config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing run config {}", path.display()))
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two identical configs produce the same id, so externally persisted
    /// results can be deduplicated. `StrategyParams` is a `BTreeMap`, which
    /// keeps the serialization (and therefore the hash) stable.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("RunConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// The engine-side configuration this run describes.
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            initial_capital: self.initial_capital,
            sizing: self.sizing,
            risk: self.risk.clone(),
        }
    }
}
