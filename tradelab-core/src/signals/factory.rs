//! Strategy construction — closed identifier set plus a numeric parameter map.
//!
//! Callers select a strategy by `StrategyId` (or its string form) and supply
//! optional parameters. Missing keys fall back to the documented defaults;
//! unrecognized keys are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{BollingerReversion, MacdCross, RsiMomentum, SignalGenerator, SmaCrossover};

/// Strategy parameters. `BTreeMap` keeps serialization deterministic for
/// downstream run fingerprinting.
pub type StrategyParams = BTreeMap<String, f64>;

/// The closed set of supported strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    SmaCross,
    Rsi,
    Bollinger,
    Macd,
}

impl StrategyId {
    pub const ALL: [StrategyId; 4] = [
        StrategyId::SmaCross,
        StrategyId::Rsi,
        StrategyId::Bollinger,
        StrategyId::Macd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::SmaCross => "sma_cross",
            StrategyId::Rsi => "rsi",
            StrategyId::Bollinger => "bollinger",
            StrategyId::Macd => "macd",
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy identifier — an invalid-input failure, reported before
/// any work is done.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown strategy: {0} (expected one of sma_cross, rsi, bollinger, macd)")]
pub struct ParseStrategyError(pub String);

impl FromStr for StrategyId {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sma_cross" => Ok(StrategyId::SmaCross),
            "rsi" => Ok(StrategyId::Rsi),
            "bollinger" => Ok(StrategyId::Bollinger),
            "macd" => Ok(StrategyId::Macd),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

fn param(params: &StrategyParams, name: &str, default: f64) -> f64 {
    params.get(name).copied().unwrap_or(default)
}

fn param_usize(params: &StrategyParams, name: &str, default: usize) -> usize {
    params
        .get(name)
        .copied()
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Build the signal generator for `id`, applying `params` over the defaults.
pub fn create_signal(id: StrategyId, params: &StrategyParams) -> Box<dyn SignalGenerator> {
    match id {
        StrategyId::SmaCross => {
            let short = param_usize(params, "short_window", 20);
            let long = param_usize(params, "long_window", 50);
            Box::new(SmaCrossover::new(short, long))
        }
        StrategyId::Rsi => {
            let period = param_usize(params, "period", 14);
            let oversold = param(params, "oversold", 30.0);
            let overbought = param(params, "overbought", 70.0);
            Box::new(RsiMomentum::new(period, oversold, overbought))
        }
        StrategyId::Bollinger => {
            let period = param_usize(params, "period", 20);
            let std_dev = param(params, "std_dev", 2.0);
            Box::new(BollingerReversion::new(period, std_dev))
        }
        // Fixed 12/26/9; takes no parameters.
        StrategyId::Macd => Box::new(MacdCross::new()),
    }
}
