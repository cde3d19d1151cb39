//! Risk management: the per-run gate and the ledger replay annotator.

pub mod gate;
pub mod replay;

pub use gate::{
    DrawdownStatus, EntryDecision, RejectReason, RiskConfig, RiskManager, MIN_RISK_REWARD,
};
pub use replay::{apply_risk_management, ManagedTrade};
