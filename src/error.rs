use thiserror::Error;

use crate::domain::utils::id::SwitchId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config file not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse controller config JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("No link {from} -> {to} in the topology")]
    UnknownLink { from: SwitchId, to: SwitchId },

    /// A reservation was attempted past the feasibility check. Under the single-writer
    /// model the path finder has already filtered every edge for headroom, so this
    /// surfacing at all means a mutation slipped between check and commit.
    #[error("Link {from} -> {to} holds {available} capacity units, cannot reserve {requested}")]
    InsufficientCapacity { from: SwitchId, to: SwitchId, requested: i64, available: i64 },

    #[error("Rule installation on switch {switch} failed: {reason}")]
    RuleInstallation { switch: SwitchId, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
