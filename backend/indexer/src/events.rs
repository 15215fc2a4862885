//! Canonical event types emitted by the locker contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/locker_protocol/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the locker contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A pool was created (`pool_add` topic).
    PoolAdded,
    /// A pool's schedule was overwritten (`pool_upd` topic).
    PoolUpdated,
    /// A tier band was appended (`tier_add` topic).
    TierAdded,
    /// A user locked tokens (`locked` topic).
    Locked,
    /// A user withdrew penalty-free (`unlocked` topic).
    Unlocked,
    /// A user exited early, forfeiting a penalty (`early_out` topic).
    EarlyUnlocked,
    /// The administrator collected accrued penalties (`swept` topic).
    Swept,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "pool_add" => Self::PoolAdded,
            "pool_upd" => Self::PoolUpdated,
            "tier_add" => Self::TierAdded,
            "locked" => Self::Locked,
            "unlocked" => Self::Unlocked,
            "early_out" => Self::EarlyUnlocked,
            "swept" => Self::Swept,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PoolAdded => "pool_added",
            Self::PoolUpdated => "pool_updated",
            Self::TierAdded => "tier_added",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::EarlyUnlocked => "early_unlocked",
            Self::Swept => "swept",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded locker event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockerEvent {
    pub event_type: String,
    pub pool_id: Option<String>,
    /// The user (or admin, for sweeps) the event concerns.
    pub user: Option<String>,
    /// Amount moved: locked/unlocked amount, early-unlock payout, or
    /// swept penalty total, depending on the kind.
    pub amount: Option<String>,
    /// Forfeited amount; only set for early unlocks.
    pub penalty: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub pool_id: Option<String>,
    pub user: Option<String>,
    pub amount: Option<String>,
    pub penalty: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
