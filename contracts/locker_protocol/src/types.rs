//! # Types
//!
//! Shared data structures used across all modules of the locker contract.
//!
//! ## Design decisions
//!
//! ### Config / Schedule / State split
//!
//! A `Pool` is internally stored as three separate ledger entries:
//!
//! - [`PoolConfig`] — written once at creation; never mutated. Holds the
//!   asset binding, which must not change after deposits exist.
//! - [`PoolSchedule`] — the lock window and penalty rate; overwritten as a
//!   unit by `update_pool`.
//! - [`PoolState`] — the accrued penalty balance; written on every early
//!   unlock and on sweep.
//!
//! Early unlocks are the high-frequency write path, and they only need to
//! touch the ~16-byte [`PoolState`] entry instead of the full pool record.
//! The public API exposes the reconstructed [`Pool`] struct for convenience.

use soroban_sdk::{contracttype, Address};

/// Immutable pool configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub id: u64,
    /// The fungible asset this pool locks. Changing it after deposits
    /// exist would corrupt accounting, so there is no setter.
    pub asset: Address,
}

/// The lock window and penalty rate. Overwritten as a unit by `update_pool`.
///
/// `start_time`/`end_time` describe the intended deposit window but are not
/// enforced at lock time; `unlock_time` is the only gate the contract acts on.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSchedule {
    pub start_time: u64,
    pub end_time: u64,
    /// Ledger timestamp at or after which penalty-free withdrawal opens.
    pub unlock_time: u64,
    /// Early-unlock forfeiture rate in basis points, capped at 5000 (50%).
    pub early_unlock_penalty_bps: u32,
}

/// Mutable pool state, updated on early unlocks and sweeps.
///
/// Kept small so that frequent writes are cheap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Penalty amounts forfeited by early unlockers, retained by the pool
    /// until the administrator sweeps them.
    pub pending_penalty: i128,
}

/// One tier band: a locked balance of at least `threshold` qualifies for
/// `value`, unless a higher qualifying band exists.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierBand {
    pub threshold: i128,
    pub value: u32,
}

/// Full representation of a lock pool.
///
/// Used as the public API return type; reconstructed internally from the
/// split `PoolConfig` + `PoolSchedule` + `PoolState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Unique identifier (auto-incremented, never reused).
    pub id: u64,
    /// Address of the token this pool locks.
    pub asset: Address,
    /// Intended start of the deposit window.
    pub start_time: u64,
    /// Intended end of the deposit window.
    pub end_time: u64,
    /// Timestamp at or after which penalty-free withdrawal opens.
    pub unlock_time: u64,
    /// Early-unlock forfeiture rate in basis points.
    pub early_unlock_penalty_bps: u32,
    /// Accrued, not-yet-swept penalty balance.
    pub pending_penalty: i128,
}
