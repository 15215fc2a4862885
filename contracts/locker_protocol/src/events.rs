//! # Events
//!
//! Typed payloads published by the locker contract, consumed off-chain by
//! the event indexer (`backend/indexer`).
//!
//! Every event is published with a short-symbol topic plus the pool ID, so
//! indexers can filter a single pool's history without decoding payloads:
//!
//! | Topic       | Payload            |
//! |-------------|--------------------|
//! | `pool_add`  | [`PoolAdded`]      |
//! | `pool_upd`  | [`PoolUpdated`]    |
//! | `tier_add`  | [`TierAdded`]      |
//! | `locked`    | [`TokensLocked`]   |
//! | `unlocked`  | [`TokensUnlocked`] |
//! | `early_out` | [`EarlyUnlocked`]  |
//! | `swept`     | [`PenaltySwept`]   |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// A new pool was created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAdded {
    pub pool_id: u64,
    pub asset: Address,
    pub unlock_time: u64,
    pub penalty_bps: u32,
}

/// A pool's schedule was overwritten.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdated {
    pub pool_id: u64,
    pub unlock_time: u64,
    pub penalty_bps: u32,
}

/// A tier band was appended to a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierAdded {
    pub pool_id: u64,
    pub threshold: i128,
    pub value: u32,
}

/// A user deposited into a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensLocked {
    pub pool_id: u64,
    pub user: Address,
    pub amount: i128,
}

/// A user withdrew their full balance penalty-free.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensUnlocked {
    pub pool_id: u64,
    pub user: Address,
    pub amount: i128,
}

/// A user exited early, forfeiting `penalty` to the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyUnlocked {
    pub pool_id: u64,
    pub user: Address,
    pub payout: i128,
    pub penalty: i128,
}

/// The administrator collected a pool's accrued penalties.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltySwept {
    pub pool_id: u64,
    pub admin: Address,
    pub amount: i128,
}

pub fn pool_added(env: &Env, event: PoolAdded) {
    env.events()
        .publish((symbol_short!("pool_add"), event.pool_id), event);
}

pub fn pool_updated(env: &Env, event: PoolUpdated) {
    env.events()
        .publish((symbol_short!("pool_upd"), event.pool_id), event);
}

pub fn tier_added(env: &Env, event: TierAdded) {
    env.events()
        .publish((symbol_short!("tier_add"), event.pool_id), event);
}

pub fn tokens_locked(env: &Env, event: TokensLocked) {
    env.events()
        .publish((symbol_short!("locked"), event.pool_id), event);
}

pub fn tokens_unlocked(env: &Env, event: TokensUnlocked) {
    env.events()
        .publish((symbol_short!("unlocked"), event.pool_id), event);
}

pub fn early_unlocked(env: &Env, event: EarlyUnlocked) {
    env.events()
        .publish((symbol_short!("early_out"), event.pool_id), event);
}

pub fn penalty_swept(env: &Env, event: PenaltySwept) {
    env.events()
        .publish((symbol_short!("swept"), event.pool_id), event);
}
