//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! locker:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key         | Type      | Description                       |
//! |-------------|-----------|-----------------------------------|
//! | `PoolCount` | `u64`     | Auto-increment pool ID counter    |
//! | `Admin`     | `Address` | Administrator receiving sweeps    |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type            | Description                       |
//! |----------------------|-----------------|-----------------------------------|
//! | `PoolConfig(id)`     | `PoolConfig`    | Immutable pool configuration      |
//! | `PoolSchedule(id)`   | `PoolSchedule`  | Lock window and penalty rate      |
//! | `PoolState(id)`      | `PoolState`     | Accrued penalty balance           |
//! | `PoolTiers(id)`      | `Vec<TierBand>` | Tier bands in insertion order     |
//! | `Locked(id, user)`   | `i128`          | A user's locked balance           |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! ## Why split the pool record?
//!
//! Early unlocks write `pending_penalty` on every call. Writing the full
//! pool record each time is wasteful; `PoolState` is a single `i128`.
//! See [`crate::types`] for the full rationale.
//!
//! ## Absent balances are zero
//!
//! `Locked(id, user)` entries are created lazily on first lock and zeroed
//! (not deleted) on withdrawal. A missing entry reads as balance 0, so no
//! per-user registration step exists.

use soroban_sdk::{contracttype, vec, Address, Env, Vec};

use crate::types::{Pool, PoolConfig, PoolSchedule, PoolState, TierBand};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys (`PoolCount`, `Admin`) live as long as the contract
/// and are extended together. Persistent-tier keys hold per-pool and
/// per-user data with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Global auto-increment counter for pool IDs (Instance).
    PoolCount,
    /// Administrator address set once at init (Instance).
    Admin,
    /// Immutable pool configuration keyed by ID (Persistent).
    PoolConfig(u64),
    /// Lock window and penalty rate keyed by ID (Persistent).
    PoolSchedule(u64),
    /// Accrued penalty balance keyed by ID (Persistent).
    PoolState(u64),
    /// Tier bands keyed by ID (Persistent).
    PoolTiers(u64),
    /// A user's locked balance keyed by (pool ID, user) (Persistent).
    Locked(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Number of pools created so far.
pub fn get_pool_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

/// Atomically reads, increments, and stores the pool counter.
/// Returns the ID to use for the *current* pool (pre-increment value).
pub fn get_and_increment_pool_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::PoolCount, &(current + 1));
    current
}

/// Store the administrator address in instance storage.
pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// True once `init` has run.
pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

/// Retrieve the administrator address.
/// Panics if `init` has not been called.
pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("admin not set")
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// True if a pool with this ID exists.
pub fn pool_exists(env: &Env, id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::PoolConfig(id))
}

/// Save config, schedule, and initial state for a new pool.
pub fn save_new_pool(env: &Env, config: &PoolConfig, schedule: &PoolSchedule) {
    let config_key = DataKey::PoolConfig(config.id);
    let schedule_key = DataKey::PoolSchedule(config.id);
    let state_key = DataKey::PoolState(config.id);

    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&schedule_key, schedule);
    env.storage().persistent().set(
        &state_key,
        &PoolState {
            pending_penalty: 0,
        },
    );
    bump_persistent(env, &config_key);
    bump_persistent(env, &schedule_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Pool` by combining config, schedule, and state.
/// Panics if the pool does not exist.
pub fn load_pool(env: &Env, id: u64) -> Pool {
    let config = load_pool_config(env, id);
    let schedule = load_pool_schedule(env, id);
    let state = load_pool_state(env, id);
    Pool {
        id: config.id,
        asset: config.asset,
        start_time: schedule.start_time,
        end_time: schedule.end_time,
        unlock_time: schedule.unlock_time,
        early_unlock_penalty_bps: schedule.early_unlock_penalty_bps,
        pending_penalty: state.pending_penalty,
    }
}

/// Load only the immutable pool configuration.
pub fn load_pool_config(env: &Env, id: u64) -> PoolConfig {
    let key = DataKey::PoolConfig(id);
    let config: PoolConfig = env
        .storage()
        .persistent()
        .get(&key)
        .expect("pool not found");
    bump_persistent(env, &key);
    config
}

/// Load only the lock window and penalty rate.
pub fn load_pool_schedule(env: &Env, id: u64) -> PoolSchedule {
    let key = DataKey::PoolSchedule(id);
    let schedule: PoolSchedule = env
        .storage()
        .persistent()
        .get(&key)
        .expect("pool not found");
    bump_persistent(env, &key);
    schedule
}

/// Overwrite the lock window and penalty rate (used by `update_pool`).
pub fn save_pool_schedule(env: &Env, id: u64, schedule: &PoolSchedule) {
    let key = DataKey::PoolSchedule(id);
    env.storage().persistent().set(&key, schedule);
    bump_persistent(env, &key);
}

/// Load only the accrued penalty balance.
pub fn load_pool_state(env: &Env, id: u64) -> PoolState {
    let key = DataKey::PoolState(id);
    let state: PoolState = env
        .storage()
        .persistent()
        .get(&key)
        .expect("pool not found");
    bump_persistent(env, &key);
    state
}

/// Save only the accrued penalty balance (optimized for early unlocks).
pub fn save_pool_state(env: &Env, id: u64, state: &PoolState) {
    let key = DataKey::PoolState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load a pool's tier bands in insertion order. Empty until `add_tier`
/// is first called.
pub fn load_tiers(env: &Env, id: u64) -> Vec<TierBand> {
    let key = DataKey::PoolTiers(id);
    match env.storage().persistent().get(&key) {
        Some(tiers) => {
            bump_persistent(env, &key);
            tiers
        }
        None => vec![env],
    }
}

/// Append a tier band to a pool's list.
pub fn push_tier(env: &Env, id: u64, band: &TierBand) {
    let key = DataKey::PoolTiers(id);
    let mut tiers = load_tiers(env, id);
    tiers.push_back(band.clone());
    env.storage().persistent().set(&key, &tiers);
    bump_persistent(env, &key);
}

/// A user's locked balance in a pool. Absent entries read as zero.
pub fn get_locked(env: &Env, id: u64, user: &Address) -> i128 {
    let key = DataKey::Locked(id, user.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Store a user's locked balance. Balances are zeroed in place on
/// withdrawal rather than deleted.
pub fn set_locked(env: &Env, id: u64, user: &Address, amount: i128) {
    let key = DataKey::Locked(id, user.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
