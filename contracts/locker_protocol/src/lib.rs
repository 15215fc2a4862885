//! # Locker Protocol Contract
//!
//! This is the root crate of the **time-locked token custody ledger**.
//! It exposes the single Soroban contract `LockerProtocol` whose entry
//! points cover the full pool lifecycle:
//!
//! | Phase        | Entry Point(s)                                  |
//! |--------------|-------------------------------------------------|
//! | Bootstrap    | [`LockerProtocol::init`]                        |
//! | Pool admin   | `add_pool`, `update_pool`, `add_tier`           |
//! | Deposits     | [`LockerProtocol::lock`]                        |
//! | Withdrawal   | [`LockerProtocol::unlock`], [`LockerProtocol::early_unlock`] |
//! | Settlement   | [`LockerProtocol::sweep`]                       |
//! | Queries      | `pool_length`, `get_pool`, `user_info`, `get_user_tier`, `get_admin` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`]; event payloads live in
//! [`events`]. This file contains **only** the public entry points, their
//! validation, and event emissions — no storage plumbing lives here.
//!
//! ## Accounting model
//!
//! The contract address holds custody of every locked token. The ledger
//! entries are claim accounting on top of that custody: for each pool,
//! the sum of user balances plus `pending_penalty` equals the portion of
//! the contract's token balance attributable to that pool. Withdrawals and
//! sweeps only ever pay out amounts the ledger has accounted for, so the
//! outbound transfers cannot fail for lack of funds.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env,
};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_pools;

use types::{PoolConfig, PoolSchedule, TierBand};
pub use types::Pool;

/// Early-unlock penalties are expressed in basis points of this denominator.
const BPS_DENOMINATOR: i128 = 10_000;

/// Hard cap on the early-unlock penalty: 5000 bps = 50%.
const MAX_PENALTY_BPS: u32 = 5_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    PoolNotFound        = 1,
    InvalidTimestamp    = 2,
    PenaltyTooHigh      = 3,
    TooEarly            = 4,
    InsufficientBalance = 5,
    TransferFailed      = 6,
    Unauthorized        = 7,
    AlreadyInitialized  = 8,
    InvalidAmount       = 9,
}

#[contract]
pub struct LockerProtocol;

/// Shared validation for `add_pool` / `update_pool`.
///
/// The start/end window is stored as-is: callers may construct pools where
/// `end_time < start_time`, and nothing in the contract acts on the window.
/// Only the unlock timestamp and the penalty rate are checked.
fn validate_schedule(env: &Env, unlock_time: u64, penalty_bps: u32) {
    if unlock_time <= env.ledger().timestamp() {
        panic_with_error!(env, Error::InvalidTimestamp);
    }
    if penalty_bps > MAX_PENALTY_BPS {
        panic_with_error!(env, Error::PenaltyTooHigh);
    }
}

fn require_pool(env: &Env, pool_id: u64) {
    if !storage::pool_exists(env, pool_id) {
        panic_with_error!(env, Error::PoolNotFound);
    }
}

#[contractimpl]
impl LockerProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract and set the administrator.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    ///
    /// The administrator is the sole recipient of swept penalties and the
    /// only address allowed to call [`LockerProtocol::sweep`].
    pub fn init(env: Env, admin: Address) {
        admin.require_auth();
        if storage::has_admin(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
    }

    /// Return the administrator address.
    pub fn get_admin(env: Env) -> Address {
        storage::get_admin(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Pool management
    // ─────────────────────────────────────────────────────────

    /// Create a new pool for `asset` and return its ID.
    ///
    /// IDs are assigned sequentially from 0 and never reused. The asset
    /// binding is immutable afterwards.
    ///
    /// - Panics `InvalidTimestamp` unless `unlock_time` is strictly in the
    ///   future.
    /// - Panics `PenaltyTooHigh` if `penalty_bps` exceeds 5000 (50%).
    pub fn add_pool(
        env: Env,
        asset: Address,
        start_time: u64,
        end_time: u64,
        unlock_time: u64,
        penalty_bps: u32,
    ) -> u64 {
        validate_schedule(&env, unlock_time, penalty_bps);

        let id = storage::get_and_increment_pool_id(&env);
        let config = PoolConfig {
            id,
            asset: asset.clone(),
        };
        let schedule = PoolSchedule {
            start_time,
            end_time,
            unlock_time,
            early_unlock_penalty_bps: penalty_bps,
        };
        storage::save_new_pool(&env, &config, &schedule);

        events::pool_added(
            &env,
            events::PoolAdded {
                pool_id: id,
                asset,
                unlock_time,
                penalty_bps,
            },
        );
        id
    }

    /// Overwrite an existing pool's schedule.
    ///
    /// Same validation as [`LockerProtocol::add_pool`]. The pool's asset,
    /// accrued penalties, and tier bands are untouched.
    pub fn update_pool(
        env: Env,
        pool_id: u64,
        start_time: u64,
        end_time: u64,
        unlock_time: u64,
        penalty_bps: u32,
    ) {
        require_pool(&env, pool_id);
        validate_schedule(&env, unlock_time, penalty_bps);

        let schedule = PoolSchedule {
            start_time,
            end_time,
            unlock_time,
            early_unlock_penalty_bps: penalty_bps,
        };
        storage::save_pool_schedule(&env, pool_id, &schedule);

        events::pool_updated(
            &env,
            events::PoolUpdated {
                pool_id,
                unlock_time,
                penalty_bps,
            },
        );
    }

    /// Number of pools ever created (pools are append-only).
    pub fn pool_length(env: Env) -> u64 {
        storage::get_pool_count(&env)
    }

    /// Retrieve a pool by its ID.
    pub fn get_pool(env: Env, pool_id: u64) -> Pool {
        require_pool(&env, pool_id);
        storage::load_pool(&env, pool_id)
    }

    /// Append a tier band to a pool.
    ///
    /// Bands are kept in insertion order; callers are expected to add them
    /// in ascending threshold order, starting with a zero-threshold base
    /// band. [`LockerProtocol::get_user_tier`] tolerates out-of-order
    /// input by scanning for the best match rather than stopping at the
    /// first.
    pub fn add_tier(env: Env, pool_id: u64, threshold: i128, value: u32) {
        require_pool(&env, pool_id);
        storage::push_tier(&env, pool_id, &TierBand { threshold, value });

        events::tier_added(
            &env,
            events::TierAdded {
                pool_id,
                threshold,
                value,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Deposits and withdrawals
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's asset into the caller's lock.
    ///
    /// A zero amount is accepted as a no-op deposit. Locking is permitted
    /// regardless of the pool's start/end window; the window is advisory.
    ///
    /// The token transfer runs before any ledger mutation, so a failed
    /// transfer (insufficient balance) leaves no state behind — it panics
    /// with `Error::TransferFailed`.
    pub fn lock(env: Env, pool_id: u64, user: Address, amount: i128) {
        user.require_auth();
        require_pool(&env, pool_id);
        if amount < 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let config = storage::load_pool_config(&env, pool_id);
        let client = token::Client::new(&env, &config.asset);
        if client
            .try_transfer(&user, &env.current_contract_address(), &amount)
            .is_err()
        {
            panic_with_error!(&env, Error::TransferFailed);
        }

        let locked = storage::get_locked(&env, pool_id, &user);
        storage::set_locked(&env, pool_id, &user, locked + amount);

        events::tokens_locked(
            &env,
            events::TokensLocked {
                pool_id,
                user,
                amount,
            },
        );
    }

    /// Withdraw the caller's entire balance, penalty-free.
    ///
    /// - Panics `TooEarly` before the pool's unlock timestamp.
    /// - Panics `InsufficientBalance` if the caller has nothing locked.
    pub fn unlock(env: Env, pool_id: u64, user: Address) {
        user.require_auth();
        require_pool(&env, pool_id);

        let schedule = storage::load_pool_schedule(&env, pool_id);
        if env.ledger().timestamp() < schedule.unlock_time {
            panic_with_error!(&env, Error::TooEarly);
        }

        let amount = storage::get_locked(&env, pool_id, &user);
        if amount == 0 {
            panic_with_error!(&env, Error::InsufficientBalance);
        }

        let config = storage::load_pool_config(&env, pool_id);
        let client = token::Client::new(&env, &config.asset);
        client.transfer(&env.current_contract_address(), &user, &amount);

        storage::set_locked(&env, pool_id, &user, 0);

        events::tokens_unlocked(
            &env,
            events::TokensUnlocked {
                pool_id,
                user,
                amount,
            },
        );
    }

    /// Withdraw the caller's entire balance before the unlock timestamp,
    /// forfeiting the configured penalty to the pool.
    ///
    /// `penalty = floor(amount * penalty_bps / 10000)`; the remainder is
    /// paid out. The penalty stays inside the contract, accrued on the
    /// pool until the administrator sweeps it.
    ///
    /// Remains callable after the unlock timestamp and still applies the
    /// penalty; holders wanting the full amount call `unlock` instead.
    pub fn early_unlock(env: Env, pool_id: u64, user: Address) {
        user.require_auth();
        require_pool(&env, pool_id);

        let amount = storage::get_locked(&env, pool_id, &user);
        if amount == 0 {
            panic_with_error!(&env, Error::InsufficientBalance);
        }

        let schedule = storage::load_pool_schedule(&env, pool_id);
        let penalty = amount * i128::from(schedule.early_unlock_penalty_bps) / BPS_DENOMINATOR;
        let payout = amount - penalty;

        let config = storage::load_pool_config(&env, pool_id);
        let client = token::Client::new(&env, &config.asset);
        client.transfer(&env.current_contract_address(), &user, &payout);

        storage::set_locked(&env, pool_id, &user, 0);
        let mut state = storage::load_pool_state(&env, pool_id);
        state.pending_penalty += penalty;
        storage::save_pool_state(&env, pool_id, &state);

        events::early_unlocked(
            &env,
            events::EarlyUnlocked {
                pool_id,
                user,
                payout,
                penalty,
            },
        );
    }

    /// A user's current locked balance. Unknown users read as zero.
    pub fn user_info(env: Env, pool_id: u64, user: Address) -> i128 {
        storage::get_locked(&env, pool_id, &user)
    }

    // ─────────────────────────────────────────────────────────
    // Tiers
    // ─────────────────────────────────────────────────────────

    /// Resolve a user's tier from their locked balance.
    ///
    /// The band with the **highest threshold not exceeding the balance**
    /// wins; a balance exactly on a threshold qualifies for that band.
    /// If no band qualifies (no zero-threshold base band was configured),
    /// the lowest-threshold band's value is returned. A pool with no bands
    /// resolves to 0.
    pub fn get_user_tier(env: Env, pool_id: u64, user: Address) -> u32 {
        let tiers = storage::load_tiers(&env, pool_id);
        if tiers.is_empty() {
            return 0;
        }

        let balance = storage::get_locked(&env, pool_id, &user);

        let mut lowest = tiers.get_unchecked(0);
        let mut best: Option<TierBand> = None;
        for band in tiers.iter() {
            if band.threshold < lowest.threshold {
                lowest = band.clone();
            }
            if band.threshold <= balance {
                match &best {
                    // On an exact threshold tie the last-added band wins.
                    Some(b) if band.threshold < b.threshold => {}
                    _ => best = Some(band.clone()),
                }
            }
        }

        match best {
            Some(band) => band.value,
            None => lowest.value,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Penalty settlement
    // ─────────────────────────────────────────────────────────

    /// Transfer a pool's accrued penalties to the administrator and reset
    /// the accrual to zero.
    ///
    /// Penalties are deliberately settled in two phases — accrue on early
    /// unlock, withdraw on admin request — so settlement cost does not
    /// land on exiting users and authorization stays in one place.
    ///
    /// - Panics `Unauthorized` unless `caller` is the administrator.
    /// - Idempotent: with nothing accrued it transfers zero.
    pub fn sweep(env: Env, pool_id: u64, caller: Address) {
        caller.require_auth();
        require_pool(&env, pool_id);
        if caller != storage::get_admin(&env) {
            panic_with_error!(&env, Error::Unauthorized);
        }

        let mut state = storage::load_pool_state(&env, pool_id);
        let amount = state.pending_penalty;

        let config = storage::load_pool_config(&env, pool_id);
        let client = token::Client::new(&env, &config.asset);
        client.transfer(&env.current_contract_address(), &caller, &amount);

        state.pending_penalty = 0;
        storage::save_pool_state(&env, pool_id, &state);

        events::penalty_swept(
            &env,
            events::PenaltySwept {
                pool_id,
                admin: caller,
                amount,
            },
        );
    }
}
