extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::invariants;
use crate::{Error, LockerProtocol, LockerProtocolClient};

const DAY: u64 = 86_400;

fn setup() -> (Env, LockerProtocolClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(LockerProtocol, ());
    let client = LockerProtocolClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.init(&admin);
    (env, client, admin)
}

/// Add a pool with the usual 7-day window, 15-day unlock, 15% penalty.
fn add_default_pool(env: &Env, client: &LockerProtocolClient, asset: &Address) -> u64 {
    let now = env.ledger().timestamp();
    client.add_pool(asset, &now, &(now + 7 * DAY), &(now + 15 * DAY), &1_500)
}

#[test]
fn add_pool_assigns_sequential_ids() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);

    assert_eq!(client.pool_length(), 0);

    let first = add_default_pool(&env, &client, &asset);
    let second = add_default_pool(&env, &client, &asset);
    let third = add_default_pool(&env, &client, &asset);

    assert_eq!(first, 0);
    assert_eq!(second, 1);
    assert_eq!(third, 2);
    assert_eq!(client.pool_length(), 3);

    let pools = [
        client.get_pool(&0),
        client.get_pool(&1),
        client.get_pool(&2),
    ];
    invariants::assert_sequential_ids(&pools);
}

#[test]
fn add_pool_stores_all_fields() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    let id = client.add_pool(&asset, &now, &(now + 7 * DAY), &(now + 15 * DAY), &1_500);

    let pool = client.get_pool(&id);
    assert_eq!(pool.id, id);
    assert_eq!(pool.asset, asset);
    assert_eq!(pool.start_time, now);
    assert_eq!(pool.end_time, now + 7 * DAY);
    assert_eq!(pool.unlock_time, now + 15 * DAY);
    assert_eq!(pool.early_unlock_penalty_bps, 1_500);
    assert_eq!(pool.pending_penalty, 0);
    invariants::assert_penalty_capped(&pool);
    invariants::assert_pending_penalty_non_negative(&pool);
}

#[test]
fn add_pool_with_past_unlock_fails() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    // An unlock timestamp in the past is rejected outright.
    let res = client.try_add_pool(&asset, &now, &(now + 7 * DAY), &now.saturating_sub(DAY), &1_500);
    assert_eq!(res, Err(Ok(Error::InvalidTimestamp)));
}

#[test]
fn add_pool_with_unlock_at_now_fails() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    // "Strictly in the future": unlock_time == now is rejected too.
    let res = client.try_add_pool(&asset, &now, &(now + 7 * DAY), &now, &1_500);
    assert_eq!(res, Err(Ok(Error::InvalidTimestamp)));
}

#[test]
fn add_pool_with_high_penalty_fails() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    let res = client.try_add_pool(&asset, &now, &(now + 7 * DAY), &(now + 15 * DAY), &6_000);
    assert_eq!(res, Err(Ok(Error::PenaltyTooHigh)));
}

#[test]
fn add_pool_at_penalty_cap_succeeds() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    let id = client.add_pool(&asset, &now, &(now + 7 * DAY), &(now + 15 * DAY), &5_000);
    assert_eq!(client.get_pool(&id).early_unlock_penalty_bps, 5_000);
}

#[test]
fn add_pool_accepts_inverted_window() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    // No ordering is enforced between start and end; the window is stored
    // as supplied and nothing acts on it.
    let id = client.add_pool(&asset, &(now + 7 * DAY), &now, &(now + 15 * DAY), &1_500);
    let pool = client.get_pool(&id);
    assert_eq!(pool.start_time, now + 7 * DAY);
    assert_eq!(pool.end_time, now);
}

#[test]
fn update_pool_overwrites_schedule() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    let id = add_default_pool(&env, &client, &asset);
    let before = client.get_pool(&id);
    assert_eq!(before.early_unlock_penalty_bps, 1_500);

    client.update_pool(
        &id,
        &(now + DAY),
        &(now + 10 * DAY),
        &(now + 30 * DAY),
        &2_500,
    );

    let after = client.get_pool(&id);
    assert_eq!(after.start_time, now + DAY);
    assert_eq!(after.end_time, now + 10 * DAY);
    assert_eq!(after.unlock_time, now + 30 * DAY);
    assert_eq!(after.early_unlock_penalty_bps, 2_500);
    invariants::assert_update_preserves(&before, &after);
}

#[test]
fn update_pool_validates_like_add() {
    let (env, client, _) = setup();
    let asset = Address::generate(&env);
    let now = env.ledger().timestamp();

    let id = add_default_pool(&env, &client, &asset);

    let res = client.try_update_pool(&id, &now, &(now + 7 * DAY), &now, &1_500);
    assert_eq!(res, Err(Ok(Error::InvalidTimestamp)));

    let res = client.try_update_pool(&id, &now, &(now + 7 * DAY), &(now + 15 * DAY), &5_001);
    assert_eq!(res, Err(Ok(Error::PenaltyTooHigh)));

    // The failed updates left the pool untouched.
    assert_eq!(client.get_pool(&id).early_unlock_penalty_bps, 1_500);
}

#[test]
fn update_unknown_pool_fails() {
    let (env, client, _) = setup();
    let now = env.ledger().timestamp();

    let res = client.try_update_pool(&7, &now, &(now + 7 * DAY), &(now + 15 * DAY), &1_500);
    assert_eq!(res, Err(Ok(Error::PoolNotFound)));
}

#[test]
fn get_unknown_pool_fails() {
    let (_, client, _) = setup();
    assert_eq!(client.try_get_pool(&0), Err(Ok(Error::PoolNotFound)));
}

#[test]
fn init_twice_fails() {
    let (env, client, admin) = setup();
    assert_eq!(client.get_admin(), admin);

    let other = Address::generate(&env);
    assert_eq!(client.try_init(&other), Err(Ok(Error::AlreadyInitialized)));
    assert_eq!(client.get_admin(), admin);
}
