extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{EarlyUnlocked, PenaltySwept, PoolAdded, TokensLocked, TokensUnlocked};
use crate::{LockerProtocol, LockerProtocolClient};

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

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

#[test]
fn pool_added_event() {
    let (env, client, _) = setup();
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let now = env.ledger().timestamp();
    let unlock_time = now + 15 * DAY;

    let pool_id = client.add_pool(&token.address, &now, &(now + 7 * DAY), &unlock_time, &1_500);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("pool_add"), pool_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("pool_add").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: PoolAdded struct
    let event_data: PoolAdded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PoolAdded {
            pool_id,
            asset: token.address.clone(),
            unlock_time,
            penalty_bps: 1_500,
        }
    );
}

#[test]
fn tokens_locked_event() {
    let (env, client, _) = setup();
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let user = Address::generate(&env);
    let now = env.ledger().timestamp();

    let pool_id = client.add_pool(
        &token.address,
        &now,
        &(now + 7 * DAY),
        &(now + 15 * DAY),
        &1_500,
    );

    let token_sac = token::StellarAssetClient::new(&env, &token.address);
    token_sac.mint(&user, &1_000);

    client.lock(&pool_id, &user, &1_000);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("locked").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensLocked = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        TokensLocked {
            pool_id,
            user: user.clone(),
            amount: 1_000,
        }
    );
}

#[test]
fn unlocked_event() {
    let (env, client, _) = setup();
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let user = Address::generate(&env);
    let now = env.ledger().timestamp();

    let pool_id = client.add_pool(
        &token.address,
        &now,
        &(now + 7 * DAY),
        &(now + 15 * DAY),
        &1_500,
    );
    let token_sac = token::StellarAssetClient::new(&env, &token.address);
    token_sac.mint(&user, &400);
    client.lock(&pool_id, &user, &400);

    use soroban_sdk::testutils::Ledger;
    env.ledger().with_mut(|li| li.timestamp += 15 * DAY);
    client.unlock(&pool_id, &user);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("unlocked").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensUnlocked = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        TokensUnlocked {
            pool_id,
            user: user.clone(),
            amount: 400,
        }
    );
}

#[test]
fn early_unlocked_event_carries_the_split() {
    let (env, client, _) = setup();
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let user = Address::generate(&env);
    let now = env.ledger().timestamp();

    let pool_id = client.add_pool(
        &token.address,
        &now,
        &(now + 7 * DAY),
        &(now + 15 * DAY),
        &1_500,
    );
    let token_sac = token::StellarAssetClient::new(&env, &token.address);
    token_sac.mint(&user, &1_000);
    client.lock(&pool_id, &user, &1_000);

    client.early_unlock(&pool_id, &user);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("early_out").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: EarlyUnlocked = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        EarlyUnlocked {
            pool_id,
            user: user.clone(),
            payout: 850,
            penalty: 150,
        }
    );
}

#[test]
fn swept_event() {
    let (env, client, admin) = setup();
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let user = Address::generate(&env);
    let now = env.ledger().timestamp();

    let pool_id = client.add_pool(
        &token.address,
        &now,
        &(now + 7 * DAY),
        &(now + 15 * DAY),
        &1_500,
    );
    let token_sac = token::StellarAssetClient::new(&env, &token.address);
    token_sac.mint(&user, &1_000);
    client.lock(&pool_id, &user, &1_000);
    client.early_unlock(&pool_id, &user);

    client.sweep(&pool_id, &admin);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("swept").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PenaltySwept = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PenaltySwept {
            pool_id,
            admin: admin.clone(),
            amount: 150,
        }
    );
}
