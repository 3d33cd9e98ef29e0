use compliance_resolver::{ComplianceResolver, ComplianceResolverClient, ResolverMode};
use hs_token::{
    Currency, Error, HSToken, HSTokenClient, MainParams, Stage, StoFlags, StoParams,
    TokenMetadata, SCALE,
};
use identity_registry::{IdentityRegistry, IdentityRegistryClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env, String,
};

const START: u64 = 10_000;
const PERIOD: u64 = 200;

#[test]
fn test_full_offering_lifecycle() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = START);

    let owner = Address::generate(&env);
    let oracle = Address::generate(&env);
    let investor = Address::generate(&env);

    // Collaborators
    let registry_id = env.register(IdentityRegistry, ());
    let registry = IdentityRegistryClient::new(&env, &registry_id);
    registry.initialize(&owner);

    let kyc_id = env.register(ComplianceResolver, ());
    let kyc = ComplianceResolverClient::new(&env, &kyc_id);
    kyc.initialize(&owner, &ResolverMode::Attestation);

    let hydro = env
        .register_stellar_asset_contract_v2(owner.clone())
        .address();
    let eth = env
        .register_stellar_asset_contract_v2(owner.clone())
        .address();
    let hydro_admin = token::StellarAssetClient::new(&env, &hydro);
    let hydro_token = token::Client::new(&env, &hydro);
    hydro_admin.mint(&investor, &(1_000 * SCALE));
    hydro_admin.mint(&owner, &(1_000 * SCALE));

    let ein = registry.create_identity(&investor);
    kyc.approve_ein(&ein);

    // Setup
    let contract_id = env.register(HSToken, ());
    let sto = HSTokenClient::new(&env, &contract_id);
    sto.initialize(
        &owner,
        &registry_id,
        &hydro,
        &eth,
        &TokenMetadata {
            name: String::from_str(&env, "Hydro Security"),
            symbol: String::from_str(&env, "HSEC"),
            decimals: 7,
        },
    );

    sto.set_main_params(&MainParams {
        hydro_price: 2 * SCALE,
        eth_price: 1_000 * SCALE,
        beginning_date: START,
        lock_ends: START + 1_000,
        end_date: START + 5_000,
        max_supply: 10_000 * SCALE,
        escrow_limit_period: START + 500,
    });
    sto.set_sto_flags(&StoFlags {
        limited_ownership: true,
        period_locked: false,
        perc_ownership_type: false,
        hydro_amount_type: true,
        eth_amount_type: false,
        hydro_allowed: true,
        eth_allowed: false,
        kyc_restricted: true,
        aml_restricted: false,
        whitelist_restricted: false,
        blacklist_restricted: false,
        eth_oracle: false,
        hydro_oracle: false,
    });
    sto.set_sto_params(&StoParams {
        perc_allowed_tokens: 0,
        hydro_allowed: 500 * SCALE,
        eth_allowed: 0,
        lock_period: 0,
        min_investors: 1,
        max_investors: 5,
        eth_oracle: None,
        hydro_oracle: None,
    });
    sto.add_kyc_resolver(&kyc_id);
    sto.add_hydro_oracle(&oracle);

    // Subscription
    sto.stage_prelaunch();
    sto.stage_presale();
    sto.stage_sale();

    let result = sto.try_buy_tokens(&investor, &(600 * SCALE), &Currency::Hydro);
    assert_eq!(result, Err(Ok(Error::SubscriptionCapExceeded)));

    let issued = sto.buy_tokens(&investor, &(100 * SCALE), &Currency::Hydro);
    assert_eq!(issued, 200 * SCALE);
    assert_eq!(sto.balance_of(&investor), 200 * SCALE);
    assert_eq!(hydro_token.balance(&investor), 900 * SCALE);

    // Distribution
    sto.stage_lock();
    assert_eq!(sto.get_stage(), Stage::Lock);

    let boundaries = vec![
        &env,
        START + PERIOD,
        START + 2 * PERIOD,
        START + 3 * PERIOD,
        START + 4 * PERIOD,
    ];
    sto.add_payment_period_boundaries(&boundaries);
    sto.fund_reserves(&(100 * SCALE));

    // period 1 has ended, the oracle reports it
    env.ledger().with_mut(|li| li.timestamp = START + 2 * PERIOD);
    assert_eq!(sto.get_period(), 2);
    assert_eq!(sto.notify_period_results(&oracle, &5), 1);

    // sole holder takes the whole result, once
    assert_eq!(sto.claim_payment(&investor), 5);
    assert_eq!(sto.claim_payment(&investor), 0);

    // two more periods, one report each
    env.ledger().with_mut(|li| li.timestamp = START + 3 * PERIOD);
    sto.notify_period_results(&oracle, &7);
    env.ledger().with_mut(|li| li.timestamp = START + 4 * PERIOD);
    sto.notify_period_results(&oracle, &11);

    assert_eq!(sto.claim_payment(&investor), 7);
    assert_eq!(sto.claim_payment(&investor), 11);
    assert_eq!(sto.claim_payment(&investor), 0);

    let record = sto.get_investor(&ein).unwrap();
    assert_eq!(record.last_period_paid, 3);
    assert_eq!(record.total_dividends, 23);
    assert_eq!(sto.get_reserves(), 100 * SCALE - 23);

    // Escrow release and secondary market
    sto.withdraw_raised(&Currency::Hydro, &(100 * SCALE));
    assert_eq!(hydro_token.balance(&owner), 1_000 * SCALE);

    sto.stage_market();
    let buyer = Address::generate(&env);
    let buyer_ein = registry.create_identity(&buyer);

    let result = sto.try_transfer(&investor, &buyer, &(50 * SCALE));
    assert_eq!(result, Err(Ok(Error::ComplianceRejected)));

    kyc.approve_ein(&buyer_ein);
    sto.transfer(&investor, &buyer, &(50 * SCALE));
    assert_eq!(sto.balance_of(&buyer), 50 * SCALE);
    assert_eq!(sto.balance_of(&investor), 150 * SCALE);
    assert_eq!(sto.total_supply(), 200 * SCALE);
}
