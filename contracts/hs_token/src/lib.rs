#![no_std]

mod dividends;
mod error;
mod events;
mod identity;
mod ledger;
mod lifecycle;
mod periods;
mod pricing;
mod storage;
mod subscription;
mod validation;

pub use error::Error;
pub use storage::{
    Currency, Investor, MainParams, RaisedFunds, ResolverKind, Stage, StoFlags, StoParams,
    TokenMetadata, Verdict, SCALE,
};

use dividends::Dividends;
use events::{ListUpdatedEvent, OracleUpdatedEvent, ResolverUpdatedEvent};
use identity::IdentityGate;
use ledger::Ledger;
use lifecycle::Lifecycle;
use periods::Periods;
use storage::{DataKey, Storage};
use subscription::Subscription;
use validation::Validator;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

/// Compliance-gated security token offering with per-period dividends.
#[contract]
pub struct HSToken;

#[contractimpl]
impl HSToken {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the offering in `Setup`
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        owner: Address,
        identity_registry: Address,
        hydro_token: Address,
        eth_token: Address,
        metadata: TokenMetadata,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage()
            .instance()
            .set(&DataKey::IdentityRegistry, &identity_registry);
        env.storage().instance().set(&DataKey::HydroToken, &hydro_token);
        env.storage().instance().set(&DataKey::EthToken, &eth_token);
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage().instance().set(&DataKey::Stage, &Stage::Setup);
        Storage::bump_instance(&env);

        Ok(())
    }

    /// Set offering economics
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongStage`: only in `Setup`
    /// - `InvalidParameters`: calendar unordered, non-positive price or supply
    pub fn set_main_params(env: Env, params: MainParams) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Lifecycle::require_stage(&env, &[Stage::Setup])?;

        Validator::validate_main_params(&params)?;

        env.storage().instance().set(&DataKey::MainParams, &params);
        Storage::bump_instance(&env);
        Ok(())
    }

    /// Set feature switches. Already stored subscription parameters must
    /// still satisfy the new flags.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongStage`: only in `Setup`
    /// - `InvalidParameters`: stored parameters violate the new flags
    pub fn set_sto_flags(env: Env, flags: StoFlags) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Lifecycle::require_stage(&env, &[Stage::Setup])?;

        if let Ok(params) = Storage::sto_params(&env) {
            Validator::validate_sto_params(&flags, &params)?;
        }

        env.storage().instance().set(&DataKey::StoFlags, &flags);
        Storage::bump_instance(&env);
        Ok(())
    }

    /// Set subscription caps and price feeds
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongStage`: only in `Setup`
    /// - `ParametersNotSet`: flags must be set first
    /// - `InvalidParameters`: an active cap is unusable
    pub fn set_sto_params(env: Env, params: StoParams) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Lifecycle::require_stage(&env, &[Stage::Setup])?;

        let flags = Storage::sto_flags(&env)?;
        Validator::validate_sto_params(&flags, &params)?;

        env.storage().instance().set(&DataKey::StoParams, &params);
        Storage::bump_instance(&env);
        Ok(())
    }

    // ============================================
    // LIFECYCLE
    // ============================================

    pub fn stage_prelaunch(env: Env) -> Result<(), Error> {
        Self::advance(&env, Stage::Prelaunch)
    }

    pub fn stage_presale(env: Env) -> Result<(), Error> {
        Self::advance(&env, Stage::Presale)
    }

    pub fn stage_sale(env: Env) -> Result<(), Error> {
        Self::advance(&env, Stage::Sale)
    }

    /// Close subscriptions. Emits `min_inv` when fewer than
    /// `min_investors` bought in.
    pub fn stage_lock(env: Env) -> Result<(), Error> {
        Self::advance(&env, Stage::Lock)
    }

    pub fn stage_market(env: Env) -> Result<(), Error> {
        Self::advance(&env, Stage::Market)
    }

    // ============================================
    // COMPLIANCE CONFIGURATION
    // ============================================

    pub fn add_kyc_resolver(env: Env, resolver: Address) -> Result<(), Error> {
        Self::add_resolver(env, ResolverKind::Kyc, resolver)
    }

    pub fn add_aml_resolver(env: Env, resolver: Address) -> Result<(), Error> {
        Self::add_resolver(env, ResolverKind::Aml, resolver)
    }

    /// Register a compliance resolver. Adding a present resolver is a no-op.
    pub fn add_resolver(env: Env, kind: ResolverKind, resolver: Address) -> Result<(), Error> {
        Self::require_owner(&env)?;

        let mut resolvers = Storage::resolvers(&env, kind);
        if resolvers.contains(&resolver) {
            return Ok(());
        }
        resolvers.push_back(resolver.clone());
        Storage::set_resolvers(&env, kind, &resolvers);
        Storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "resolver"), kind),
            ResolverUpdatedEvent {
                kind,
                resolver,
                added: true,
            },
        );

        Ok(())
    }

    pub fn remove_resolver(env: Env, kind: ResolverKind, resolver: Address) -> Result<(), Error> {
        Self::require_owner(&env)?;

        let mut resolvers = Storage::resolvers(&env, kind);
        if let Some(index) = resolvers.first_index_of(&resolver) {
            resolvers.remove(index);
            Storage::set_resolvers(&env, kind, &resolvers);

            env.events().publish(
                (Symbol::new(&env, "resolver"), kind),
                ResolverUpdatedEvent {
                    kind,
                    resolver,
                    added: false,
                },
            );
        }

        Ok(())
    }

    pub fn get_resolvers(env: Env, kind: ResolverKind) -> Vec<Address> {
        Storage::resolvers(&env, kind)
    }

    pub fn add_whitelist(env: Env, eins: Vec<u64>) -> Result<(), Error> {
        Self::update_list(&env, eins, true, true)
    }

    pub fn remove_whitelist(env: Env, eins: Vec<u64>) -> Result<(), Error> {
        Self::update_list(&env, eins, true, false)
    }

    pub fn add_blacklist(env: Env, eins: Vec<u64>) -> Result<(), Error> {
        Self::update_list(&env, eins, false, true)
    }

    pub fn remove_blacklist(env: Env, eins: Vec<u64>) -> Result<(), Error> {
        Self::update_list(&env, eins, false, false)
    }

    pub fn is_whitelisted(env: Env, ein: u64) -> bool {
        Storage::flag(&env, &DataKey::Whitelisted(ein))
    }

    pub fn is_blacklisted(env: Env, ein: u64) -> bool {
        Storage::flag(&env, &DataKey::Blacklisted(ein))
    }

    // ============================================
    // RESULTS ORACLES
    // ============================================

    pub fn add_hydro_oracle(env: Env, oracle: Address) -> Result<(), Error> {
        Self::require_owner(&env)?;

        let mut oracles = Storage::hydro_oracles(&env);
        if !oracles.contains(&oracle) {
            oracles.push_back(oracle.clone());
            Storage::set_hydro_oracles(&env, &oracles);

            env.events().publish(
                (Symbol::new(&env, "oracle"),),
                OracleUpdatedEvent {
                    oracle,
                    added: true,
                },
            );
        }

        Ok(())
    }

    pub fn remove_hydro_oracle(env: Env, oracle: Address) -> Result<(), Error> {
        Self::require_owner(&env)?;

        let mut oracles = Storage::hydro_oracles(&env);
        if let Some(index) = oracles.first_index_of(&oracle) {
            oracles.remove(index);
            Storage::set_hydro_oracles(&env, &oracles);

            env.events().publish(
                (Symbol::new(&env, "oracle"),),
                OracleUpdatedEvent {
                    oracle,
                    added: false,
                },
            );
        }

        Ok(())
    }

    pub fn is_hydro_oracle(env: Env, oracle: Address) -> bool {
        Storage::hydro_oracles(&env).contains(&oracle)
    }

    // ============================================
    // SUBSCRIPTION & ESCROW
    // ============================================

    /// Buy security tokens, returning the amount issued
    ///
    /// # Errors
    /// - `WrongStage`: only in `Presale` or `Sale`
    /// - `InvalidAmount`: amount not positive, or too small to issue a token unit
    /// - `UnknownIdentity`: buyer has no identity
    /// - `ComplianceRejected`: a required compliance check failed
    /// - `CurrencyNotAccepted`: currency switched off
    /// - `PriceUnavailable`: oracle has no usable price
    /// - `SubscriptionCapExceeded`: percentage, amount, investor or supply cap
    pub fn buy_tokens(
        env: Env,
        buyer: Address,
        amount: i128,
        currency: Currency,
    ) -> Result<i128, Error> {
        Storage::bump_instance(&env);
        Subscription::buy_tokens(&env, &buyer, amount, currency)
    }

    /// Release escrowed raised funds to the owner
    pub fn withdraw_raised(env: Env, currency: Currency, amount: i128) -> Result<(), Error> {
        let owner = Self::require_owner(&env)?;
        Subscription::withdraw_raised(&env, &owner, currency, amount)
    }

    pub fn get_raised(env: Env, currency: Currency) -> RaisedFunds {
        Storage::raised(&env, currency)
    }

    // ============================================
    // TOKEN LEDGER
    // ============================================

    /// Compliance-gated holder transfer, legal only in `Market`
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        Storage::bump_instance(&env);
        Ledger::transfer(&env, &from, &to, amount)
    }

    /// Balance of the identity behind `holder`, 0 when it has none
    pub fn balance_of(env: Env, holder: Address) -> Result<i128, Error> {
        Ok(IdentityGate::lookup(&env, &holder)?
            .map(|ein| Ledger::balance_of(&env, ein))
            .unwrap_or(0))
    }

    pub fn balance_of_ein(env: Env, ein: u64) -> i128 {
        Ledger::balance_of(&env, ein)
    }

    pub fn total_supply(env: Env) -> i128 {
        Ledger::total_supply(&env)
    }

    pub fn token_metadata(env: Env) -> Result<TokenMetadata, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(Error::NotInitialized)
    }

    // ============================================
    // PERIODS & DIVIDENDS
    // ============================================

    /// Set the payment calendar (once)
    pub fn add_payment_period_boundaries(env: Env, boundaries: Vec<u64>) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Periods::set_boundaries(&env, &boundaries)
    }

    pub fn get_payment_period_boundaries(env: Env) -> Vec<u64> {
        Periods::boundaries(&env)
    }

    pub fn get_period(env: Env) -> u32 {
        Periods::current(&env)
    }

    pub fn get_now(env: Env) -> u64 {
        env.ledger().timestamp()
    }

    /// Record the result of the most recently completed period, returning
    /// the period index resolved
    pub fn notify_period_results(env: Env, oracle: Address, amount: i128) -> Result<u32, Error> {
        Storage::bump_instance(&env);
        Periods::notify(&env, &oracle, amount)
    }

    pub fn get_period_result(env: Env, period: u32) -> Option<i128> {
        Periods::result(&env, period)
    }

    pub fn get_last_resolved_period(env: Env) -> u32 {
        Periods::last_resolved(&env)
    }

    /// Pay at most one resolved period to the claimant
    pub fn claim_payment(env: Env, claimant: Address) -> Result<i128, Error> {
        Storage::bump_instance(&env);
        Dividends::claim(&env, &claimant)
    }

    /// Deposit payout currency into the dividend reserve
    pub fn fund_reserves(env: Env, amount: i128) -> Result<i128, Error> {
        let owner = Self::require_owner(&env)?;
        Dividends::fund_reserves(&env, &owner, amount)
    }

    pub fn get_reserves(env: Env) -> i128 {
        Storage::reserves(&env)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_investor(env: Env, ein: u64) -> Option<Investor> {
        Storage::investor(&env, ein)
    }

    pub fn investor_count(env: Env) -> u32 {
        Storage::investor_count(&env)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Storage::owner(&env)
    }

    pub fn get_stage(env: Env) -> Stage {
        Lifecycle::current(&env)
    }

    pub fn get_main_params(env: Env) -> Result<MainParams, Error> {
        Storage::main_params(&env)
    }

    pub fn get_sto_flags(env: Env) -> Result<StoFlags, Error> {
        Storage::sto_flags(&env)
    }

    pub fn get_sto_params(env: Env) -> Result<StoParams, Error> {
        Storage::sto_params(&env)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_owner(env: &Env) -> Result<Address, Error> {
        let owner = Storage::owner(env)?;
        owner.require_auth();
        Storage::bump_instance(env);
        Ok(owner)
    }

    fn advance(env: &Env, to: Stage) -> Result<(), Error> {
        Self::require_owner(env)?;
        Lifecycle::advance(env, to)
    }

    fn update_list(env: &Env, eins: Vec<u64>, whitelist: bool, listed: bool) -> Result<(), Error> {
        Self::require_owner(env)?;

        let name = if whitelist { "whitelist" } else { "blacklist" };
        for ein in eins.iter() {
            let key = if whitelist {
                DataKey::Whitelisted(ein)
            } else {
                DataKey::Blacklisted(ein)
            };
            Storage::set_flag(env, &key, listed);

            env.events().publish(
                (Symbol::new(env, name), ein),
                ListUpdatedEvent { ein, listed },
            );
        }

        Ok(())
    }
}
