use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

use crate::error::Error;

// Constants
pub const SCALE: i128 = 10_000_000; // 7 decimals, also 1.0 == 100% for rates

pub const LEDGERS_PER_DAY: u32 = 17_280;
pub const INSTANCE_BUMP_THRESHOLD: u32 = 7 * LEDGERS_PER_DAY;
pub const INSTANCE_BUMP_AMOUNT: u32 = 30 * LEDGERS_PER_DAY;
pub const PERSISTENT_BUMP_THRESHOLD: u32 = 14 * LEDGERS_PER_DAY;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 60 * LEDGERS_PER_DAY;

/// Offering lifecycle. Transitions only move forward, one step at a time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Stage {
    /// Owner configures parameters and flags
    Setup = 0,
    /// Parameters frozen, resolvers being wired up
    Prelaunch = 1,
    /// Early subscriptions open
    Presale = 2,
    /// Main subscription window
    Sale = 3,
    /// Subscriptions closed, distributions start
    Lock = 4,
    /// Free (compliance-gated) trading
    Market = 5,
}

/// Accepted payment currencies
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Currency {
    Hydro = 0,
    Eth = 1,
}

impl Currency {
    /// Tag the price oracle publishes rates under
    pub fn tag(&self) -> Symbol {
        match self {
            Currency::Hydro => symbol_short!("HYDRO"),
            Currency::Eth => symbol_short!("ETH"),
        }
    }
}

/// Kinds of external compliance resolvers
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolverKind {
    Kyc = 0,
    Aml = 1,
    Whitelist = 2,
    Blacklist = 3,
}

/// Answer of a compliance resolver, u32-encoded on the wire
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Approved = 0,
    Rejected = 1,
    Listed = 2,
    NotListed = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// Offering economics, frozen once the offering leaves `Setup`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MainParams {
    /// Security tokens issued per whole Hydro unit (fixed price)
    pub hydro_price: i128,
    /// Security tokens issued per whole Eth unit (fixed price)
    pub eth_price: i128,
    pub beginning_date: u64,
    pub lock_ends: u64,
    pub end_date: u64,
    /// Upper bound on total issued supply
    pub max_supply: i128,
    /// Raised funds may be withdrawn from this timestamp on
    pub escrow_limit_period: u64,
}

/// Feature switches selecting which caps, currencies and checks are active
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoFlags {
    pub limited_ownership: bool,
    pub period_locked: bool,
    pub perc_ownership_type: bool,
    pub hydro_amount_type: bool,
    pub eth_amount_type: bool,
    pub hydro_allowed: bool,
    pub eth_allowed: bool,
    pub kyc_restricted: bool,
    pub aml_restricted: bool,
    pub whitelist_restricted: bool,
    pub blacklist_restricted: bool,
    pub eth_oracle: bool,
    pub hydro_oracle: bool,
}

/// Subscription caps and price feeds
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoParams {
    /// Max share of `max_supply` a single investor may buy (SCALE == 100%)
    pub perc_allowed_tokens: i128,
    /// Max cumulative Hydro payment per investor
    pub hydro_allowed: i128,
    /// Max cumulative Eth payment per investor
    pub eth_allowed: i128,
    /// Seconds an investor's tokens stay locked after a purchase
    pub lock_period: u64,
    pub min_investors: u32,
    pub max_investors: u32,
    pub eth_oracle: Option<Address>,
    pub hydro_oracle: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Investor {
    pub ein: u64,
    /// Cumulative security tokens bought
    pub purchased_tokens: i128,
    /// Cumulative Hydro paid
    pub hydro_paid: i128,
    /// Cumulative Eth paid
    pub eth_paid: i128,
    /// Highest period index already paid out (paid-through cursor)
    pub last_period_paid: u32,
    /// Timestamp of the most recent purchase
    pub last_purchase: u64,
    /// Cumulative dividends received
    pub total_dividends: i128,
}

/// Escrow accounting for one payment currency
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RaisedFunds {
    pub raised: i128,
    pub withdrawn: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // instance
    Initialized,
    Owner,
    IdentityRegistry,
    HydroToken,
    EthToken,
    Metadata,
    Stage,
    MainParams,
    StoFlags,
    StoParams,
    Resolvers(ResolverKind),
    HydroOracles,
    InvestorCount,
    TotalSupply,
    Raised(Currency),
    Reserves,
    LastResolvedPeriod,
    // persistent
    Boundaries,          // Vec<u64>
    Balance(u64),        // ein -> i128
    Investor(u64),       // ein -> Investor
    Whitelisted(u64),    // ein -> bool
    Blacklisted(u64),    // ein -> bool
    PeriodResult(u32),   // period -> i128
}

pub struct Storage;

impl Storage {
    pub fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_BUMP_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn bump_persistent(env: &Env, key: &DataKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_BUMP_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }

    /// Owner address; the caller is expected to `require_auth` it
    pub fn owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn address(env: &Env, key: &DataKey) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(Error::NotInitialized)
    }

    /// Token contract settling payments in `currency`
    pub fn payment_token(env: &Env, currency: Currency) -> Result<Address, Error> {
        let key = match currency {
            Currency::Hydro => DataKey::HydroToken,
            Currency::Eth => DataKey::EthToken,
        };
        Self::address(env, &key)
    }

    pub fn main_params(env: &Env) -> Result<MainParams, Error> {
        env.storage()
            .instance()
            .get(&DataKey::MainParams)
            .ok_or(Error::ParametersNotSet)
    }

    pub fn sto_flags(env: &Env) -> Result<StoFlags, Error> {
        env.storage()
            .instance()
            .get(&DataKey::StoFlags)
            .ok_or(Error::ParametersNotSet)
    }

    pub fn sto_params(env: &Env) -> Result<StoParams, Error> {
        env.storage()
            .instance()
            .get(&DataKey::StoParams)
            .ok_or(Error::ParametersNotSet)
    }

    pub fn resolvers(env: &Env, kind: ResolverKind) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::Resolvers(kind))
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn set_resolvers(env: &Env, kind: ResolverKind, resolvers: &Vec<Address>) {
        env.storage()
            .instance()
            .set(&DataKey::Resolvers(kind), resolvers);
    }

    pub fn hydro_oracles(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::HydroOracles)
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn set_hydro_oracles(env: &Env, oracles: &Vec<Address>) {
        env.storage().instance().set(&DataKey::HydroOracles, oracles);
    }

    pub fn investor(env: &Env, ein: u64) -> Option<Investor> {
        let key = DataKey::Investor(ein);
        let investor = env.storage().persistent().get::<DataKey, Investor>(&key);
        if investor.is_some() {
            Self::bump_persistent(env, &key);
        }
        investor
    }

    pub fn set_investor(env: &Env, investor: &Investor) {
        let key = DataKey::Investor(investor.ein);
        env.storage().persistent().set(&key, investor);
        Self::bump_persistent(env, &key);
    }

    pub fn investor_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::InvestorCount)
            .unwrap_or(0)
    }

    pub fn set_investor_count(env: &Env, count: u32) {
        env.storage().instance().set(&DataKey::InvestorCount, &count);
    }

    pub fn flag(env: &Env, key: &DataKey) -> bool {
        env.storage()
            .persistent()
            .get::<DataKey, bool>(key)
            .unwrap_or(false)
    }

    pub fn set_flag(env: &Env, key: &DataKey, value: bool) {
        if value {
            env.storage().persistent().set(key, &true);
            Self::bump_persistent(env, key);
        } else {
            env.storage().persistent().remove(key);
        }
    }

    pub fn raised(env: &Env, currency: Currency) -> RaisedFunds {
        env.storage()
            .instance()
            .get(&DataKey::Raised(currency))
            .unwrap_or_default()
    }

    pub fn set_raised(env: &Env, currency: Currency, funds: &RaisedFunds) {
        env.storage()
            .instance()
            .set(&DataKey::Raised(currency), funds);
    }

    pub fn reserves(env: &Env) -> i128 {
        env.storage().instance().get(&DataKey::Reserves).unwrap_or(0)
    }

    pub fn set_reserves(env: &Env, reserves: i128) {
        env.storage().instance().set(&DataKey::Reserves, &reserves);
    }
}
