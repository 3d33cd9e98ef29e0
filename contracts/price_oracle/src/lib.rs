#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::PriceUpdatedEvent;
use storage::{DataKey, PriceEntry};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// Publishes conversion rates for oracle-priced payment currencies.
#[contract]
pub struct PriceOracle;

#[contractimpl]
impl PriceOracle {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);

        Ok(())
    }

    /// Publish a new rate for `currency`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidRate`: rate must be positive
    pub fn set_price(env: Env, currency: Symbol, rate: i128) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if rate <= 0 {
            return Err(Error::InvalidRate);
        }

        let timestamp = env.ledger().timestamp();
        env.storage().instance().set(
            &DataKey::Price(currency.clone()),
            &PriceEntry { rate, timestamp },
        );

        env.events().publish(
            (Symbol::new(&env, "price_updated"), currency.clone()),
            PriceUpdatedEvent {
                currency,
                rate,
                timestamp,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Current rate for `currency`, if one was ever published
    pub fn current_price(env: Env, currency: Symbol) -> Option<i128> {
        env.storage()
            .instance()
            .get::<DataKey, PriceEntry>(&DataKey::Price(currency))
            .map(|entry| entry.rate)
    }

    /// Timestamp of the last update for `currency`
    pub fn last_updated(env: Env, currency: Symbol) -> Option<u64> {
        env.storage()
            .instance()
            .get::<DataKey, PriceEntry>(&DataKey::Price(currency))
            .map(|entry| entry.timestamp)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{
        symbol_short,
        testutils::{Address as _, Ledger},
        Address, Env,
    };

    const SCALE: i128 = 10_000_000;

    #[test]
    fn test_price_roundtrip() {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|li| li.timestamp = 5_000);

        let contract_id = env.register(PriceOracle, ());
        let client = PriceOracleClient::new(&env, &contract_id);
        client.initialize(&Address::generate(&env));

        assert_eq!(client.current_price(&symbol_short!("HYDRO")), None);

        client.set_price(&symbol_short!("HYDRO"), &(2 * SCALE));
        assert_eq!(client.current_price(&symbol_short!("HYDRO")), Some(2 * SCALE));
        assert_eq!(client.last_updated(&symbol_short!("HYDRO")), Some(5_000));
        assert_eq!(client.current_price(&symbol_short!("ETH")), None);
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(PriceOracle, ());
        let client = PriceOracleClient::new(&env, &contract_id);
        client.initialize(&Address::generate(&env));

        let result = client.try_set_price(&symbol_short!("ETH"), &0);
        assert_eq!(result, Err(Ok(Error::InvalidRate)));
    }
}
