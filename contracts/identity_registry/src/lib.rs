#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{AddressAddedEvent, IdentityCreatedEvent};
use storage::{DataKey, BUMP_AMOUNT, BUMP_THRESHOLD};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// Maps wallet addresses to stable identity handles (EINs).
///
/// An identity may own several addresses; every one of them resolves to the
/// same EIN. EINs are assigned sequentially starting at 1.
#[contract]
pub struct IdentityRegistry;

#[contractimpl]
impl IdentityRegistry {
    /// Initialize the registry
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::NextEin, &1u64);

        Ok(())
    }

    /// Create a new identity owned by `address`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `IdentityExists`: Address already resolves to an identity
    pub fn create_identity(env: Env, address: Address) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        address.require_auth();

        let key = DataKey::Ein(address.clone());
        if env.storage().persistent().has(&key) {
            return Err(Error::IdentityExists);
        }

        let ein: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextEin)
            .ok_or(Error::NotInitialized)?;

        env.storage().persistent().set(&key, &ein);
        env.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
        env.storage().instance().set(&DataKey::NextEin, &(ein + 1));

        env.events().publish(
            (Symbol::new(&env, "identity_created"), ein),
            IdentityCreatedEvent { ein, address },
        );

        Ok(ein)
    }

    /// Associate `new_address` with the identity that `existing` belongs to.
    /// Both addresses must authorize.
    ///
    /// # Errors
    /// - `IdentityNotFound`: `existing` has no identity
    /// - `AddressAlreadyAssociated`: `new_address` already resolves to an identity
    pub fn add_address(env: Env, existing: Address, new_address: Address) -> Result<u64, Error> {
        existing.require_auth();
        new_address.require_auth();

        let ein = Self::resolve(env.clone(), existing).ok_or(Error::IdentityNotFound)?;

        let key = DataKey::Ein(new_address.clone());
        if env.storage().persistent().has(&key) {
            return Err(Error::AddressAlreadyAssociated);
        }

        env.storage().persistent().set(&key, &ein);
        env.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);

        env.events().publish(
            (Symbol::new(&env, "address_added"), ein),
            AddressAddedEvent {
                ein,
                address: new_address,
            },
        );

        Ok(ein)
    }

    /// Resolve an address to its EIN, if any
    pub fn resolve(env: Env, address: Address) -> Option<u64> {
        let key = DataKey::Ein(address);
        let ein = env.storage().persistent().get::<DataKey, u64>(&key);
        if ein.is_some() {
            env.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
        }
        ein
    }

    /// Number of identities created so far
    pub fn identity_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get::<DataKey, u64>(&DataKey::NextEin)
            .unwrap_or(1)
            - 1
    }
}
