#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::StatusChangedEvent;
pub use storage::{ResolverMode, Verdict};
use storage::{DataKey, BUMP_AMOUNT, BUMP_THRESHOLD};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// A KYC / AML / whitelist / blacklist attestation service keyed by EIN.
///
/// One deployment answers one kind of question; deploy an `Attestation`
/// instance per KYC or AML provider and a `Listing` instance per blacklist.
#[contract]
pub struct ComplianceResolver;

#[contractimpl]
impl ComplianceResolver {
    /// Initialize the resolver
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address, mode: ResolverMode) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Mode, &mode);

        Ok(())
    }

    /// Mark an identity as approved (attestation resolvers only)
    pub fn approve_ein(env: Env, ein: u64) -> Result<(), Error> {
        Self::set_status(&env, ein, ResolverMode::Attestation, Verdict::Approved)
    }

    /// Mark an identity as rejected (attestation resolvers only)
    pub fn reject_ein(env: Env, ein: u64) -> Result<(), Error> {
        Self::set_status(&env, ein, ResolverMode::Attestation, Verdict::Rejected)
    }

    /// Put an identity on the list (listing resolvers only)
    pub fn list_ein(env: Env, ein: u64) -> Result<(), Error> {
        Self::set_status(&env, ein, ResolverMode::Listing, Verdict::Listed)
    }

    /// Take an identity off the list (listing resolvers only)
    pub fn unlist_ein(env: Env, ein: u64) -> Result<(), Error> {
        Self::set_status(&env, ein, ResolverMode::Listing, Verdict::NotListed)
    }

    /// Answer the compliance question for `ein`
    pub fn check(env: Env, ein: u64) -> Verdict {
        if let Some(verdict) = env
            .storage()
            .persistent()
            .get::<DataKey, Verdict>(&DataKey::Status(ein))
        {
            return verdict;
        }

        match Self::mode(env) {
            ResolverMode::Attestation => Verdict::Rejected,
            ResolverMode::Listing => Verdict::NotListed,
        }
    }

    pub fn mode(env: Env) -> ResolverMode {
        env.storage()
            .instance()
            .get(&DataKey::Mode)
            .unwrap_or(ResolverMode::Attestation)
    }

    fn set_status(
        env: &Env,
        ein: u64,
        required_mode: ResolverMode,
        verdict: Verdict,
    ) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if Self::mode(env.clone()) != required_mode {
            return Err(Error::WrongMode);
        }

        let key = DataKey::Status(ein);
        env.storage().persistent().set(&key, &verdict);
        env.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);

        env.events().publish(
            (Symbol::new(env, "status_changed"), ein),
            StatusChangedEvent { ein, verdict },
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    fn setup(env: &Env, mode: ResolverMode) -> ComplianceResolverClient<'_> {
        env.mock_all_auths();
        let contract_id = env.register(ComplianceResolver, ());
        let client = ComplianceResolverClient::new(env, &contract_id);
        client.initialize(&Address::generate(env), &mode);
        client
    }

    #[test]
    fn test_attestation_defaults_to_rejected() {
        let env = Env::default();
        let kyc = setup(&env, ResolverMode::Attestation);

        assert_eq!(kyc.check(&1), Verdict::Rejected);
    }

    #[test]
    fn test_approve_then_reject() {
        let env = Env::default();
        let kyc = setup(&env, ResolverMode::Attestation);

        kyc.approve_ein(&1);
        assert_eq!(kyc.check(&1), Verdict::Approved);
        assert_eq!(kyc.check(&2), Verdict::Rejected);

        kyc.reject_ein(&1);
        assert_eq!(kyc.check(&1), Verdict::Rejected);
    }

    #[test]
    fn test_listing_mode() {
        let env = Env::default();
        let blacklist = setup(&env, ResolverMode::Listing);

        assert_eq!(blacklist.check(&7), Verdict::NotListed);
        blacklist.list_ein(&7);
        assert_eq!(blacklist.check(&7), Verdict::Listed);
        blacklist.unlist_ein(&7);
        assert_eq!(blacklist.check(&7), Verdict::NotListed);
    }

    #[test]
    fn test_mode_mismatch_rejected() {
        let env = Env::default();
        let kyc = setup(&env, ResolverMode::Attestation);

        assert_eq!(kyc.try_list_ein(&1), Err(Ok(Error::WrongMode)));

        let blacklist = setup(&env, ResolverMode::Listing);
        assert_eq!(blacklist.try_approve_ein(&1), Err(Ok(Error::WrongMode)));
    }

    #[test]
    #[should_panic]
    fn test_status_change_requires_admin_auth() {
        let env = Env::default();
        let contract_id = env.register(ComplianceResolver, ());
        let client = ComplianceResolverClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        env.mock_all_auths();
        client.initialize(&admin, &ResolverMode::Attestation);

        env.set_auths(&[]);
        client.approve_ein(&1);
    }
}
