use soroban_sdk::{log, vec, Address, Env, IntoVal, Symbol};

use crate::error::Error;
use crate::storage::{DataKey, ResolverKind, StoFlags, Storage, Verdict};

/// Maps callers to identities and answers compliance questions about them
pub struct IdentityGate;

impl IdentityGate {
    /// EIN registered for `address` in the identity registry
    pub fn resolve(env: &Env, address: &Address) -> Result<u64, Error> {
        Self::lookup(env, address)?.ok_or(Error::UnknownIdentity)
    }

    pub fn lookup(env: &Env, address: &Address) -> Result<Option<u64>, Error> {
        let registry = Storage::address(env, &DataKey::IdentityRegistry)?;

        Ok(env.invoke_contract::<Option<u64>>(
            &registry,
            &Symbol::new(env, "resolve"),
            vec![env, address.into_val(env)],
        ))
    }

    /// Runs every check switched on in `flags`
    ///
    /// # Errors
    /// - `ComplianceRejected`: a required check failed
    pub fn require_compliant(env: &Env, flags: &StoFlags, ein: u64) -> Result<(), Error> {
        Self::gate(env, flags, ein, true)
    }

    /// Receiving side of a holder transfer: every check except the whitelist
    ///
    /// # Errors
    /// - `ComplianceRejected`: a KYC, AML or blacklist check failed
    pub fn require_receivable(env: &Env, flags: &StoFlags, ein: u64) -> Result<(), Error> {
        Self::gate(env, flags, ein, false)
    }

    fn gate(env: &Env, flags: &StoFlags, ein: u64, whitelist: bool) -> Result<(), Error> {
        if flags.kyc_restricted && !Self::attested(env, ResolverKind::Kyc, ein) {
            log!(env, "kyc check failed", ein);
            return Err(Error::ComplianceRejected);
        }

        if flags.aml_restricted && !Self::attested(env, ResolverKind::Aml, ein) {
            log!(env, "aml check failed", ein);
            return Err(Error::ComplianceRejected);
        }

        if whitelist && flags.whitelist_restricted {
            let listed = Storage::flag(env, &DataKey::Whitelisted(ein))
                && Self::all_answer(env, ResolverKind::Whitelist, ein, Verdict::Approved);
            if !listed {
                log!(env, "whitelist check failed", ein);
                return Err(Error::ComplianceRejected);
            }
        }

        if flags.blacklist_restricted {
            let clear = !Storage::flag(env, &DataKey::Blacklisted(ein))
                && Self::all_answer(env, ResolverKind::Blacklist, ein, Verdict::NotListed);
            if !clear {
                log!(env, "blacklist check failed", ein);
                return Err(Error::ComplianceRejected);
            }
        }

        Ok(())
    }

    /// Every registered resolver of `kind` approves; an empty set approves
    fn attested(env: &Env, kind: ResolverKind, ein: u64) -> bool {
        Self::all_answer(env, kind, ein, Verdict::Approved)
    }

    fn all_answer(env: &Env, kind: ResolverKind, ein: u64, expected: Verdict) -> bool {
        Storage::resolvers(env, kind)
            .iter()
            .all(|resolver| Self::check(env, &resolver, ein) == expected)
    }

    fn check(env: &Env, resolver: &Address, ein: u64) -> Verdict {
        env.invoke_contract::<Verdict>(
            resolver,
            &Symbol::new(env, "check"),
            vec![env, ein.into_val(env)],
        )
    }
}
