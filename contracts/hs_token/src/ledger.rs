use soroban_sdk::{log, Address, Env, Symbol};

use crate::error::Error;
use crate::events::{MintEvent, TransferEvent};
use crate::identity::IdentityGate;
use crate::lifecycle::Lifecycle;
use crate::storage::{DataKey, Stage, Storage};

/// Security token balances, keyed by identity rather than by address
pub struct Ledger;

impl Ledger {
    pub fn balance_of(env: &Env, ein: u64) -> i128 {
        let key = DataKey::Balance(ein);
        let balance = env.storage().persistent().get::<DataKey, i128>(&key);
        match balance {
            Some(amount) => {
                Storage::bump_persistent(env, &key);
                amount
            }
            None => 0,
        }
    }

    pub fn total_supply(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn mint(env: &Env, ein: u64, amount: i128) -> Result<(), Error> {
        let new_balance = Self::balance_of(env, ein)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let new_supply = Self::total_supply(env)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        Self::set_balance(env, ein, new_balance);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &new_supply);

        env.events().publish(
            (Symbol::new(env, "mint"), ein),
            MintEvent { ein, amount },
        );

        Ok(())
    }

    /// Holder-to-holder transfer, gated by stage, compliance of both sides
    /// (the whitelist binds the sender only) and the sender's purchase lock
    ///
    /// # Errors
    /// - `WrongStage`: only legal in `Market`
    /// - `InvalidAmount`: amount must be positive
    /// - `UnknownIdentity`: either side has no identity
    /// - `ComplianceRejected`: either side fails a required check
    /// - `TransfersLocked`: sender still inside its lock period
    /// - `InsufficientBalance`: not enough tokens
    pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        Lifecycle::require_stage(env, &[Stage::Market])?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_ein = IdentityGate::resolve(env, from)?;
        let to_ein = IdentityGate::resolve(env, to)?;

        let flags = Storage::sto_flags(env)?;
        IdentityGate::require_compliant(env, &flags, from_ein)?;
        IdentityGate::require_receivable(env, &flags, to_ein)?;

        if flags.period_locked {
            Self::require_unlocked(env, from_ein)?;
        }

        let from_balance = Self::balance_of(env, from_ein);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        if from_ein != to_ein {
            let new_to_balance = Self::balance_of(env, to_ein)
                .checked_add(amount)
                .ok_or(Error::ArithmeticOverflow)?;

            Self::set_balance(env, from_ein, from_balance - amount);
            Self::set_balance(env, to_ein, new_to_balance);
        }

        env.events().publish(
            (Symbol::new(env, "transfer"), from_ein, to_ein),
            TransferEvent {
                from_ein,
                to_ein,
                amount,
            },
        );

        Ok(())
    }

    fn require_unlocked(env: &Env, ein: u64) -> Result<(), Error> {
        // holders that never purchased carry no lock
        let investor = match Storage::investor(env, ein) {
            Some(investor) => investor,
            None => return Ok(()),
        };

        let lock_period = Storage::sto_params(env)?.lock_period;
        let unlocks_at = investor.last_purchase.saturating_add(lock_period);
        if env.ledger().timestamp() < unlocks_at {
            log!(env, "tokens locked until", unlocks_at);
            return Err(Error::TransfersLocked);
        }

        Ok(())
    }

    fn set_balance(env: &Env, ein: u64, amount: i128) {
        let key = DataKey::Balance(ein);
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
            Storage::bump_persistent(env, &key);
        }
    }
}
