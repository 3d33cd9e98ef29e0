use soroban_sdk::{log, token, Address, Env, Symbol};

use crate::error::Error;
use crate::events::{PaymentClaimedEvent, ReservesFundedEvent};
use crate::identity::IdentityGate;
use crate::ledger::Ledger;
use crate::lifecycle::Lifecycle;
use crate::periods::Periods;
use crate::pricing::{investor_payment, participation_rate};
use crate::storage::{DataKey, Stage, Storage};

pub struct Dividends;

impl Dividends {
    /// Pay the claimant for the next unpaid resolved period, at most one
    /// period per call
    ///
    /// # Errors
    /// - `WrongStage`: only in `Lock` or `Market`
    /// - `UnknownIdentity`: claimant has no identity
    /// - `NotAnInvestor`: identity never purchased
    /// - `InsufficientReserves`: reserve cannot cover the payment
    pub fn claim(env: &Env, claimant: &Address) -> Result<i128, Error> {
        Lifecycle::require_stage(env, &[Stage::Lock, Stage::Market])?;

        claimant.require_auth();

        let ein = IdentityGate::resolve(env, claimant)?;
        let mut investor = Storage::investor(env, ein).ok_or(Error::NotAnInvestor)?;

        // Live balance, not a snapshot: tokens moved after one holder claimed a
        // period can earn that period again in the hands of a holder whose
        // cursor is still behind it.
        let balance = Ledger::balance_of(env, ein);
        let total_supply = Ledger::total_supply(env);
        let rate = participation_rate(balance, total_supply).ok_or(Error::ArithmeticOverflow)?;

        let cursor = investor.last_period_paid;
        if cursor >= Periods::last_resolved(env) {
            // Nothing newly resolved
            Self::publish_claim(env, ein, cursor, rate, 0, 0);
            return Ok(0);
        }

        let period_to_pay = cursor + 1;
        // Unresolved periods below the last resolved one are skipped for good
        let period_result = Periods::result(env, period_to_pay).unwrap_or(0);
        let payment = investor_payment(period_result, balance, total_supply)
            .ok_or(Error::ArithmeticOverflow)?;

        if payment > 0 {
            let reserves = Storage::reserves(env);
            if payment > reserves {
                log!(env, "reserves short", payment, reserves);
                return Err(Error::InsufficientReserves);
            }
            Storage::set_reserves(env, reserves - payment);

            let payout_token = Storage::address(env, &DataKey::HydroToken)?;
            token::Client::new(env, &payout_token).transfer(
                &env.current_contract_address(),
                claimant,
                &payment,
            );
        }

        investor.last_period_paid = period_to_pay;
        investor.total_dividends = investor
            .total_dividends
            .checked_add(payment)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_investor(env, &investor);

        Self::publish_claim(env, ein, period_to_pay, rate, period_result, payment);

        Ok(payment)
    }

    /// Move payout currency from the owner into the dividend reserve
    pub fn fund_reserves(env: &Env, owner: &Address, amount: i128) -> Result<i128, Error> {
        Lifecycle::require_stage(env, &[Stage::Lock, Stage::Market])?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let reserves = Storage::reserves(env)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        let payout_token = Storage::address(env, &DataKey::HydroToken)?;
        token::Client::new(env, &payout_token).transfer(
            owner,
            &env.current_contract_address(),
            &amount,
        );

        Storage::set_reserves(env, reserves);

        env.events().publish(
            (Symbol::new(env, "reserves"),),
            ReservesFundedEvent { amount, reserves },
        );

        Ok(reserves)
    }

    fn publish_claim(
        env: &Env,
        ein: u64,
        period_to_pay: u32,
        investor_participation_rate: i128,
        period_results: i128,
        payment_for_investor: i128,
    ) {
        env.events().publish(
            (Symbol::new(env, "claim"), ein),
            PaymentClaimedEvent {
                ein,
                period_to_pay,
                investor_participation_rate,
                period_results,
                payment_for_investor,
            },
        );
    }
}
