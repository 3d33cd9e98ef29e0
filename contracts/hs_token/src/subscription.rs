use soroban_sdk::{log, token, vec, Address, Env, IntoVal, Symbol};

use crate::error::Error;
use crate::events::{RaisedWithdrawnEvent, TokensPurchasedEvent};
use crate::identity::IdentityGate;
use crate::ledger::Ledger;
use crate::lifecycle::Lifecycle;
use crate::periods::Periods;
use crate::pricing::{calculate_tokens, percentage_cap};
use crate::storage::{Currency, Investor, MainParams, Stage, StoFlags, StoParams, Storage};

pub struct Subscription;

impl Subscription {
    /// Buy security tokens with `amount` of `currency`
    ///
    /// Every check runs before any value moves, so a rejected purchase
    /// leaves balances, escrow and investor records untouched.
    pub fn buy_tokens(
        env: &Env,
        buyer: &Address,
        amount: i128,
        currency: Currency,
    ) -> Result<i128, Error> {
        Lifecycle::require_stage(env, &[Stage::Presale, Stage::Sale])?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        buyer.require_auth();

        let main = Storage::main_params(env)?;
        let flags = Storage::sto_flags(env)?;
        let params = Storage::sto_params(env)?;

        let ein = IdentityGate::resolve(env, buyer)?;
        IdentityGate::require_compliant(env, &flags, ein)?;

        let accepted = match currency {
            Currency::Hydro => flags.hydro_allowed,
            Currency::Eth => flags.eth_allowed,
        };
        if !accepted {
            return Err(Error::CurrencyNotAccepted);
        }

        let price = Self::price(env, &main, &flags, &params, currency)?;
        let tokens = calculate_tokens(amount, price).ok_or(Error::ArithmeticOverflow)?;
        if tokens <= 0 {
            return Err(Error::InvalidAmount);
        }

        let existing = Storage::investor(env, ein);
        let is_new = existing.is_none();
        let mut investor = existing.unwrap_or(Investor {
            ein,
            purchased_tokens: 0,
            hydro_paid: 0,
            eth_paid: 0,
            last_period_paid: Periods::current(env).saturating_sub(1),
            last_purchase: 0,
            total_dividends: 0,
        });

        // Caps
        let purchased = investor
            .purchased_tokens
            .checked_add(tokens)
            .ok_or(Error::ArithmeticOverflow)?;

        if flags.perc_ownership_type {
            let cap = percentage_cap(params.perc_allowed_tokens, main.max_supply)
                .ok_or(Error::ArithmeticOverflow)?;
            if purchased > cap {
                log!(env, "percentage cap exceeded", ein, purchased, cap);
                return Err(Error::SubscriptionCapExceeded);
            }
        }

        let (paid, cap_on, cap) = match currency {
            Currency::Hydro => (investor.hydro_paid, flags.hydro_amount_type, params.hydro_allowed),
            Currency::Eth => (investor.eth_paid, flags.eth_amount_type, params.eth_allowed),
        };
        let paid = paid.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
        if cap_on && paid > cap {
            log!(env, "amount cap exceeded", ein, paid, cap);
            return Err(Error::SubscriptionCapExceeded);
        }

        let investor_count = Storage::investor_count(env);
        if is_new && flags.limited_ownership && investor_count >= params.max_investors {
            log!(env, "investor limit reached", investor_count);
            return Err(Error::SubscriptionCapExceeded);
        }

        let new_supply = Ledger::total_supply(env)
            .checked_add(tokens)
            .ok_or(Error::ArithmeticOverflow)?;
        if new_supply > main.max_supply {
            log!(env, "max supply exceeded", new_supply);
            return Err(Error::SubscriptionCapExceeded);
        }

        // Payment into escrow
        let payment_token = Storage::payment_token(env, currency)?;
        token::Client::new(env, &payment_token).transfer(
            buyer,
            &env.current_contract_address(),
            &amount,
        );

        let mut raised = Storage::raised(env, currency);
        raised.raised = raised
            .raised
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_raised(env, currency, &raised);

        Ledger::mint(env, ein, tokens)?;

        investor.purchased_tokens = purchased;
        match currency {
            Currency::Hydro => investor.hydro_paid = paid,
            Currency::Eth => investor.eth_paid = paid,
        }
        investor.last_purchase = env.ledger().timestamp();
        Storage::set_investor(env, &investor);

        if is_new {
            Storage::set_investor_count(env, investor_count + 1);
        }

        env.events().publish(
            (Symbol::new(env, "buy"), ein),
            TokensPurchasedEvent {
                ein,
                buyer: buyer.clone(),
                currency,
                paid: amount,
                tokens,
                price,
            },
        );

        Ok(tokens)
    }

    /// Release escrowed `currency` to the owner once the escrow limit passed
    ///
    /// # Errors
    /// - `WrongStage`: only in `Lock` or `Market`
    /// - `InvalidAmount`: amount must be positive
    /// - `EscrowLocked`: before `escrow_limit_period`
    /// - `InsufficientFunds`: more than the unwithdrawn raised amount
    pub fn withdraw_raised(
        env: &Env,
        owner: &Address,
        currency: Currency,
        amount: i128,
    ) -> Result<(), Error> {
        Lifecycle::require_stage(env, &[Stage::Lock, Stage::Market])?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let main = Storage::main_params(env)?;
        if env.ledger().timestamp() < main.escrow_limit_period {
            return Err(Error::EscrowLocked);
        }

        let mut funds = Storage::raised(env, currency);
        let withdrawn = funds
            .withdrawn
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        if withdrawn > funds.raised {
            return Err(Error::InsufficientFunds);
        }
        funds.withdrawn = withdrawn;
        Storage::set_raised(env, currency, &funds);

        let payment_token = Storage::payment_token(env, currency)?;
        token::Client::new(env, &payment_token).transfer(
            &env.current_contract_address(),
            owner,
            &amount,
        );

        env.events().publish(
            (Symbol::new(env, "withdrawn"),),
            RaisedWithdrawnEvent {
                currency,
                amount,
                to: owner.clone(),
            },
        );

        Ok(())
    }

    /// Tokens per whole payment unit: the oracle rate when the currency is
    /// oracle-priced, the fixed offering price otherwise
    fn price(
        env: &Env,
        main: &MainParams,
        flags: &StoFlags,
        params: &StoParams,
        currency: Currency,
    ) -> Result<i128, Error> {
        let (oracle_on, oracle, fixed) = match currency {
            Currency::Hydro => (flags.hydro_oracle, &params.hydro_oracle, main.hydro_price),
            Currency::Eth => (flags.eth_oracle, &params.eth_oracle, main.eth_price),
        };

        if !oracle_on {
            return Ok(fixed);
        }

        let oracle = oracle.as_ref().ok_or(Error::PriceUnavailable)?;
        let rate = env.invoke_contract::<Option<i128>>(
            oracle,
            &Symbol::new(env, "current_price"),
            vec![env, currency.tag().into_val(env)],
        );

        match rate {
            Some(rate) if rate > 0 => Ok(rate),
            _ => Err(Error::PriceUnavailable),
        }
    }
}
