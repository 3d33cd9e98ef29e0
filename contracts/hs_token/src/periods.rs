use soroban_sdk::{log, Address, Env, Symbol, Vec};

use crate::error::Error;
use crate::events::{BoundariesSetEvent, PeriodResultEvent};
use crate::lifecycle::Lifecycle;
use crate::storage::{DataKey, Stage, Storage};
use crate::validation::Validator;

/// Payment calendar and the oracle-reported result of each period.
///
/// Period 0 is everything before the first boundary, period `i` is
/// `[boundaries[i-1], boundaries[i])` and period `len` is the open tail.
/// The current period saturates at `len` once the last boundary has passed,
/// so the final closed window `[boundaries[len-2], boundaries[len-1])`
/// (period `len - 1`) can still be resolved. The tail itself never is.
pub struct Periods;

impl Periods {
    pub fn boundaries(env: &Env) -> Vec<u64> {
        let key = DataKey::Boundaries;
        match env.storage().persistent().get::<DataKey, Vec<u64>>(&key) {
            Some(boundaries) => {
                Storage::bump_persistent(env, &key);
                boundaries
            }
            None => Vec::new(env),
        }
    }

    /// Set the calendar once
    ///
    /// # Errors
    /// - `WrongStage`: only in `Lock` or `Market`
    /// - `PeriodsAlreadySet`: calendar already set
    /// - `InvalidPeriodSequence`: empty or not strictly increasing
    pub fn set_boundaries(env: &Env, boundaries: &Vec<u64>) -> Result<(), Error> {
        Lifecycle::require_stage(env, &[Stage::Lock, Stage::Market])?;

        if env.storage().persistent().has(&DataKey::Boundaries) {
            return Err(Error::PeriodsAlreadySet);
        }

        Validator::validate_boundaries(boundaries)?;

        env.storage()
            .persistent()
            .set(&DataKey::Boundaries, boundaries);
        Storage::bump_persistent(env, &DataKey::Boundaries);

        let first = boundaries.first().ok_or(Error::InvalidPeriodSequence)?;
        let last = boundaries.last().ok_or(Error::InvalidPeriodSequence)?;
        env.events().publish(
            (Symbol::new(env, "boundaries"),),
            BoundariesSetEvent {
                count: boundaries.len(),
                first,
                last,
            },
        );

        Ok(())
    }

    /// Index of the period containing the current ledger time
    pub fn current(env: &Env) -> u32 {
        Self::period_at(&Self::boundaries(env), env.ledger().timestamp())
    }

    /// Number of boundaries at or before `now`
    pub fn period_at(boundaries: &Vec<u64>, now: u64) -> u32 {
        let mut period = 0;
        for boundary in boundaries.iter() {
            if boundary > now {
                break;
            }
            period += 1;
        }
        period
    }

    /// Record the result of the most recently completed period
    ///
    /// # Errors
    /// - `WrongStage`: only in `Lock` or `Market`
    /// - `Unauthorized`: `oracle` is not a registered results oracle
    /// - `PeriodsNotSet`: no calendar yet
    /// - `InvalidAmount`: negative result
    /// - `PeriodNotElapsed`: no calendar period has completed
    /// - `PeriodAlreadyResolved`: that period already has a result
    pub fn notify(env: &Env, oracle: &Address, amount: i128) -> Result<u32, Error> {
        Lifecycle::require_stage(env, &[Stage::Lock, Stage::Market])?;

        oracle.require_auth();

        if !Storage::hydro_oracles(env).contains(oracle) {
            log!(env, "unregistered results oracle", oracle.clone());
            return Err(Error::Unauthorized);
        }

        let boundaries = Self::boundaries(env);
        if boundaries.is_empty() {
            return Err(Error::PeriodsNotSet);
        }

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let current = Self::period_at(&boundaries, env.ledger().timestamp());
        if current < 2 {
            return Err(Error::PeriodNotElapsed);
        }
        let period = current - 1;

        let key = DataKey::PeriodResult(period);
        if env.storage().persistent().has(&key) {
            return Err(Error::PeriodAlreadyResolved);
        }

        env.storage().persistent().set(&key, &amount);
        Storage::bump_persistent(env, &key);

        if period > Self::last_resolved(env) {
            env.storage()
                .instance()
                .set(&DataKey::LastResolvedPeriod, &period);
        }

        env.events().publish(
            (Symbol::new(env, "result"), period),
            PeriodResultEvent {
                period,
                amount,
                oracle: oracle.clone(),
            },
        );

        Ok(period)
    }

    pub fn result(env: &Env, period: u32) -> Option<i128> {
        let key = DataKey::PeriodResult(period);
        let result = env.storage().persistent().get::<DataKey, i128>(&key);
        if result.is_some() {
            Storage::bump_persistent(env, &key);
        }
        result
    }

    pub fn last_resolved(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::LastResolvedPeriod)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    #[test]
    fn test_period_at() {
        let env = Env::default();
        let boundaries = vec![&env, 100u64, 200, 300];

        assert_eq!(Periods::period_at(&boundaries, 0), 0);
        assert_eq!(Periods::period_at(&boundaries, 99), 0);
        assert_eq!(Periods::period_at(&boundaries, 100), 1);
        assert_eq!(Periods::period_at(&boundaries, 199), 1);
        assert_eq!(Periods::period_at(&boundaries, 200), 2);
        assert_eq!(Periods::period_at(&boundaries, 300), 3);
        assert_eq!(Periods::period_at(&boundaries, 10_000), 3);
    }

    #[test]
    fn test_period_at_without_calendar() {
        let env = Env::default();
        assert_eq!(Periods::period_at(&Vec::new(&env), 500), 0);
    }
}
