use soroban_sdk::Vec;

use crate::error::Error;
use crate::storage::{MainParams, StoFlags, StoParams, SCALE};

pub struct Validator;

impl Validator {
    /// Calendar must be ordered, prices and supply positive
    pub fn validate_main_params(params: &MainParams) -> Result<(), Error> {
        if params.beginning_date >= params.lock_ends || params.lock_ends >= params.end_date {
            return Err(Error::InvalidParameters);
        }

        if params.escrow_limit_period < params.beginning_date {
            return Err(Error::InvalidParameters);
        }

        if params.hydro_price <= 0 || params.eth_price <= 0 {
            return Err(Error::InvalidParameters);
        }

        if params.max_supply <= 0 {
            return Err(Error::InvalidParameters);
        }

        Ok(())
    }

    /// Every cap switched on by `flags` needs a usable value
    pub fn validate_sto_params(flags: &StoFlags, params: &StoParams) -> Result<(), Error> {
        if flags.perc_ownership_type
            && (params.perc_allowed_tokens <= 0 || params.perc_allowed_tokens > SCALE)
        {
            return Err(Error::InvalidParameters);
        }

        if flags.hydro_amount_type && params.hydro_allowed <= 0 {
            return Err(Error::InvalidParameters);
        }

        if flags.eth_amount_type && params.eth_allowed <= 0 {
            return Err(Error::InvalidParameters);
        }

        if params.min_investors > params.max_investors {
            return Err(Error::InvalidParameters);
        }

        if flags.limited_ownership && params.max_investors == 0 {
            return Err(Error::InvalidParameters);
        }

        if flags.hydro_oracle && params.hydro_oracle.is_none() {
            return Err(Error::InvalidParameters);
        }

        if flags.eth_oracle && params.eth_oracle.is_none() {
            return Err(Error::InvalidParameters);
        }

        Ok(())
    }

    /// Non-empty and strictly increasing
    pub fn validate_boundaries(boundaries: &Vec<u64>) -> Result<(), Error> {
        if boundaries.is_empty() {
            return Err(Error::InvalidPeriodSequence);
        }

        let mut previous: Option<u64> = None;
        for boundary in boundaries.iter() {
            if let Some(prev) = previous {
                if boundary <= prev {
                    return Err(Error::InvalidPeriodSequence);
                }
            }
            previous = Some(boundary);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    fn main_params() -> MainParams {
        MainParams {
            hydro_price: SCALE,
            eth_price: 1_000 * SCALE,
            beginning_date: 1_000,
            lock_ends: 2_000,
            end_date: 3_000,
            max_supply: 1_000_000 * SCALE,
            escrow_limit_period: 1_500,
        }
    }

    fn flags() -> StoFlags {
        StoFlags {
            limited_ownership: true,
            period_locked: false,
            perc_ownership_type: true,
            hydro_amount_type: true,
            eth_amount_type: false,
            hydro_allowed: true,
            eth_allowed: false,
            kyc_restricted: true,
            aml_restricted: false,
            whitelist_restricted: false,
            blacklist_restricted: false,
            eth_oracle: false,
            hydro_oracle: false,
        }
    }

    fn sto_params() -> StoParams {
        StoParams {
            perc_allowed_tokens: 2 * SCALE / 10,
            hydro_allowed: 1_000 * SCALE,
            eth_allowed: 0,
            lock_period: 0,
            min_investors: 1,
            max_investors: 4,
            eth_oracle: None,
            hydro_oracle: None,
        }
    }

    #[test]
    fn test_valid_main_params() {
        assert_eq!(Validator::validate_main_params(&main_params()), Ok(()));
    }

    #[test]
    fn test_calendar_must_be_ordered() {
        let mut params = main_params();
        params.lock_ends = params.end_date;
        assert_eq!(
            Validator::validate_main_params(&params),
            Err(Error::InvalidParameters)
        );

        let mut params = main_params();
        params.beginning_date = params.lock_ends;
        assert_eq!(
            Validator::validate_main_params(&params),
            Err(Error::InvalidParameters)
        );
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut params = main_params();
        params.eth_price = 0;
        assert_eq!(
            Validator::validate_main_params(&params),
            Err(Error::InvalidParameters)
        );
    }

    #[test]
    fn test_disabled_caps_may_be_zero() {
        // eth_amount_type is off, so eth_allowed == 0 is fine
        assert_eq!(Validator::validate_sto_params(&flags(), &sto_params()), Ok(()));
    }

    #[test]
    fn test_percentage_cap_above_hundred_percent() {
        let mut params = sto_params();
        params.perc_allowed_tokens = SCALE + 1;
        assert_eq!(
            Validator::validate_sto_params(&flags(), &params),
            Err(Error::InvalidParameters)
        );
    }

    #[test]
    fn test_oracle_flag_needs_oracle_address() {
        let mut flags = flags();
        flags.hydro_oracle = true;
        assert_eq!(
            Validator::validate_sto_params(&flags, &sto_params()),
            Err(Error::InvalidParameters)
        );
    }

    #[test]
    fn test_min_investors_above_max() {
        let mut params = sto_params();
        params.min_investors = 5;
        assert_eq!(
            Validator::validate_sto_params(&flags(), &params),
            Err(Error::InvalidParameters)
        );
    }

    #[test]
    fn test_boundaries() {
        let env = Env::default();

        assert_eq!(
            Validator::validate_boundaries(&vec![&env, 100u64, 200, 300]),
            Ok(())
        );
        assert_eq!(
            Validator::validate_boundaries(&Vec::new(&env)),
            Err(Error::InvalidPeriodSequence)
        );
        assert_eq!(
            Validator::validate_boundaries(&vec![&env, 100u64, 100]),
            Err(Error::InvalidPeriodSequence)
        );
        assert_eq!(
            Validator::validate_boundaries(&vec![&env, 300u64, 200]),
            Err(Error::InvalidPeriodSequence)
        );
    }
}
