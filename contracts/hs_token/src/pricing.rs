use crate::storage::SCALE;

/// Security tokens issued for a payment
///
/// Formula: tokens = amount × price / SCALE
///
/// Example:
/// - amount: 250 HYDRO, price: 2.0 tokens per HYDRO
/// - tokens: 250 × 2.0 = 500
pub fn calculate_tokens(amount: i128, price: i128) -> Option<i128> {
    amount.checked_mul(price)?.checked_div(SCALE)
}

/// Largest holding a single investor may buy under the percentage cap
///
/// Formula: cap = perc_allowed × max_supply / SCALE
pub fn percentage_cap(perc_allowed: i128, max_supply: i128) -> Option<i128> {
    perc_allowed.checked_mul(max_supply)?.checked_div(SCALE)
}

/// Share of total supply held, scaled so that SCALE == 100%
pub fn participation_rate(balance: i128, total_supply: i128) -> Option<i128> {
    if total_supply <= 0 {
        return Some(0);
    }
    balance.checked_mul(SCALE)?.checked_div(total_supply)
}

/// Investor's cut of one period's result
///
/// Formula: payment = period_result × balance / total_supply
///
/// Multiplying before dividing keeps a 100% holder at exactly the full result.
pub fn investor_payment(period_result: i128, balance: i128, total_supply: i128) -> Option<i128> {
    if total_supply <= 0 {
        return Some(0);
    }
    period_result
        .checked_mul(balance)?
        .checked_div(total_supply)
}
