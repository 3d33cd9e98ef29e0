use soroban_sdk::{contracttype, Address};

/// Persistent entries live for roughly 30 days and are bumped on access.
pub const LEDGERS_PER_DAY: u32 = 17_280;
pub const BUMP_THRESHOLD: u32 = 7 * LEDGERS_PER_DAY;
pub const BUMP_AMOUNT: u32 = 30 * LEDGERS_PER_DAY;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    NextEin,
    Ein(Address), // address -> ein
}
