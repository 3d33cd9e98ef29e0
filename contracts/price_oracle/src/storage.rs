use soroban_sdk::{contracttype, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct PriceEntry {
    /// Security tokens per whole payment unit, 7 decimals
    pub rate: i128,
    /// Ledger timestamp of the last update
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Price(Symbol), // currency tag -> PriceEntry
}
