use soroban_sdk::{contracttype, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct PriceUpdatedEvent {
    pub currency: Symbol,
    pub rate: i128,
    pub timestamp: u64,
}
