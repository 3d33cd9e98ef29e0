use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityCreatedEvent {
    pub ein: u64,
    pub address: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressAddedEvent {
    pub ein: u64,
    pub address: Address,
}
