use soroban_sdk::{contracttype, Address};

use crate::storage::{Currency, ResolverKind, Stage};

#[contracttype]
#[derive(Clone, Debug)]
pub struct StageChangedEvent {
    pub from: Stage,
    pub to: Stage,
}

/// Advisory: the offering locked with fewer investors than configured
#[contracttype]
#[derive(Clone, Debug)]
pub struct MinInvestorsWarningEvent {
    pub investor_count: u32,
    pub min_investors: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ResolverUpdatedEvent {
    pub kind: ResolverKind,
    pub resolver: Address,
    pub added: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ListUpdatedEvent {
    pub ein: u64,
    pub listed: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OracleUpdatedEvent {
    pub oracle: Address,
    pub added: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TokensPurchasedEvent {
    pub ein: u64,
    pub buyer: Address,
    pub currency: Currency,
    pub paid: i128,
    pub tokens: i128,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from_ein: u64,
    pub to_ein: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintEvent {
    pub ein: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct BoundariesSetEvent {
    pub count: u32,
    pub first: u64,
    pub last: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PeriodResultEvent {
    pub period: u32,
    pub amount: i128,
    pub oracle: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentClaimedEvent {
    pub ein: u64,
    pub period_to_pay: u32,
    pub investor_participation_rate: i128,
    pub period_results: i128,
    pub payment_for_investor: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReservesFundedEvent {
    pub amount: i128,
    pub reserves: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RaisedWithdrawnEvent {
    pub currency: Currency,
    pub amount: i128,
    pub to: Address,
}
