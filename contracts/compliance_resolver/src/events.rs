use soroban_sdk::contracttype;

use crate::storage::Verdict;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusChangedEvent {
    pub ein: u64,
    pub verdict: Verdict,
}
