use soroban_sdk::contracttype;

pub const LEDGERS_PER_DAY: u32 = 17_280;
pub const BUMP_THRESHOLD: u32 = 7 * LEDGERS_PER_DAY;
pub const BUMP_AMOUNT: u32 = 30 * LEDGERS_PER_DAY;

/// What kind of question the resolver answers
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolverMode {
    /// KYC / AML / whitelist style: Approved or Rejected, unknown EINs are Rejected
    Attestation = 0,
    /// Blacklist style: Listed or NotListed, unknown EINs are NotListed
    Listing = 1,
}

/// Answer returned by `check`
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Approved = 0,
    Rejected = 1,
    Listed = 2,
    NotListed = 3,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Mode,
    Status(u64), // ein -> Verdict
}
