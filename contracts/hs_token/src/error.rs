use soroban_sdk::contracterror;

/// Contract error codes. Missing owner/holder signatures are host auth
/// failures (require_auth traps), not variants of this enum.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Caller is not allowed to perform this privileged operation
    Unauthorized = 10,

    // ============================================
    // LIFECYCLE & PARAMETER ERRORS (20-29)
    // ============================================
    /// Stage transition requested from a stage other than its predecessor
    InvalidStageTransition = 20,
    /// Operation not legal in the current stage
    WrongStage = 21,
    /// Offering parameters, flags or subscription parameters missing
    ParametersNotSet = 22,
    /// Parameter values violate their invariants
    InvalidParameters = 23,

    // ============================================
    // IDENTITY ERRORS (30-39)
    // ============================================
    /// Address has no identity in the registry
    UnknownIdentity = 30,
    /// A required compliance check failed
    ComplianceRejected = 31,
    /// Identity never purchased, so it has no investor record
    NotAnInvestor = 32,

    // ============================================
    // SUBSCRIPTION & LEDGER ERRORS (40-49)
    // ============================================
    /// Purchase would violate an active cap
    SubscriptionCapExceeded = 40,
    /// Payment currency not accepted by this offering
    CurrencyNotAccepted = 41,
    /// Oracle price missing or not positive
    PriceUnavailable = 42,
    /// Amount must be positive
    InvalidAmount = 43,
    /// Holder does not have enough tokens
    InsufficientBalance = 44,
    /// Sender's tokens are still inside the lock period
    TransfersLocked = 45,
    /// Checked arithmetic overflowed
    ArithmeticOverflow = 46,

    // ============================================
    // PERIOD ERRORS (50-59)
    // ============================================
    /// Boundaries empty or not strictly increasing
    InvalidPeriodSequence = 50,
    /// Boundaries can only be set once
    PeriodsAlreadySet = 51,
    /// No boundaries set yet
    PeriodsNotSet = 52,
    /// No calendar period has fully elapsed yet
    PeriodNotElapsed = 53,
    /// Result for the most recently completed period already recorded
    PeriodAlreadyResolved = 54,

    // ============================================
    // FUNDS ERRORS (60-69)
    // ============================================
    /// Payout reserve cannot cover the claim
    InsufficientReserves = 60,
    /// Raised funds are still in escrow
    EscrowLocked = 61,
    /// Withdrawal exceeds the unwithdrawn raised amount
    InsufficientFunds = 62,
}
