//! # Error Types
//!
//! Domain-specific error types for register-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CentsError          - text that is not a whole number of cents        │
//! │  UnknownEventError   - subscribe/emit on an event the source lacks     │
//! │                                                                         │
//! │  LedgerRowError      - construction or mutation of one journal row     │
//! │  LedgerError         - ledger operations (wraps LedgerRowError)        │
//! │  RegisterError       - code book / register setup (wraps LedgerError)  │
//! │  ConfigError         - settings file loading                           │
//! │                                                                         │
//! │  ValidationFailure   - NOT an error: a finding reported by             │
//! │                        `Ledger::validate`, kept in `Ledger::errors()`  │
//! │                                                                         │
//! │  Flow: CentsError → LedgerRowError → LedgerError → RegisterError       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (register code, row key, etc.)
//! 3. Validation findings are data, not `Err` values; a failing
//!    `validate()` still returns `Ok`-shaped state the UI renders

use serde::Serialize;
use thiserror::Error;

use crate::events::Event;
use crate::ledger_row::RowKey;
use crate::types::CodeId;

// =============================================================================
// Amount Parsing
// =============================================================================

/// Text that cannot be read as a whole number of cents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CentsError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a whole number of cents")]
    Fractional(String),

    #[error("'{0}' is too large to hold in cents")]
    OutOfRange(String),
}

// =============================================================================
// Event Error
// =============================================================================

/// Subscribing to (or emitting) an event the source does not publish.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{owner} does not publish the '{event}' event")]
pub struct UnknownEventError {
    pub owner: &'static str,
    pub event: Event,
}

// =============================================================================
// Ledger Row Error
// =============================================================================

/// Errors raised while building or mutating a single [`LedgerRow`].
///
/// [`LedgerRow`]: crate::ledger_row::LedgerRow
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerRowError {
    /// `code_type` was not one of purchase, payment, change.
    #[error("unknown code type '{0}'")]
    UnknownCodeType(String),

    /// A record carried a non-zero debit and a non-zero credit.
    #[error("a row cannot carry both a debit ({debit}) and a credit ({credit})")]
    BothDebitAndCredit { debit: i64, credit: i64 },

    /// Rows never hold a zero amount; zero means the row should not exist.
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("amount is not a number: {0}")]
    NotANumber(String),

    #[error("amount must be a whole number of cents: {0}")]
    FractionalCents(String),

    /// Magnitude does not fit a signed 64-bit cent count.
    #[error("amount is out of range: {0}")]
    OutOfRange(String),

    /// Historical rows cannot be edited.
    #[error("row {0} is read-only")]
    ReadOnly(RowKey),

    /// The row's account type is missing or not one the sign rule knows.
    #[error("row {0} has no recognized account type")]
    UnknownAccountType(RowKey),

    /// The code has no natural side, so no row can be built from it.
    #[error("code {0} has no debit_or_credit side")]
    UnknownPolarity(CodeId),

    #[error(transparent)]
    Event(#[from] UnknownEventError),
}

impl From<CentsError> for LedgerRowError {
    fn from(err: CentsError) -> Self {
        match err {
            CentsError::NotANumber(text) => LedgerRowError::NotANumber(text),
            CentsError::Fractional(text) => LedgerRowError::FractionalCents(text),
            CentsError::OutOfRange(text) => LedgerRowError::OutOfRange(text),
        }
    }
}

// =============================================================================
// Ledger Error
// =============================================================================

/// Errors raised by [`Ledger`] operations.
///
/// ## When This Occurs
/// ```text
/// add(Purchase, CodeId(99), 1000)
///      │
///      ▼
/// code book lookup: not found
///      │
///      ▼
/// LedgerError::UnknownCode("99")
/// ```
///
/// [`Ledger`]: crate::ledger::Ledger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No code with this id (or register code) exists in the code book.
    #[error("no code found for '{0}'")]
    UnknownCode(String),

    /// The id does not name a payment, adjustment or credit code.
    #[error("no payment code found for '{0}'")]
    UnknownPaymentCode(String),

    /// The code has no debit_or_credit side.
    #[error("code {0} has neither a debit nor a credit side")]
    UnknownPolarity(CodeId),

    /// No payment code matches the configured change payment type.
    #[error("no change code (payment type '{0}') is configured")]
    MissingChangeCode(String),

    #[error("amount tendered is not a number: {0}")]
    TenderedNotANumber(String),

    #[error("amount tendered must be a whole number of cents: {0}")]
    FractionalTendered(String),

    #[error("amount tendered is out of range: {0}")]
    TenderedOutOfRange(String),

    /// The change would leave a debit or credit sum past `i64`.
    #[error("ledger totals would overflow")]
    TotalOutOfRange,

    #[error("no row with key {0} in this ledger")]
    UnknownRow(RowKey),

    #[error(transparent)]
    Row(#[from] LedgerRowError),

    #[error(transparent)]
    Event(#[from] UnknownEventError),
}

// =============================================================================
// Register Error
// =============================================================================

/// Errors raised while assembling or driving a [`Register`].
///
/// [`Register`]: crate::register::Register
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Two codes across the role lists share an id.
    #[error("overlapping code ids: {0}")]
    OverlappingCodeIds(CodeId),

    /// `switch_payment_code_to` found no payment code with this type.
    #[error("no payment code with payment type '{0}'")]
    UnknownPaymentType(String),

    /// `add_purchase` was given text that is neither a register code nor an id.
    #[error("no purchase code '{0}'")]
    UnknownRegisterCode(String),

    #[error("invalid register configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors from loading [`RegisterSettings`].
///
/// [`RegisterSettings`]: crate::config::RegisterSettings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to write settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

// =============================================================================
// Validation Failure
// =============================================================================

/// A single finding from [`Ledger::validate`] or [`Ledger::validate_reversal`].
///
/// The `Display` text is what the register shows beside the submit button.
///
/// [`Ledger::validate`]: crate::ledger::Ledger::validate
/// [`Ledger::validate_reversal`]: crate::ledger::Ledger::validate_reversal
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    #[error("you may not return negative change (the amount tendered must be at least the purchase total)")]
    NegativeChange,

    #[error("amount tendered must be positive for a payment")]
    TenderedNotPositive,

    #[error("payment and change must both be zero if you are adjusting internal accounts")]
    AdjustmentNotZero,

    #[error("amount credited must be positive for a credit")]
    CreditedNotPositive,

    #[error("debits and credits do not balance (debits must equal credits)")]
    Unbalanced { debits: i64, credits: i64 },

    #[error("no purchase codes have been entered")]
    NoPurchaseCodes,

    #[error("there was no code {code} in the original payment")]
    NoOriginalCode { code: String },

    #[error("you cannot reverse more than the original payment for {code}")]
    ReversalExceedsOriginal { code: String },

    #[error("{code} requires a detail")]
    DetailRequired { code: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type RowResult<T> = Result<T, LedgerRowError>;

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

pub type RegisterResult<T> = Result<T, RegisterError>;

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
