//! # Domain Types
//!
//! Small value types shared by codes, rows and the ledger.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     CodeId      │   │  AccountType    │   │ DebitOrCredit   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  server id      │   │  Asset    (D+)  │   │  "D" Debit      │       │
//! │  │  (i64)          │   │  Expense  (D+)  │   │  "C" Credit     │       │
//! │  └─────────────────┘   │  Liability(C+)  │   └─────────────────┘       │
//! │                        │  Income   (C+)  │                              │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │    CodeRole     │                         │    CodeType     │       │
//! │  │  ─────────────  │                         │  ─────────────  │       │
//! │  │  Purchase       │                         │  Purchase       │       │
//! │  │  Payment        │                         │  Payment        │       │
//! │  │  Adjustment     │                         │  Change         │       │
//! │  │  Credit         │                         │  (row's role)   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CodeRole` is which list a code came from; `CodeType` is the role a row
//! plays in this transaction. A payment-role code can back a change row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::LedgerRowError;

// =============================================================================
// Code Id
// =============================================================================

/// Server-assigned identifier of a register code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct CodeId(pub i64);

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CodeId {
    fn from(id: i64) -> Self {
        CodeId(id)
    }
}

// =============================================================================
// Account Type
// =============================================================================

/// General-ledger account class.
///
/// ## Sign Convention
/// ```text
/// Asset, Expense     →  amount = debit - credit
/// Liability, Income  →  amount = credit - debit
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AccountType {
    Asset,
    Liability,
    Income,
    Expense,
}

impl AccountType {
    /// True for account classes that grow on the debit side.
    pub const fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

// =============================================================================
// Debit Or Credit
// =============================================================================

/// The side a code naturally posts to when given a positive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DebitOrCredit {
    #[serde(rename = "D")]
    Debit,
    #[serde(rename = "C")]
    Credit,
}

impl DebitOrCredit {
    pub const fn opposite(&self) -> Self {
        match self {
            DebitOrCredit::Debit => DebitOrCredit::Credit,
            DebitOrCredit::Credit => DebitOrCredit::Debit,
        }
    }
}

// =============================================================================
// Code Role
// =============================================================================

/// Which configuration list a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CodeRole {
    #[default]
    Purchase,
    Payment,
    Adjustment,
    Credit,
}

impl CodeRole {
    /// Roles that may be chosen as the transaction's payment code.
    pub const fn settles_payment(&self) -> bool {
        !matches!(self, CodeRole::Purchase)
    }

    /// Adjustments move money between internal accounts, so they never
    /// produce a payment row.
    pub const fn carries_payment_row(&self) -> bool {
        matches!(self, CodeRole::Payment | CodeRole::Credit)
    }
}

// =============================================================================
// Code Type
// =============================================================================

/// The role a journal row plays in the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    Purchase,
    Payment,
    Change,
}

impl CodeType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CodeType::Purchase => "purchase",
            CodeType::Payment => "payment",
            CodeType::Change => "change",
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeType {
    type Err = LedgerRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(CodeType::Purchase),
            "payment" => Ok(CodeType::Payment),
            "change" => Ok(CodeType::Change),
            other => Err(LedgerRowError::UnknownCodeType(other.to_string())),
        }
    }
}

// =============================================================================
// Row Filter
// =============================================================================

/// Selects historical rows, rows added in this session, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowFilter {
    /// Read-only rows loaded from a previously saved payment.
    Old,
    New,
    #[default]
    Both,
}

impl RowFilter {
    #[inline]
    pub const fn admits(&self, is_new: bool) -> bool {
        match self {
            RowFilter::Old => !is_new,
            RowFilter::New => is_new,
            RowFilter::Both => true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
