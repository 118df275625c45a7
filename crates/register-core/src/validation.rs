//! # Validation Module
//!
//! Row-level checks used by [`Ledger::validate`]. The whole-ledger rules
//! (balance, tender, purchases present) live on the ledger itself.
//!
//! ## Reversal Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Editing a saved payment: old rows are read-only, new rows reverse     │
//! │  them. For each register code used by a new row:                       │
//! │                                                                         │
//! │    no old row with that code              → NoOriginalCode              │
//! │    old debits  < new credits              → ReversalExceedsOriginal     │
//! │    old credits < new debits               → ReversalExceedsOriginal     │
//! │                                                                         │
//! │  Example: old ST credit 3200                                            │
//! │    new ST debit 3200  → ok                                              │
//! │    new ST debit 3300  → "cannot reverse more than ... for ST"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Ledger::validate`]: crate::ledger::Ledger::validate

use crate::error::ValidationFailure;
use crate::ledger_row::LedgerRow;

/// Running debit and credit sums for one register code, wider than `i64`.
#[derive(Debug, Default, Clone, Copy)]
struct Sides {
    debit: i128,
    credit: i128,
}

impl Sides {
    fn add(&mut self, row: &LedgerRow) {
        self.debit += i128::from(row.debit().unwrap_or(0));
        self.credit += i128::from(row.credit().unwrap_or(0));
    }
}

/// Groups rows by register code, keeping first-seen order.
fn group<'a>(rows: impl Iterator<Item = &'a LedgerRow>) -> Vec<(&'a str, Sides)> {
    let mut groups: Vec<(&'a str, Sides)> = Vec::new();
    for row in rows {
        let code = row.register_code().unwrap_or("");
        match groups.iter_mut().find(|(c, _)| *c == code) {
            Some((_, sides)) => sides.add(row),
            None => {
                let mut sides = Sides::default();
                sides.add(row);
                groups.push((code, sides));
            }
        }
    }
    groups
}

/// Checks that new rows never reverse more than the old rows hold, per
/// register code.
pub fn check_reversal<'a>(
    old_rows: impl Iterator<Item = &'a LedgerRow>,
    new_rows: impl Iterator<Item = &'a LedgerRow>,
) -> Vec<ValidationFailure> {
    let old = group(old_rows);
    let mut failures = Vec::new();

    for (code, new) in group(new_rows) {
        match old.iter().find(|(c, _)| *c == code) {
            None => failures.push(ValidationFailure::NoOriginalCode { code: code.to_string() }),
            Some((_, old)) if old.debit < new.credit || old.credit < new.debit => {
                failures.push(ValidationFailure::ReversalExceedsOriginal { code: code.to_string() })
            }
            Some(_) => {}
        }
    }

    failures
}

/// One failure per row whose code requires a detail that was left blank.
pub fn check_required_detail<'a>(rows: impl Iterator<Item = &'a LedgerRow>) -> Vec<ValidationFailure> {
    rows.filter(|row| row.is_missing_detail())
        .map(|row| ValidationFailure::DetailRequired {
            code: row
                .register_code()
                .or(row.label())
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
