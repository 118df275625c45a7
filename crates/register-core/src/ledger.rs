//! # Ledger
//!
//! The transaction's journal. Keeps the payment row and the change row
//! consistent with the purchase rows, computes totals and validates the
//! result before submission.
//!
//! ## Reconciliation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        recalculate()                                    │
//! │                                                                         │
//! │  target  = amount tendered, or new purchase total when none given       │
//! │                                                                         │
//! │  PAYMENT ROW                                                            │
//! │    target == 0        → destroy it                                      │
//! │    exists             → set_debit(target)                               │
//! │    absent             → create from the payment code                    │
//! │                         (adjustment codes never get one)                │
//! │                                                                         │
//! │  change  = new payment total - new purchase total                       │
//! │                                                                         │
//! │  CHANGE ROW                                                             │
//! │    change == 0        → destroy it                                      │
//! │    exists             → set_credit(change)                              │
//! │    absent             → create from the change code                     │
//! │                                                                         │
//! │  then emit Update exactly once                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-entrancy
//! A recalculation triggered while one is running (an `Update` listener
//! that changes the tender, say) does not recurse. It marks the running
//! pass dirty, and the running pass reconciles again before it returns.
//!
//! ## All or Nothing
//! Reconciliation is planned before it is applied. Every mutator plans
//! against the ledger as the mutation would leave it and returns the
//! planning error (a missing change code, totals past `i64`) with nothing
//! changed.
//!
//! ## Example
//! ```rust
//! use register_core::code::{Code, CodeBook};
//! use register_core::ledger::Ledger;
//! use register_core::types::{AccountType, CodeId, CodeRole, CodeType, DebitOrCredit};
//! use std::sync::Arc;
//!
//! let mut store = Code::new(1, CodeRole::Purchase, DebitOrCredit::Credit);
//! store.account_type = Some(AccountType::Income);
//! let mut cash = Code::new(3, CodeRole::Payment, DebitOrCredit::Debit);
//! cash.account_type = Some(AccountType::Asset);
//! cash.payment_type = Some("Cash".to_string());
//!
//! let book = CodeBook::new(vec![store], vec![cash], vec![], vec![], "Cash").unwrap();
//! let mut ledger = Ledger::new(Arc::new(book));
//!
//! ledger.set_payment_code(CodeId(3)).unwrap();
//! ledger.add(CodeType::Purchase, CodeId(1), 10000).unwrap();
//! ledger.set_amount_tendered(Some(15000)).unwrap();
//!
//! assert_eq!(ledger.change_total(Default::default()), 5000);
//! assert!(ledger.validate());
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use ts_rs::TS;

use crate::code::{Code, CodeBook};
use crate::error::{CentsError, LedgerError, LedgerResult, RowResult, UnknownEventError, ValidationFailure};
use crate::events::{self, Event, Notifier};
use crate::ledger_row::{LedgerRow, LedgerRowRecord, RowField, RowKey};
use crate::money::{parse_cents, Money};
use crate::types::{CodeId, CodeRole, CodeType, DebitOrCredit, RowFilter};
use crate::validation;

// =============================================================================
// Code Reference
// =============================================================================

/// A code given either by id or already resolved.
#[derive(Debug, Clone)]
pub enum CodeRef {
    Id(CodeId),
    Code(Arc<Code>),
}

impl From<CodeId> for CodeRef {
    fn from(id: CodeId) -> Self {
        CodeRef::Id(id)
    }
}

impl From<i64> for CodeRef {
    fn from(id: i64) -> Self {
        CodeRef::Id(CodeId(id))
    }
}

impl From<Arc<Code>> for CodeRef {
    fn from(code: Arc<Code>) -> Self {
        CodeRef::Code(code)
    }
}

impl From<&Arc<Code>> for CodeRef {
    fn from(code: &Arc<Code>) -> Self {
        CodeRef::Code(Arc::clone(code))
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Every ledger total for one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerTotals {
    pub purchase: Money,
    pub payment: Money,
    pub tendered: Money,
    pub credited: Money,
    pub change: Money,
    pub debits: Money,
    pub credits: Money,
}

// =============================================================================
// Reconciliation Plan
// =============================================================================

/// What one reconciliation pass does to the payment or the change row.
#[derive(Debug)]
enum Settle {
    /// Nothing to do; there is no row.
    Keep,
    Remove,
    Set(i64),
    Create(LedgerRow),
}

impl Settle {
    /// Debit and credit the settled row carries. `Set` posts on `side`.
    fn sides(&self, side: DebitOrCredit) -> (i128, i128) {
        match self {
            Settle::Keep | Settle::Remove => (0, 0),
            Settle::Set(cents) => {
                let magnitude = i128::from(*cents).abs();
                match (side, *cents > 0) {
                    (DebitOrCredit::Debit, true) | (DebitOrCredit::Credit, false) => (magnitude, 0),
                    (DebitOrCredit::Debit, false) | (DebitOrCredit::Credit, true) => (0, magnitude),
                }
            }
            Settle::Create(row) => wide_sides(std::iter::once(row)),
        }
    }
}

#[derive(Debug)]
struct Plan {
    payment: Settle,
    change: Settle,
}

/// The inputs of a reconciliation: the ledger's own, or the ones a pending
/// mutation would leave behind.
struct Draft<'a> {
    payment_code: Option<&'a Arc<Code>>,
    amount_tendered: Option<i64>,
    /// Slot indices treated as already gone.
    without: Vec<usize>,
    /// A row treated as already appended.
    with: Option<&'a LedgerRow>,
}

/// Debit and credit sums, wide enough not to overflow.
fn wide_sides<'a>(rows: impl Iterator<Item = &'a LedgerRow>) -> (i128, i128) {
    rows.fold((0, 0), |(debits, credits), row| {
        (
            debits + i128::from(row.debit().unwrap_or(0)),
            credits + i128::from(row.credit().unwrap_or(0)),
        )
    })
}

fn within_range(debits: i128, credits: i128) -> LedgerResult<()> {
    let limit = i128::from(i64::MAX);
    if debits > limit || credits > limit {
        return Err(LedgerError::TotalOutOfRange);
    }
    Ok(())
}

/// Narrows a planned amount to one a row can carry.
fn postable(cents: i128) -> LedgerResult<i64> {
    i64::try_from(cents)
        .ok()
        .filter(|cents| *cents != i64::MIN)
        .ok_or(LedgerError::TotalOutOfRange)
}

// =============================================================================
// Ledger
// =============================================================================

/// A row plus the reactions the ledger attached when it was added.
#[derive(Debug)]
struct Slot {
    row: LedgerRow,
    /// Destroying the row removes it from the ledger.
    remove_on_destroy: bool,
    /// Editing the row triggers a recalculation (new purchase rows).
    recalculate_on_update: bool,
}

/// The journal for one register transaction.
#[derive(Debug)]
pub struct Ledger {
    codes: Arc<CodeBook>,
    slots: Vec<Slot>,
    payment_code: Option<Arc<Code>>,
    amount_tendered: Option<i64>,
    errors: Vec<ValidationFailure>,
    enforce_required_detail: bool,
    recalculating: bool,
    recalculation_pending: bool,
    notifier: Notifier<Ledger>,
}

impl Ledger {
    pub fn new(codes: Arc<CodeBook>) -> Self {
        Ledger {
            codes,
            slots: Vec::new(),
            payment_code: None,
            amount_tendered: None,
            errors: Vec::new(),
            enforce_required_detail: true,
            recalculating: false,
            recalculation_pending: false,
            notifier: Notifier::new("Ledger", &[Event::Update]),
        }
    }

    /// A ledger preloaded with stored rows, in order.
    pub fn with_rows<I>(codes: Arc<CodeBook>, records: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = LedgerRowRecord>,
    {
        let mut ledger = Ledger::new(codes);
        for record in records {
            ledger.add_record(record)?;
        }
        Ok(ledger)
    }

    pub fn codes(&self) -> &Arc<CodeBook> {
        &self.codes
    }

    /// Whether `validate` reports rows whose code requires a detail.
    pub fn set_enforce_required_detail(&mut self, enforce: bool) {
        self.enforce_required_detail = enforce;
    }

    fn resolve_code(&self, code: CodeRef) -> LedgerResult<Arc<Code>> {
        match code {
            CodeRef::Id(id) => self
                .codes
                .find_code(id)
                .cloned()
                .ok_or_else(|| LedgerError::UnknownCode(id.to_string())),
            CodeRef::Code(code) => Ok(code),
        }
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Adds a row built from a code and returns its key.
    ///
    /// ## Errors
    /// - [`LedgerError::UnknownCode`] if the id is not in the code book
    /// - [`LedgerError::UnknownPolarity`] if the code has no natural side
    /// - [`LedgerError::Row`] for a zero amount
    /// - [`LedgerError::MissingChangeCode`] / [`LedgerError::TotalOutOfRange`]
    ///   when the row could not be reconciled; the ledger is left as it was
    pub fn add(&mut self, code_type: CodeType, code: impl Into<CodeRef>, amount: i64) -> LedgerResult<RowKey> {
        let code = self.resolve_code(code.into())?;
        if code.debit_or_credit.is_none() {
            return Err(LedgerError::UnknownPolarity(code.id));
        }
        let row = LedgerRow::from_code(code_type, &code, amount)?;
        self.push_row(row)
    }

    /// Adds a row rebuilt from a stored record.
    pub fn add_record(&mut self, record: LedgerRowRecord) -> LedgerResult<RowKey> {
        let row = LedgerRow::from_record(record)?;
        self.push_row(row)
    }

    pub fn add_purchase(&mut self, code: impl Into<CodeRef>, amount: i64) -> LedgerResult<RowKey> {
        self.add(CodeType::Purchase, code, amount)
    }

    fn push_row(&mut self, row: LedgerRow) -> LedgerResult<RowKey> {
        if let Err(err) = self.plan(&Draft { with: Some(&row), ..self.draft() }) {
            debug!(key = %row.key(), error = %err, "Ledger row rejected");
            return Err(err);
        }
        let key = self.insert_row(row);
        self.recalculate()?;
        Ok(key)
    }

    /// Appends without recalculating; used by the recalculation itself.
    fn insert_row(&mut self, row: LedgerRow) -> RowKey {
        let key = row.key();
        let mutable = row.is_new();
        let slot = Slot {
            remove_on_destroy: mutable,
            recalculate_on_update: mutable && row.is_purchase(),
            row,
        };
        debug!(
            key = %key,
            code_type = %slot.row.code_type(),
            register_code = ?slot.row.register_code(),
            read_only = !mutable,
            "Ledger row added"
        );
        self.slots.push(slot);
        key
    }

    /// Removes a row. Removing a purchase row recalculates.
    pub fn remove(&mut self, key: RowKey) -> LedgerResult<Option<LedgerRow>> {
        let Some(index) = self.index_of(key) else {
            return Ok(None);
        };
        if self.slots[index].row.is_purchase() {
            self.plan(&Draft { without: vec![index], ..self.draft() })?;
        }
        let slot = self.slots.remove(index);
        debug!(key = %key, code_type = %slot.row.code_type(), "Ledger row removed");
        if slot.row.is_purchase() {
            self.recalculate()?;
        }
        Ok(Some(slot.row))
    }

    /// Destroys a row: its `Destroy` listeners run, then the ledger drops it.
    ///
    /// Returns false (and keeps the row) when the row is read-only.
    pub fn destroy_row(&mut self, key: RowKey) -> LedgerResult<bool> {
        let index = self.index_of(key).ok_or(LedgerError::UnknownRow(key))?;
        let remove = self.slots[index].remove_on_destroy;
        if remove && self.slots[index].row.is_purchase() {
            self.plan(&Draft { without: vec![index], ..self.draft() })?;
        }
        if !self.slots[index].row.destroy()? {
            return Ok(false);
        }
        if remove {
            self.remove(key)?;
        }
        Ok(true)
    }

    /// Applies a form edit to one row, recalculating after purchase edits.
    ///
    /// Returns false when the row is read-only. An edit the ledger cannot
    /// reconcile is rolled back before any listener hears of it.
    pub fn update_row(&mut self, key: RowKey, field: RowField, value: &str) -> LedgerResult<bool> {
        let index = self.index_of(key).ok_or(LedgerError::UnknownRow(key))?;
        let before = self.slots[index].row.amounts();
        if !self.slots[index].row.apply(field, value)? {
            return Ok(false);
        }

        let recalculate = self.slots[index].recalculate_on_update;
        let checked = if recalculate {
            self.plan(&self.draft()).map(drop)
        } else {
            self.check_totals()
        };
        if let Err(err) = checked {
            self.slots[index].row.restore_amounts(before);
            debug!(key = %key, error = %err, "Row edit rolled back");
            return Err(err);
        }

        self.slots[index].row.notify_updated()?;
        if recalculate {
            self.recalculate()?;
        }
        Ok(true)
    }

    /// Subscribes to one row's events.
    pub fn subscribe_row<F>(&mut self, key: RowKey, event: Event, listener: F) -> LedgerResult<()>
    where
        F: FnMut(&mut LedgerRow) + 'static,
    {
        let index = self.index_of(key).ok_or(LedgerError::UnknownRow(key))?;
        self.slots[index].row.subscribe(event, listener)?;
        Ok(())
    }

    fn index_of(&self, key: RowKey) -> Option<usize> {
        self.slots.iter().position(|slot| slot.row.key() == key)
    }

    pub fn row(&self, key: RowKey) -> Option<&LedgerRow> {
        self.slots.iter().map(|slot| &slot.row).find(|row| row.key() == key)
    }

    pub fn rows(&self, filter: RowFilter) -> impl Iterator<Item = &LedgerRow> + '_ {
        self.slots
            .iter()
            .map(|slot| &slot.row)
            .filter(move |row| filter.admits(row.is_new()))
    }

    pub fn count(&self, filter: RowFilter) -> usize {
        self.rows(filter).count()
    }

    fn rows_of(&self, code_type: CodeType, filter: RowFilter) -> impl Iterator<Item = &LedgerRow> + '_ {
        self.rows(filter).filter(move |row| row.code_type() == code_type)
    }

    pub fn purchase_rows(&self, filter: RowFilter) -> impl Iterator<Item = &LedgerRow> + '_ {
        self.rows_of(CodeType::Purchase, filter)
    }

    pub fn payment_rows(&self, filter: RowFilter) -> impl Iterator<Item = &LedgerRow> + '_ {
        self.rows_of(CodeType::Payment, filter)
    }

    pub fn change_rows(&self, filter: RowFilter) -> impl Iterator<Item = &LedgerRow> + '_ {
        self.rows_of(CodeType::Change, filter)
    }

    /// The single new payment row, if any.
    pub fn payment_row(&self) -> Option<&LedgerRow> {
        self.payment_rows(RowFilter::New).next()
    }

    /// The single new change row, if any.
    pub fn change_row(&self) -> Option<&LedgerRow> {
        self.change_rows(RowFilter::New).next()
    }

    fn new_row_index(&self, code_type: CodeType) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.row.is_new() && slot.row.code_type() == code_type)
    }

    // -------------------------------------------------------------------------
    // Payment
    // -------------------------------------------------------------------------

    pub fn payment_code(&self) -> Option<&Arc<Code>> {
        self.payment_code.as_ref()
    }

    /// Chooses how the customer settles the transaction.
    ///
    /// Switching to a different code discards the current payment and change
    /// rows before recalculating. Returns the key of the resulting payment
    /// row, if one exists.
    ///
    /// ## Errors
    /// - [`LedgerError::UnknownPaymentCode`] for an id outside the payment,
    ///   adjustment and credit lists
    /// - [`LedgerError::MissingChangeCode`] when the new code leaves change
    ///   to give and no code can carry it; the old code stays in place
    pub fn set_payment_code(&mut self, code: impl Into<CodeRef>) -> LedgerResult<Option<RowKey>> {
        let code = match code.into() {
            CodeRef::Id(id) => self
                .codes
                .payment_code(id)
                .cloned()
                .ok_or_else(|| LedgerError::UnknownPaymentCode(id.to_string()))?,
            CodeRef::Code(code) => code,
        };

        let unchanged = self.payment_code.as_ref().is_some_and(|current| current.id == code.id);
        if !unchanged {
            let discarded = [CodeType::Payment, CodeType::Change]
                .into_iter()
                .filter_map(|code_type| self.new_row_index(code_type))
                .collect();
            self.plan(&Draft {
                payment_code: Some(&code),
                without: discarded,
                ..self.draft()
            })?;

            debug!(code = %code.id, role = ?code.role, "Payment code changed");
            self.destroy_new_row(CodeType::Payment)?;
            self.destroy_new_row(CodeType::Change)?;
            self.payment_code = Some(code);
            self.recalculate()?;
        }

        Ok(self.payment_row().map(LedgerRow::key))
    }

    /// Overrides the target payment amount; `None` falls back to the new
    /// purchase total.
    pub fn set_amount_tendered(&mut self, cents: Option<i64>) -> LedgerResult<()> {
        self.plan(&Draft { amount_tendered: cents, ..self.draft() })?;
        self.amount_tendered = cents;
        trace!(amount_tendered = ?cents, "Amount tendered set");
        self.recalculate()
    }

    /// Form-field variant of [`Ledger::set_amount_tendered`]. Blank text
    /// clears the override.
    pub fn set_amount_tendered_text(&mut self, text: &str) -> LedgerResult<()> {
        if text.trim().is_empty() {
            return self.set_amount_tendered(None);
        }
        let cents = parse_cents(text).map_err(|err| match err {
            CentsError::NotANumber(text) => LedgerError::TenderedNotANumber(text),
            CentsError::Fractional(text) => LedgerError::FractionalTendered(text),
            CentsError::OutOfRange(text) => LedgerError::TenderedOutOfRange(text),
        })?;
        self.set_amount_tendered(Some(cents))
    }

    pub fn amount_tendered(&self) -> Option<i64> {
        self.amount_tendered
    }

    /// The amount the payment row should carry.
    pub fn amount_tendered_or_credited(&self) -> i64 {
        self.amount_tendered
            .unwrap_or_else(|| self.purchase_total(RowFilter::New))
    }

    // -------------------------------------------------------------------------
    // Recalculation
    // -------------------------------------------------------------------------

    /// Brings the payment and change rows in line with the purchases, then
    /// notifies `Update` listeners.
    pub fn recalculate(&mut self) -> LedgerResult<()> {
        if self.recalculating {
            trace!("Recalculation requested mid-pass; deferring");
            self.recalculation_pending = true;
            return Ok(());
        }

        self.recalculating = true;
        let result = self.run_recalculation();
        self.recalculating = false;
        self.recalculation_pending = false;
        result
    }

    fn run_recalculation(&mut self) -> LedgerResult<()> {
        self.reconcile()?;
        events::emit(self, Event::Update, |ledger| &mut ledger.notifier)?;
        if self.recalculation_pending {
            self.reconcile()?;
        }
        let totals = self.totals(RowFilter::New);
        debug!(
            purchase = %totals.purchase,
            payment = %totals.payment,
            change = %totals.change,
            "Ledger recalculated"
        );
        Ok(())
    }

    /// Repeats the payment and change passes until no nested request is left.
    fn reconcile(&mut self) -> LedgerResult<()> {
        loop {
            self.recalculation_pending = false;
            let plan = self.plan(&self.draft())?;
            self.settle(CodeType::Payment, plan.payment, LedgerRow::set_debit)?;
            self.settle(CodeType::Change, plan.change, LedgerRow::set_credit)?;
            if !self.recalculation_pending {
                return Ok(());
            }
        }
    }

    fn draft(&self) -> Draft<'_> {
        Draft {
            payment_code: self.payment_code.as_ref(),
            amount_tendered: self.amount_tendered,
            without: Vec::new(),
            with: None,
        }
    }

    /// Works out what reconciling `draft` does to the payment and change
    /// rows, failing where applying it would.
    ///
    /// The payment row carries the target (tender, else the new purchase
    /// total); the change row carries new payments minus new purchases.
    fn plan(&self, draft: &Draft<'_>) -> LedgerResult<Plan> {
        let rows: Vec<(usize, &LedgerRow)> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(index, _)| !draft.without.contains(index))
            .map(|(index, slot)| (index, &slot.row))
            .chain(draft.with.map(|row| (self.slots.len(), row)))
            .collect();
        let settled_at = |code_type: CodeType| {
            rows.iter()
                .find(|(_, row)| row.is_new() && row.code_type() == code_type)
                .map(|(index, _)| *index)
        };
        let payment_at = settled_at(CodeType::Payment);
        let change_at = settled_at(CodeType::Change);

        let mut purchase: i128 = 0;
        let mut other_payments: i128 = 0;
        for (index, row) in rows.iter().filter(|(_, row)| row.is_new()) {
            if row.is_purchase() {
                purchase += i128::from(row.credit_or_debit());
            } else if row.is_payment() && Some(*index) != payment_at {
                other_payments += i128::from(row.debit_or_credit());
            }
        }

        let target = draft.amount_tendered.map_or(purchase, i128::from);
        let payment = match (target, payment_at, draft.payment_code) {
            (0, None, _) => Settle::Keep,
            (0, Some(_), _) => Settle::Remove,
            (_, Some(_), _) => Settle::Set(postable(target)?),
            (_, None, Some(code)) if code.role.carries_payment_row() => {
                Settle::Create(Self::row_on_debit_side(CodeType::Payment, code, postable(target)?)?)
            }
            (_, None, _) => Settle::Keep,
        };

        let paid = match &payment {
            Settle::Set(cents) => i128::from(*cents),
            Settle::Create(row) => i128::from(row.debit_or_credit()),
            Settle::Keep | Settle::Remove => 0,
        };
        let change = match (other_payments + paid - purchase, change_at, draft.payment_code) {
            (0, None, _) | (_, None, None) => Settle::Keep,
            (0, Some(_), _) => Settle::Remove,
            (cents, Some(_), _) => Settle::Set(postable(cents)?),
            (cents, None, Some(_)) => {
                let code = self
                    .codes
                    .change_code()
                    .ok_or_else(|| LedgerError::MissingChangeCode(self.codes.change_payment_type().to_string()))?;
                Settle::Create(Self::row_on_debit_side(CodeType::Change, code, postable(-cents)?)?)
            }
        };

        let (mut debits, mut credits) = wide_sides(
            rows.iter()
                .filter(|(index, _)| Some(*index) != payment_at && Some(*index) != change_at)
                .map(|(_, row)| *row),
        );
        for (settled_debits, settled_credits) in
            [payment.sides(DebitOrCredit::Debit), change.sides(DebitOrCredit::Credit)]
        {
            debits += settled_debits;
            credits += settled_credits;
        }
        within_range(debits, credits)?;

        Ok(Plan { payment, change })
    }

    fn settle(
        &mut self,
        code_type: CodeType,
        step: Settle,
        post: fn(&mut LedgerRow, i64) -> RowResult<i64>,
    ) -> LedgerResult<()> {
        match step {
            Settle::Keep => {}
            Settle::Remove => self.destroy_new_row(code_type)?,
            Settle::Set(cents) => {
                if let Some(index) = self.new_row_index(code_type) {
                    post(&mut self.slots[index].row, cents)?;
                }
            }
            Settle::Create(row) => {
                self.insert_row(row);
            }
        }
        Ok(())
    }

    /// Builds a row whose `debit_or_credit()` equals `amount`, whatever the
    /// code's natural side.
    fn row_on_debit_side(code_type: CodeType, code: &Code, amount: i64) -> LedgerResult<LedgerRow> {
        let side = code.debit_or_credit.ok_or(LedgerError::UnknownPolarity(code.id))?;
        let signed = match side {
            DebitOrCredit::Debit => Some(amount),
            DebitOrCredit::Credit => amount.checked_neg(),
        };
        let signed = signed.ok_or(LedgerError::TotalOutOfRange)?;
        Ok(LedgerRow::from_code(code_type, code, signed)?)
    }

    fn destroy_new_row(&mut self, code_type: CodeType) -> LedgerResult<()> {
        if let Some(index) = self.new_row_index(code_type) {
            let key = self.slots[index].row.key();
            self.destroy_row(key)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------
    //
    // Every mutation keeps the debit and the credit sum over all rows within
    // `i64`, so none of these can overflow.

    pub fn totals(&self, filter: RowFilter) -> LedgerTotals {
        LedgerTotals {
            purchase: Money::from(self.purchase_total(filter)),
            payment: Money::from(self.payment_total(filter)),
            tendered: Money::from(self.tendered_total(filter)),
            credited: Money::from(self.credited_total(filter)),
            change: Money::from(self.change_total(filter)),
            debits: Money::from(self.debits_total(filter)),
            credits: Money::from(self.credits_total(filter)),
        }
    }

    fn check_totals(&self) -> LedgerResult<()> {
        let (debits, credits) = wide_sides(self.rows(RowFilter::Both));
        within_range(debits, credits)
    }

    /// Sum of purchase rows, credits positive.
    pub fn purchase_total(&self, filter: RowFilter) -> i64 {
        self.purchase_rows(filter).map(LedgerRow::credit_or_debit).sum()
    }

    /// Sum of payment rows, debits positive.
    pub fn payment_total(&self, filter: RowFilter) -> i64 {
        self.payment_rows(filter).map(LedgerRow::debit_or_credit).sum()
    }

    pub fn tendered_total(&self, filter: RowFilter) -> i64 {
        self.payment_rows(filter).filter_map(LedgerRow::debit).sum()
    }

    pub fn credited_total(&self, filter: RowFilter) -> i64 {
        self.payment_rows(filter).filter_map(LedgerRow::credit).sum()
    }

    /// Sum of change rows, credits positive.
    pub fn change_total(&self, filter: RowFilter) -> i64 {
        self.change_rows(filter).map(LedgerRow::credit_or_debit).sum()
    }

    pub fn debits_total(&self, filter: RowFilter) -> i64 {
        self.rows(filter).filter_map(LedgerRow::debit).sum()
    }

    pub fn credits_total(&self, filter: RowFilter) -> i64 {
        self.rows(filter).filter_map(LedgerRow::credit).sum()
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// True when historical rows are present, i.e. this edits a saved payment.
    pub fn reversing(&self) -> bool {
        self.count(RowFilter::Old) > 0
    }

    /// Checks new rows against the historical rows they reverse.
    pub fn validate_reversal(&mut self) -> bool {
        self.errors = validation::check_reversal(self.rows(RowFilter::Old), self.rows(RowFilter::New));
        self.report()
    }

    /// Runs every pre-submission check. Findings land in [`Ledger::errors`].
    pub fn validate(&mut self) -> bool {
        let mut errors = Vec::new();

        if self.change_total(RowFilter::New) < 0 {
            errors.push(ValidationFailure::NegativeChange);
        }

        if self.reversing() {
            errors.extend(validation::check_reversal(self.rows(RowFilter::Old), self.rows(RowFilter::New)));
        } else if let Some(code) = &self.payment_code {
            match code.role {
                CodeRole::Payment if self.tendered_total(RowFilter::New) <= 0 => {
                    errors.push(ValidationFailure::TenderedNotPositive);
                }
                CodeRole::Adjustment
                    if self.tendered_total(RowFilter::New) != 0
                        || self.credited_total(RowFilter::New) != 0
                        || self.change_total(RowFilter::New) != 0 =>
                {
                    errors.push(ValidationFailure::AdjustmentNotZero);
                }
                CodeRole::Credit if self.credited_total(RowFilter::New) <= 0 => {
                    errors.push(ValidationFailure::CreditedNotPositive);
                }
                _ => {}
            }
        }

        let debits = self.debits_total(RowFilter::New);
        let credits = self.credits_total(RowFilter::New);
        if debits != credits {
            errors.push(ValidationFailure::Unbalanced { debits, credits });
        }

        let is_check = self.payment_code.as_ref().is_some_and(|code| code.is_check());
        let new_purchases = self.purchase_rows(RowFilter::New).count();
        let old_purchases = self.purchase_rows(RowFilter::Old).count();
        if new_purchases == 0 && (!is_check || old_purchases > 0) {
            errors.push(ValidationFailure::NoPurchaseCodes);
        }

        if self.enforce_required_detail {
            errors.extend(validation::check_required_detail(self.rows(RowFilter::New)));
        }

        self.errors = errors;
        self.report()
    }

    fn report(&self) -> bool {
        if self.errors.is_empty() {
            debug!("Ledger valid");
            true
        } else {
            warn!(errors = ?self.errors, "Ledger failed validation");
            false
        }
    }

    /// Findings from the most recent `validate` or `validate_reversal`.
    pub fn errors(&self) -> &[ValidationFailure] {
        &self.errors
    }

    // -------------------------------------------------------------------------
    // Output & Events
    // -------------------------------------------------------------------------

    /// Records of the new rows, for submission.
    pub fn serialize(&self) -> Vec<LedgerRowRecord> {
        self.rows(RowFilter::New).map(LedgerRow::serialize).collect()
    }

    pub fn subscribe<F>(&mut self, event: Event, listener: F) -> Result<(), UnknownEventError>
    where
        F: FnMut(&mut Ledger) + 'static,
    {
        self.notifier.subscribe(event, listener)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
