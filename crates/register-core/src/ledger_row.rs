//! # Ledger Rows
//!
//! One journal line: a debit or a credit against one account.
//!
//! ## Row Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  from_code(Purchase, ST, 4000)        from_record({id: 36, ...})        │
//! │        │                                      │                         │
//! │        ▼                                      ▼                         │
//! │  NEW row (mutable)                    OLD row (read-only, historical)   │
//! │        │                                      │                         │
//! │        ├─ set_debit / set_credit              ├─ mutators refuse        │
//! │        ├─ update(field, text) ─► Update       ├─ destroy() → Ok(false)  │
//! │        └─ destroy() ─────────► Destroy        └─ serialize() only       │
//! │                                                                         │
//! │  Exactly one of debit / credit is set, and it is always positive:      │
//! │    set_debit(-500)  ──►  credit = 500, debit = None                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};
use ts_rs::TS;
use uuid::Uuid;

use crate::code::Code;
use crate::error::{LedgerRowError, RowResult, UnknownEventError};
use crate::events::{self, Event, Notifier};
use crate::money::{parse_cents, parse_dollars};
use crate::types::{AccountType, CodeType, DebitOrCredit};

// =============================================================================
// Row Key
// =============================================================================

/// Process-local handle for a row, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(Uuid);

impl RowKey {
    fn generate() -> Self {
        RowKey(Uuid::new_v4())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable fields, as named by the register form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Debit,
    Credit,
    Detail,
}

// =============================================================================
// Row Record
// =============================================================================

/// An amount as it appears in a stored row. Integers are cents; floats and
/// decimal text come from older servers that stored dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum RawAmount {
    Cents(i64),
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// The amount in whole cents.
    ///
    /// `32.0` and `"32.00"` are both $32 (3200 cents); `"3200"` is 3200
    /// cents. Dollars round half away from zero to the cent.
    pub fn to_cents(&self) -> RowResult<i64> {
        match self {
            RawAmount::Cents(cents) => Ok(*cents),
            RawAmount::Number(n) if !n.is_finite() => Err(LedgerRowError::NotANumber(n.to_string())),
            RawAmount::Number(n) => Ok(parse_dollars(&n.to_string())?.cents()),
            RawAmount::Text(text) if text.trim().is_empty() => Ok(0),
            RawAmount::Text(text) if text.contains('.') => Ok(parse_dollars(text)?.cents()),
            RawAmount::Text(text) => Ok(parse_cents(text)?),
        }
    }
}

/// The flat form of a row: what the server sends for historical rows and
/// what [`LedgerRow::serialize`] produces for submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerRowRecord {
    /// Present only on rows already saved; such rows load read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "type", default)]
    pub account_type: Option<AccountType>,

    #[serde(default)]
    pub account_number: Option<String>,

    #[serde(default)]
    pub account_name: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,

    #[serde(default)]
    pub register_code: Option<String>,

    #[serde(default)]
    pub debit: Option<RawAmount>,

    #[serde(default)]
    pub credit: Option<RawAmount>,

    #[serde(default)]
    pub code_label: Option<String>,

    /// `"purchase"`, `"payment"` or `"change"`.
    #[serde(default)]
    pub code_type: String,

    #[serde(default)]
    pub require_detail: bool,
}

// =============================================================================
// Ledger Row
// =============================================================================

/// A single debit or credit line in the journal.
#[derive(Debug)]
pub struct LedgerRow {
    key: RowKey,
    id: Option<i64>,
    code_type: CodeType,
    account_type: Option<AccountType>,
    account_number: Option<String>,
    account_name: Option<String>,
    register_code: Option<String>,
    code_label: Option<String>,
    detail: Option<String>,
    require_detail: bool,
    debit: Option<i64>,
    credit: Option<i64>,
    read_only: bool,
    notifier: Notifier<LedgerRow>,
}

impl LedgerRow {
    fn blank(code_type: CodeType) -> Self {
        LedgerRow {
            key: RowKey::generate(),
            id: None,
            code_type,
            account_type: None,
            account_number: None,
            account_name: None,
            register_code: None,
            code_label: None,
            detail: None,
            require_detail: false,
            debit: None,
            credit: None,
            read_only: false,
            notifier: Notifier::new("LedgerRow", &[Event::Update, Event::Destroy]),
        }
    }

    /// Builds a new row from a code.
    ///
    /// The amount lands on the code's natural side; a negative amount lands
    /// on the opposite side as its magnitude.
    ///
    /// ## Example
    /// ```rust
    /// use register_core::code::Code;
    /// use register_core::ledger_row::LedgerRow;
    /// use register_core::types::{CodeRole, CodeType, DebitOrCredit};
    ///
    /// let store = Code::new(1, CodeRole::Purchase, DebitOrCredit::Credit);
    /// let row = LedgerRow::from_code(CodeType::Purchase, &store, -500).unwrap();
    /// assert_eq!(row.debit(), Some(500));
    /// assert_eq!(row.credit(), None);
    /// ```
    pub fn from_code(code_type: CodeType, code: &Code, amount: i64) -> RowResult<Self> {
        let side = code.debit_or_credit.ok_or(LedgerRowError::UnknownPolarity(code.id))?;

        let mut row = LedgerRow::blank(code_type);
        row.account_type = code.account_type;
        row.account_number = code.account_number.clone();
        row.account_name = code.account_name.clone();
        row.register_code = code.code.clone();
        row.code_label = code.label.clone();
        row.require_detail = code.require_detail;
        row.post(side, amount)?;

        trace!(key = %row.key, code_type = %code_type, code = %code.id, amount, "Row built from code");
        Ok(row)
    }

    /// Rebuilds a row from its flat record.
    ///
    /// Records carrying an `id` become read-only historical rows.
    pub fn from_record(record: LedgerRowRecord) -> RowResult<Self> {
        let code_type: CodeType = record.code_type.parse()?;

        let debit = record.debit.as_ref().map(RawAmount::to_cents).transpose()?.unwrap_or(0);
        let credit = record.credit.as_ref().map(RawAmount::to_cents).transpose()?.unwrap_or(0);
        if debit != 0 && credit != 0 {
            return Err(LedgerRowError::BothDebitAndCredit { debit, credit });
        }

        let mut row = LedgerRow::blank(code_type);
        row.id = record.id;
        row.account_type = record.account_type;
        row.account_number = record.account_number;
        row.account_name = record.account_name;
        row.register_code = record.register_code;
        row.code_label = record.code_label;
        row.detail = record.detail;
        row.require_detail = record.require_detail;

        if debit != 0 {
            row.post(DebitOrCredit::Debit, debit)?;
        } else {
            row.post(DebitOrCredit::Credit, credit)?;
        }
        row.read_only = row.id.is_some();

        Ok(row)
    }

    /// Stores `amount` on `side`, flipping sides when negative.
    fn post(&mut self, side: DebitOrCredit, amount: i64) -> RowResult<i64> {
        if amount == 0 {
            return Err(LedgerRowError::ZeroAmount);
        }
        let (side, magnitude) = if amount < 0 {
            let magnitude = amount
                .checked_neg()
                .ok_or_else(|| LedgerRowError::OutOfRange(amount.to_string()))?;
            (side.opposite(), magnitude)
        } else {
            (side, amount)
        };
        match side {
            DebitOrCredit::Debit => {
                self.debit = Some(magnitude);
                self.credit = None;
            }
            DebitOrCredit::Credit => {
                self.credit = Some(magnitude);
                self.debit = None;
            }
        }
        Ok(magnitude)
    }

    /// Debit and credit as stored, for rolling back a rejected edit.
    pub(crate) fn amounts(&self) -> (Option<i64>, Option<i64>) {
        (self.debit, self.credit)
    }

    pub(crate) fn restore_amounts(&mut self, (debit, credit): (Option<i64>, Option<i64>)) {
        self.debit = debit;
        self.credit = credit;
    }

    fn ensure_mutable(&self) -> RowResult<()> {
        if self.read_only {
            Err(LedgerRowError::ReadOnly(self.key))
        } else {
            Ok(())
        }
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Sets the debit; a negative value becomes a credit of its magnitude.
    /// Returns the stored magnitude.
    pub fn set_debit(&mut self, cents: i64) -> RowResult<i64> {
        self.ensure_mutable()?;
        self.post(DebitOrCredit::Debit, cents)
    }

    /// Sets the credit; a negative value becomes a debit of its magnitude.
    pub fn set_credit(&mut self, cents: i64) -> RowResult<i64> {
        self.ensure_mutable()?;
        self.post(DebitOrCredit::Credit, cents)
    }

    pub fn set_detail(&mut self, detail: Option<String>) -> RowResult<()> {
        self.ensure_mutable()?;
        self.detail = detail.filter(|d| !d.is_empty());
        Ok(())
    }

    /// Applies a form edit and notifies `Update` listeners.
    ///
    /// Returns `Ok(false)` without touching a read-only row.
    pub fn update(&mut self, field: RowField, value: &str) -> RowResult<bool> {
        if !self.apply(field, value)? {
            return Ok(false);
        }
        self.notify_updated()?;
        Ok(true)
    }

    /// The edit half of [`LedgerRow::update`], without notifying.
    pub(crate) fn apply(&mut self, field: RowField, value: &str) -> RowResult<bool> {
        if self.read_only {
            return Ok(false);
        }
        match field {
            RowField::Debit => {
                self.set_debit(parse_cents(value)?)?;
            }
            RowField::Credit => {
                self.set_credit(parse_cents(value)?)?;
            }
            RowField::Detail => self.set_detail(Some(value.to_string()))?,
        }
        debug!(key = %self.key, field = ?field, "Row updated");
        Ok(true)
    }

    pub(crate) fn notify_updated(&mut self) -> RowResult<()> {
        events::emit(self, Event::Update, |row| &mut row.notifier)?;
        Ok(())
    }

    /// Notifies `Destroy` listeners. Returns `Ok(false)` for a read-only row.
    ///
    /// The row itself stays intact; whoever holds it decides whether to drop it.
    pub fn destroy(&mut self) -> RowResult<bool> {
        if self.read_only {
            return Ok(false);
        }
        debug!(key = %self.key, code_type = %self.code_type, "Row destroyed");
        events::emit(self, Event::Destroy, |row| &mut row.notifier)?;
        Ok(true)
    }

    pub fn subscribe<F>(&mut self, event: Event, listener: F) -> Result<(), UnknownEventError>
    where
        F: FnMut(&mut LedgerRow) + 'static,
    {
        self.notifier.subscribe(event, listener)
    }

    // -------------------------------------------------------------------------
    // Amounts
    // -------------------------------------------------------------------------

    pub fn debit(&self) -> Option<i64> {
        self.debit
    }

    pub fn credit(&self) -> Option<i64> {
        self.credit
    }

    pub fn is_debit(&self) -> bool {
        self.debit.is_some()
    }

    pub fn is_credit(&self) -> bool {
        self.credit.is_some()
    }

    /// Signed amount by GL convention: debit-normal accounts count debits
    /// as positive, credit-normal accounts count credits as positive.
    pub fn amount(&self) -> RowResult<i64> {
        match self.account_type {
            Some(account_type) if account_type.is_debit_normal() => Ok(self.debit_or_credit()),
            Some(_) => Ok(self.credit_or_debit()),
            None => Err(LedgerRowError::UnknownAccountType(self.key)),
        }
    }

    /// Credit as positive, debit as negative.
    pub fn credit_or_debit(&self) -> i64 {
        self.credit.unwrap_or(0) - self.debit.unwrap_or(0)
    }

    /// Debit as positive, credit as negative.
    pub fn debit_or_credit(&self) -> i64 {
        self.debit.unwrap_or(0) - self.credit.unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn code_type(&self) -> CodeType {
        self.code_type
    }

    pub fn account_type(&self) -> Option<AccountType> {
        self.account_type
    }

    pub fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }

    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    pub fn register_code(&self) -> Option<&str> {
        self.register_code.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.code_label.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn require_detail(&self) -> bool {
        self.require_detail
    }

    /// True when detail is required but blank.
    pub fn is_missing_detail(&self) -> bool {
        self.require_detail && self.detail.as_deref().map_or(true, |d| d.trim().is_empty())
    }

    pub fn is_new(&self) -> bool {
        !self.read_only
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_purchase(&self) -> bool {
        self.code_type == CodeType::Purchase
    }

    pub fn is_payment(&self) -> bool {
        self.code_type == CodeType::Payment
    }

    pub fn is_change(&self) -> bool {
        self.code_type == CodeType::Change
    }

    /// The flat record for submission. The id is left out, so a serialized
    /// row always rehydrates as a new row.
    pub fn serialize(&self) -> LedgerRowRecord {
        LedgerRowRecord {
            id: None,
            account_type: self.account_type,
            account_number: self.account_number.clone(),
            account_name: self.account_name.clone(),
            detail: self.detail.clone(),
            register_code: self.register_code.clone(),
            debit: self.debit.map(RawAmount::Cents),
            credit: self.credit.map(RawAmount::Cents),
            code_label: self.code_label.clone(),
            code_type: self.code_type.to_string(),
            require_detail: self.require_detail,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CodeRole;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_code() -> Code {
        let mut code = Code::new(1, CodeRole::Purchase, DebitOrCredit::Credit);
        code.code = Some("ST".to_string());
        code.label = Some("Store Purchase".to_string());
        code.account_number = Some("4210.000".to_string());
        code.account_type = Some(AccountType::Income);
        code
    }

    fn cash_code() -> Code {
        let mut code = Code::new(3, CodeRole::Payment, DebitOrCredit::Debit);
        code.code = Some("CA".to_string());
        code.account_type = Some(AccountType::Asset);
        code.payment_type = Some("Cash".to_string());
        code
    }

    fn historical_payment() -> LedgerRowRecord {
        serde_json::from_value(json!({
            "id": 37,
            "type": "Asset",
            "account_number": "1010.000",
            "account_name": "Cash",
            "register_code": "CA",
            "debit": 4000,
            "credit": null,
            "code_label": "Cash",
            "code_type": "payment"
        }))
        .unwrap()
    }

    #[test]
    fn test_from_code_uses_natural_side() {
        let row = LedgerRow::from_code(CodeType::Purchase, &store_code(), 4000).unwrap();
        assert_eq!(row.credit(), Some(4000));
        assert_eq!(row.debit(), None);
        assert_eq!(row.register_code(), Some("ST"));
        assert_eq!(row.label(), Some("Store Purchase"));
        assert!(row.is_new());
        assert!(row.is_purchase());
    }

    #[test]
    fn test_from_code_rejects_zero_and_missing_side() {
        assert_eq!(
            LedgerRow::from_code(CodeType::Purchase, &store_code(), 0).unwrap_err(),
            LedgerRowError::ZeroAmount
        );

        let mut sideless = store_code();
        sideless.debit_or_credit = None;
        assert!(matches!(
            LedgerRow::from_code(CodeType::Purchase, &sideless, 100),
            Err(LedgerRowError::UnknownPolarity(_))
        ));
    }

    #[test]
    fn test_sign_flip() {
        let mut row = LedgerRow::from_code(CodeType::Payment, &cash_code(), 100).unwrap();

        assert_eq!(row.set_debit(-500), Ok(500));
        assert_eq!(row.credit(), Some(500));
        assert_eq!(row.debit(), None);

        assert_eq!(row.set_credit(-250), Ok(250));
        assert_eq!(row.debit(), Some(250));
        assert_eq!(row.credit(), None);

        assert_eq!(row.set_debit(0), Err(LedgerRowError::ZeroAmount));
        assert_eq!(row.debit(), Some(250));
    }

    #[test]
    fn test_gl_amount_convention() {
        let mut income = LedgerRow::from_code(CodeType::Purchase, &store_code(), 4000).unwrap();
        assert_eq!(income.amount(), Ok(4000));
        income.set_debit(1000).unwrap();
        assert_eq!(income.amount(), Ok(-1000));

        let asset = LedgerRow::from_code(CodeType::Payment, &cash_code(), 4000).unwrap();
        assert_eq!(asset.amount(), Ok(4000));
        assert_eq!(asset.debit_or_credit(), 4000);
        assert_eq!(asset.credit_or_debit(), -4000);

        let mut untyped = store_code();
        untyped.account_type = None;
        let row = LedgerRow::from_code(CodeType::Purchase, &untyped, 100).unwrap();
        assert!(matches!(row.amount(), Err(LedgerRowError::UnknownAccountType(_))));
    }

    #[test]
    fn test_historical_rows_are_read_only() {
        let mut row = LedgerRow::from_record(historical_payment()).unwrap();
        assert!(row.is_read_only());
        assert_eq!(row.id(), Some(37));
        assert_eq!(row.debit(), Some(4000));

        assert!(matches!(row.set_debit(100), Err(LedgerRowError::ReadOnly(_))));
        assert_eq!(row.update(RowField::Debit, "100"), Ok(false));
        assert_eq!(row.destroy(), Ok(false));
        assert_eq!(row.debit(), Some(4000));
    }

    #[test]
    fn test_from_record_validation() {
        let mut record = historical_payment();
        record.credit = Some(RawAmount::Cents(100));
        assert_eq!(
            LedgerRow::from_record(record).unwrap_err(),
            LedgerRowError::BothDebitAndCredit { debit: 4000, credit: 100 }
        );

        let mut record = historical_payment();
        record.code_type = "refund".to_string();
        assert!(matches!(LedgerRow::from_record(record), Err(LedgerRowError::UnknownCodeType(_))));

        let mut record = historical_payment();
        record.debit = Some(RawAmount::Text("forty".to_string()));
        assert!(matches!(LedgerRow::from_record(record), Err(LedgerRowError::NotANumber(_))));

        let mut record = historical_payment();
        record.debit = None;
        assert_eq!(LedgerRow::from_record(record).unwrap_err(), LedgerRowError::ZeroAmount);
    }

    #[test]
    fn test_raw_amount_forms() {
        assert_eq!(RawAmount::Cents(800).to_cents(), Ok(800));
        assert_eq!(RawAmount::Text("800".to_string()).to_cents(), Ok(800));
        assert_eq!(RawAmount::Text(String::new()).to_cents(), Ok(0));
        assert!(RawAmount::Text("eight".to_string()).to_cents().is_err());

        let parsed: RawAmount = serde_json::from_value(json!(8.0)).unwrap();
        assert_eq!(parsed, RawAmount::Number(8.0));
        let parsed: RawAmount = serde_json::from_value(json!(8)).unwrap();
        assert_eq!(parsed, RawAmount::Cents(8));
    }

    #[test]
    fn test_legacy_dollar_amounts() {
        assert_eq!(RawAmount::Number(32.0).to_cents(), Ok(3200));
        assert_eq!(RawAmount::Number(40.5).to_cents(), Ok(4050));
        assert_eq!(RawAmount::Text("32.00".to_string()).to_cents(), Ok(3200));
        assert_eq!(RawAmount::Text("$45.105".to_string()).to_cents(), Ok(4511));
        assert_eq!(RawAmount::Number(f64::NAN).to_cents(), Err(LedgerRowError::NotANumber("NaN".to_string())));
        assert!(matches!(RawAmount::Number(1e30).to_cents(), Err(LedgerRowError::OutOfRange(_))));

        let mut record = historical_payment();
        record.debit = Some(RawAmount::Text("40.00".to_string()));
        let row = LedgerRow::from_record(record).unwrap();
        assert_eq!(row.debit(), Some(4000));

        let record: LedgerRowRecord = serde_json::from_value(json!({
            "id": 36,
            "type": "Income",
            "register_code": "ST",
            "credit": 32.0,
            "code_type": "purchase"
        }))
        .unwrap();
        assert_eq!(LedgerRow::from_record(record).unwrap().credit(), Some(3200));
    }

    #[test]
    fn test_extreme_amounts() {
        assert_eq!(
            LedgerRow::from_code(CodeType::Purchase, &store_code(), i64::MIN).unwrap_err(),
            LedgerRowError::OutOfRange(i64::MIN.to_string())
        );

        let mut row = LedgerRow::from_code(CodeType::Purchase, &store_code(), i64::MAX).unwrap();
        assert_eq!(row.credit(), Some(i64::MAX));
        assert_eq!(row.debit_or_credit(), -i64::MAX);

        assert!(matches!(row.set_debit(i64::MIN), Err(LedgerRowError::OutOfRange(_))));
        assert_eq!(row.credit(), Some(i64::MAX));
        assert_eq!(row.set_debit(-i64::MAX), Ok(i64::MAX));
    }

    #[test]
    fn test_update_emits_and_parses() {
        let mut row = LedgerRow::from_code(CodeType::Purchase, &store_code(), 4000).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        row.subscribe(Event::Update, move |row: &mut LedgerRow| {
            sink.borrow_mut().push(row.credit_or_debit());
        })
        .unwrap();

        assert_eq!(row.update(RowField::Credit, "2500"), Ok(true));
        assert_eq!(row.update(RowField::Debit, "300"), Ok(true));
        assert_eq!(*seen.borrow(), vec![2500, -300]);

        assert!(matches!(row.update(RowField::Credit, "25.5"), Err(LedgerRowError::FractionalCents(_))));
        assert!(matches!(row.update(RowField::Credit, "abc"), Err(LedgerRowError::NotANumber(_))));
        assert_eq!(seen.borrow().len(), 2);

        assert_eq!(row.update(RowField::Detail, "gift wrap"), Ok(true));
        assert_eq!(row.detail(), Some("gift wrap"));
    }

    #[test]
    fn test_destroy_notifies_listeners() {
        let mut row = LedgerRow::from_code(CodeType::Purchase, &store_code(), 4000).unwrap();
        let destroyed = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&destroyed);
        row.subscribe(Event::Destroy, move |_: &mut LedgerRow| *flag.borrow_mut() = true)
            .unwrap();

        assert_eq!(row.destroy(), Ok(true));
        assert!(*destroyed.borrow());
    }

    #[test]
    fn test_missing_detail() {
        let mut code = store_code();
        code.require_detail = true;
        let mut row = LedgerRow::from_code(CodeType::Purchase, &code, 100).unwrap();
        assert!(row.is_missing_detail());
        row.set_detail(Some("  ".to_string())).unwrap();
        assert!(row.is_missing_detail());
        row.set_detail(Some("PO 1182".to_string())).unwrap();
        assert!(!row.is_missing_detail());
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut row = LedgerRow::from_code(CodeType::Purchase, &store_code(), 4000).unwrap();
        row.set_detail(Some("layaway".to_string())).unwrap();

        let record = row.serialize();
        assert_eq!(record.code_type, "purchase");
        assert_eq!(record.credit, Some(RawAmount::Cents(4000)));
        assert_eq!(record.debit, None);

        let copy = LedgerRow::from_record(record.clone()).unwrap();
        assert!(copy.is_new());
        assert_eq!(copy.serialize(), record);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Income");
        assert_eq!(json["debit"], serde_json::Value::Null);
        assert!(json.get("id").is_none());
    }
}
