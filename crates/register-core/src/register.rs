//! # Register
//!
//! One open register: the code book, the ledger and the payment, built
//! from the server's [`RegisterConfig`].
//!
//! ## User Workflow
//! ```text
//! Server sends RegisterConfig
//!      │
//!      ▼
//! Register::from_config ──► CodeBook (ids checked for overlap)
//!      │                    Ledger   (stored rows loaded read-only)
//!      │                    Payment
//!      ▼
//! Cashier: add_purchase("ST", 4000)
//!          switch_payment_code_to("Check")
//!          ledger_mut().set_amount_tendered(...)
//!      │
//!      ▼
//! validate() ──► serialize() ──► { payment, ledger_entries_attributes }
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::code::{Code, CodeBook};
use crate::config::{RegisterConfig, RegisterSettings};
use crate::error::{RegisterError, RegisterResult, UnknownEventError, ValidationFailure};
use crate::events::Event;
use crate::ledger::Ledger;
use crate::ledger_row::{LedgerRowRecord, RowKey};
use crate::payment::{Payment, PaymentRecord};
use crate::types::{CodeId, RowFilter};

/// Register id used while the payment has not been saved.
pub const NEW_MARKER: &str = "__new__";

/// What the register submits to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterSubmission {
    pub payment: PaymentRecord,
    pub ledger_entries_attributes: Vec<LedgerRowRecord>,
}

/// A register bound to one payment.
#[derive(Debug)]
pub struct Register {
    codes: Arc<CodeBook>,
    ledger: Ledger,
    payment: Payment,
}

impl Register {
    /// Builds a register from the server's configuration.
    ///
    /// ## Errors
    /// - [`RegisterError::OverlappingCodeIds`] if two codes share an id
    /// - [`RegisterError::Ledger`] if a stored row cannot be loaded
    pub fn from_config(config: RegisterConfig, settings: &RegisterSettings) -> RegisterResult<Self> {
        let codes = Arc::new(CodeBook::new(
            config.purchase_codes,
            config.payment_codes,
            config.adjustment_codes,
            config.credit_codes,
            &settings.change_payment_type,
        )?);

        let mut ledger = Ledger::with_rows(Arc::clone(&codes), config.ledger)?;
        ledger.set_enforce_required_detail(settings.enforce_required_detail);

        let register = Register {
            codes,
            ledger,
            payment: Payment::new(config.payment),
        };

        info!(
            register = %register.id(),
            codes = register.codes.len(),
            stored_rows = register.ledger.count(RowFilter::Old),
            "Register opened"
        );
        Ok(register)
    }

    /// The payment id as text, or [`NEW_MARKER`] for an unsaved payment.
    pub fn id(&self) -> String {
        self.payment
            .id()
            .map_or_else(|| NEW_MARKER.to_string(), |id| id.to_string())
    }

    pub fn is_new(&self) -> bool {
        self.payment.is_new()
    }

    pub fn codes(&self) -> &CodeBook {
        &self.codes
    }

    pub fn find_code(&self, id: CodeId) -> Option<&Arc<Code>> {
        self.codes.find_code(id)
    }

    pub fn change_code(&self) -> Option<&Arc<Code>> {
        self.codes.change_code()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    /// Adds a purchase by register code (`"ST"`) or by id text (`"1"`).
    pub fn add_purchase(&mut self, code: &str, amount: i64) -> RegisterResult<RowKey> {
        let resolved = match self.codes.find_code_by_code(code) {
            Some(found) => Arc::clone(found),
            None => code
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|id| self.codes.find_code(CodeId(id)))
                .cloned()
                .ok_or_else(|| RegisterError::UnknownRegisterCode(code.to_string()))?,
        };
        debug!(code = %resolved.display_code(), amount, "Adding purchase");
        Ok(self.ledger.add_purchase(resolved, amount)?)
    }

    /// Switches the payment code to the first code with `payment_type`.
    pub fn switch_payment_code_to(&mut self, payment_type: &str) -> RegisterResult<Option<RowKey>> {
        let code = self
            .codes
            .find_code_by_payment_type(payment_type)
            .cloned()
            .ok_or_else(|| RegisterError::UnknownPaymentType(payment_type.to_string()))?;
        Ok(self.ledger.set_payment_code(code)?)
    }

    /// The payment code in effect. Tried in order: the code chosen in this
    /// session, the code whose payment type matches the payment's `type`,
    /// and the code of a stored payment row.
    pub fn payment_code(&self) -> Option<&Arc<Code>> {
        self.ledger
            .payment_code()
            .or_else(|| {
                self.payment
                    .payment_type()
                    .and_then(|payment_type| self.codes.find_code_by_payment_type(payment_type))
            })
            .or_else(|| {
                self.ledger
                    .payment_rows(RowFilter::Old)
                    .find_map(|row| row.register_code())
                    .and_then(|code| self.codes.find_code_by_code(code))
            })
    }

    pub fn validate(&mut self) -> bool {
        self.ledger.validate()
    }

    pub fn errors(&self) -> &[ValidationFailure] {
        self.ledger.errors()
    }

    /// The payment plus the new ledger rows, ready to submit.
    pub fn serialize(&self) -> RegisterSubmission {
        RegisterSubmission {
            payment: self.payment.record().clone(),
            ledger_entries_attributes: self.ledger.serialize(),
        }
    }

    pub fn subscribe<F>(&mut self, event: Event, listener: F) -> Result<(), UnknownEventError>
    where
        F: FnMut(&mut Ledger) + 'static,
    {
        self.ledger.subscribe(event, listener)
    }
}
