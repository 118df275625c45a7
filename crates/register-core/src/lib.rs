//! # register-core: Ledger Reconciliation for the POS Register
//!
//! Builds the double-entry journal behind a point-of-sale payment: the
//! cashier enters purchases, picks how the customer pays, and this crate
//! keeps the payment and change rows consistent and checks the result
//! before it is submitted.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Register Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Register UI (TypeScript)                     │   │
//! │  │   purchase lines ──► tender field ──► payment type ──► submit   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ edits in, `update` events out          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ register-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   code    │  │ ledger_row│  │  ledger   │  │ register  │  │   │
//! │  │   │ CodeBook  │  │ sign flip │  │ payment & │  │ config →  │  │   │
//! │  │   │  roles    │  │ GL amount │  │ change    │  │ submission│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   INTEGER CENTS • SYNCHRONOUS EVENTS • NO NETWORK              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RegisterSubmission (JSON)              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Accounting server (not here)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money`, dollar/cent parsing and display
//! - [`types`] - Shared enums (account type, code role, row filter...)
//! - [`code`] - Register codes and the `CodeBook`
//! - [`events`] - Synchronous listener registry
//! - [`ledger_row`] - One journal line
//! - [`ledger`] - The journal and its reconciliation
//! - [`validation`] - Reversal and required-detail checks
//! - [`payment`] - Payment paperwork
//! - [`register`] / [`registry`] - Open registers
//! - [`config`] - Server config (JSON) and settings (TOML)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use register_core::{Register, RegisterConfig, RegisterSettings, RowFilter};
//!
//! let config = RegisterConfig::from_json(r#"{
//!     "purchase_codes": [{"id": 1, "code": "ST", "account_type": "Income", "debit_or_credit": "C"}],
//!     "payment_codes": [{"id": 3, "code": "CA", "account_type": "Asset", "debit_or_credit": "D", "payment_type": "Cash"}]
//! }"#).unwrap();
//!
//! let mut register = Register::from_config(config, &RegisterSettings::default()).unwrap();
//! register.switch_payment_code_to("Cash").unwrap();
//! register.add_purchase("ST", 10000).unwrap();
//! register.ledger_mut().set_amount_tendered(Some(15000)).unwrap();
//!
//! assert_eq!(register.ledger().change_total(RowFilter::New), 5000);
//! assert!(register.validate());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod code;
pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod ledger_row;
pub mod money;
pub mod payment;
pub mod register;
pub mod registry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use code::{Code, CodeBook};
pub use config::{RegisterConfig, RegisterSettings};
pub use error::{
    ConfigError, LedgerError, LedgerRowError, RegisterError, UnknownEventError, ValidationFailure,
};
pub use events::Event;
pub use ledger::{CodeRef, Ledger, LedgerTotals};
pub use ledger_row::{LedgerRow, LedgerRowRecord, RawAmount, RowField, RowKey};
pub use money::Money;
pub use payment::{Payment, PaymentRecord};
pub use register::{Register, RegisterSubmission, NEW_MARKER};
pub use registry::RegisterRegistry;
pub use types::*;
