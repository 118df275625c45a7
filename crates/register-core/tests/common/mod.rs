//! Shared fixtures: the codes and stored rows of a small retreat-center
//! register, plus tracing setup.

#![allow(dead_code)]

use register_core::{CodeId, Register, RegisterConfig, RegisterSettings};
use serde_json::{json, Value};
use std::sync::Once;

pub const STORE: CodeId = CodeId(1);
pub const RETREAT: CodeId = CodeId(2);
pub const CASH: CodeId = CodeId(3);
pub const VOUCHER_PAYMENT: CodeId = CodeId(4);
pub const CHECK: CodeId = CodeId(5);
pub const ISSUE_VOUCHER: CodeId = CodeId(6);
pub const GIFT_CERTIFICATE: CodeId = CodeId(7);
pub const TRANSFER: CodeId = CodeId(8);

static TRACING: Once = Once::new();

/// Installs a test subscriber once per test binary. `RUST_LOG` selects the
/// level; nothing is printed by default.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn purchase_codes() -> Value {
    json!([
        {
            "id": 1,
            "code": "ST",
            "label": "Store Purchase",
            "account_number": "4210.000",
            "account_name": "Store Purchase",
            "fee_types": [],
            "account_type": "Income",
            "debit_or_credit": "C",
            "allow_detail": true
        },
        {
            "id": 2,
            "code": "PR",
            "label": "Personal Retreat",
            "account_number": "4100.000",
            "account_name": "Personal Retreat",
            "fee_types": ["guaranteed_privacy", "lodging"],
            "account_type": "Income",
            "debit_or_credit": "C",
            "allow_detail": true
        }
    ])
}

pub fn payment_codes() -> Value {
    json!([
        {
            "id": 3,
            "code": "CA",
            "label": "Cash",
            "account_number": "1010.000",
            "account_name": "Cash",
            "fee_types": [],
            "payment_type": "Cash",
            "account_type": "Asset",
            "debit_or_credit": "D",
            "allow_detail": false
        },
        {
            "id": 4,
            "code": "CVT",
            "label": "Credit Voucher Payment",
            "account_number": "2251.000",
            "account_name": "Credit Vouchers",
            "payment_type": "CreditVoucher",
            "account_type": "Liability",
            "debit_or_credit": "D",
            "allow_detail": false
        },
        {
            "id": 5,
            "code": "CH",
            "label": "Check",
            "account_number": "1900.000",
            "account_name": "Undeposited Funds",
            "payment_type": "Check",
            "account_type": "Asset",
            "debit_or_credit": "D",
            "allow_detail": false
        }
    ])
}

pub fn adjustment_codes() -> Value {
    json!([
        {
            "id": 8,
            "code": "TR",
            "label": "Transfer",
            "account_number": "1950.000",
            "account_name": "Interfund Transfers",
            "payment_type": "Transfer",
            "account_type": "Asset",
            "debit_or_credit": "D",
            "allow_detail": true
        }
    ])
}

pub fn credit_codes() -> Value {
    json!([
        {
            "id": 6,
            "code": "CVTC",
            "label": "Issue Credit Voucher",
            "account_number": "2251.000",
            "account_name": "Credit Vouchers",
            "payment_type": "CreditVoucher",
            "account_type": "Liability",
            "debit_or_credit": "C",
            "allow_detail": false
        },
        {
            "id": 7,
            "code": "GCTC",
            "label": "Gift Certificate Credit",
            "account_number": "2250.000",
            "account_name": "Gift Certificates",
            "payment_type": "GiftCertificate",
            "account_type": "Liability",
            "debit_or_credit": "C",
            "allow_detail": false
        }
    ])
}

/// Stored rows of a saved $32.00 store purchase paid with $40.00 cash.
pub fn stored_ledger() -> Value {
    json!([
        {
            "id": 38,
            "type": "Asset",
            "account_number": "1010.000",
            "account_name": "Cash",
            "debit": null,
            "credit": 800,
            "detail": "",
            "register_code": "CA",
            "code_label": "Change",
            "code_type": "change"
        },
        {
            "id": 37,
            "type": "Asset",
            "account_number": "1010.000",
            "account_name": "Cash",
            "debit": 4000,
            "credit": null,
            "detail": "",
            "register_code": "CA",
            "code_label": "Cash",
            "code_type": "payment"
        },
        {
            "id": 36,
            "type": "Income",
            "account_number": "4210.000",
            "account_name": "Store Purchase",
            "debit": null,
            "credit": 3200,
            "detail": "",
            "register_code": "ST",
            "code_label": "Store Purchase",
            "code_type": "purchase"
        }
    ])
}

/// The same sale as [`stored_ledger`], saved by an older server that wrote
/// amounts as dollars.
pub fn legacy_stored_ledger() -> Value {
    json!([
        {
            "id": 38,
            "type": "Asset",
            "account_number": "1010.000",
            "debit": null,
            "credit": 8.0,
            "register_code": "CA",
            "code_type": "change"
        },
        {
            "id": 37,
            "type": "Asset",
            "account_number": "1010.000",
            "debit": "40.00",
            "credit": null,
            "register_code": "CA",
            "code_type": "payment"
        },
        {
            "id": 36,
            "type": "Income",
            "account_number": "4210.000",
            "debit": null,
            "credit": 32.0,
            "register_code": "ST",
            "code_type": "purchase"
        }
    ])
}

pub fn new_payment_config() -> RegisterConfig {
    serde_json::from_value(json!({
        "purchase_codes": purchase_codes(),
        "payment_codes": payment_codes(),
        "adjustment_codes": adjustment_codes(),
        "credit_codes": credit_codes(),
        "payment": {}
    }))
    .expect("new payment config")
}

pub fn edit_payment_config() -> RegisterConfig {
    serde_json::from_value(json!({
        "purchase_codes": purchase_codes(),
        "payment_codes": payment_codes(),
        "adjustment_codes": adjustment_codes(),
        "credit_codes": credit_codes(),
        "payment": {"id": 12, "type": "Payment"},
        "ledger": stored_ledger()
    }))
    .expect("edit payment config")
}

pub fn new_register() -> Register {
    new_register_with(&RegisterSettings::default())
}

pub fn new_register_with(settings: &RegisterSettings) -> Register {
    init_tracing();
    Register::from_config(new_payment_config(), settings).expect("new register")
}

pub fn edit_register() -> Register {
    init_tracing();
    Register::from_config(edit_payment_config(), &RegisterSettings::default()).expect("edit register")
}
