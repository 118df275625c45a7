//! # Payment
//!
//! General information about the payment the register is creating or
//! editing. The ledger holds the money; this holds the paperwork.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The payment as sent by the server. Unknown fields are kept and
/// submitted back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Present once the payment has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A payment being created (no id) or edited (has an id).
#[derive(Debug, Clone, Default)]
pub struct Payment {
    record: PaymentRecord,
}

impl Payment {
    pub fn new(record: PaymentRecord) -> Self {
        Payment { record }
    }

    pub fn id(&self) -> Option<i64> {
        self.record.id
    }

    /// True until the server has saved this payment.
    pub fn is_new(&self) -> bool {
        self.record.id.is_none()
    }

    pub fn payment_type(&self) -> Option<&str> {
        self.record.payment_type.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.record.date
    }

    pub fn user_id(&self) -> Option<&str> {
        self.record.user_id.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.record.note.as_deref()
    }

    /// A field the register does not model explicitly.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.record.extra.get(name)
    }

    pub fn record(&self) -> &PaymentRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_payment() {
        let payment = Payment::new(PaymentRecord::default());
        assert!(payment.is_new());
        assert_eq!(payment.id(), None);
    }

    #[test]
    fn test_saved_payment_keeps_unknown_fields() {
        let record: PaymentRecord = serde_json::from_value(json!({
            "id": 12,
            "type": "Payment",
            "date": "2011-04-18",
            "user_id": "106",
            "check_number": "2231"
        }))
        .unwrap();
        let payment = Payment::new(record);

        assert!(!payment.is_new());
        assert_eq!(payment.id(), Some(12));
        assert_eq!(payment.date(), NaiveDate::from_ymd_opt(2011, 4, 18));
        assert_eq!(payment.user_id(), Some("106"));
        assert_eq!(payment.field("check_number"), Some(&json!("2231")));

        let out = serde_json::to_value(payment.record()).unwrap();
        assert_eq!(out["check_number"], "2231");
        assert_eq!(out["type"], "Payment");
        assert!(out.get("note").is_none());
    }
}
