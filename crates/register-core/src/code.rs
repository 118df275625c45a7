//! # Register Codes
//!
//! A code names a general-ledger account and how the register may post to
//! it. The server sends four lists of codes; [`CodeBook`] indexes all of
//! them by id.
//!
//! ## Lookup Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CodeBook                                       │
//! │                                                                         │
//! │  purchase_codes ─┐                                                      │
//! │  payment_codes  ─┼──► index: CodeId → Arc<Code>   (ids must not repeat) │
//! │  adjustment_codes┤                                                      │
//! │  credit_codes   ─┘                                                      │
//! │                                                                         │
//! │  find_code(id)                  any role                                │
//! │  payment_code(id)               payment, adjustment, credit             │
//! │  find_code_by_code("ST")        first match in list order               │
//! │  find_code_by_payment_type(..)  first match in list order               │
//! │  change_code()                  first payment code of the change type   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use ts_rs::TS;

use crate::error::{RegisterError, RegisterResult};
use crate::types::{AccountType, CodeId, CodeRole, DebitOrCredit};

/// Payment type of check payments.
pub const CHECK_PAYMENT_TYPE: &str = "Check";

/// Payment type of credit card payments.
pub const CREDIT_CARD_PAYMENT_TYPE: &str = "CreditCard";

// =============================================================================
// Code
// =============================================================================

/// A register code as configured on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Code {
    pub id: CodeId,

    /// Assigned by [`CodeBook`] from the list the code arrived in.
    #[serde(default)]
    pub role: CodeRole,

    /// Short register code the cashier types, e.g. `"ST"`.
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub account_number: Option<String>,

    #[serde(default)]
    pub account_name: Option<String>,

    #[serde(default)]
    pub account_type: Option<AccountType>,

    /// Natural side for a positive amount. A code without one cannot post.
    #[serde(default)]
    pub debit_or_credit: Option<DebitOrCredit>,

    /// Tender kind for payment codes: `"Cash"`, `"Check"`, `"CreditCard"`...
    #[serde(default)]
    pub payment_type: Option<String>,

    #[serde(default)]
    pub fee_types: Vec<String>,

    #[serde(default)]
    pub allows_change: bool,

    #[serde(default)]
    pub allow_detail: bool,

    /// Rows built from this code need a detail before the payment validates.
    #[serde(default)]
    pub require_detail: bool,
}

impl Code {
    /// A bare code with the given id, role and natural side.
    pub fn new(id: i64, role: CodeRole, side: DebitOrCredit) -> Self {
        Code {
            id: CodeId(id),
            role,
            code: None,
            label: None,
            account_number: None,
            account_name: None,
            account_type: None,
            debit_or_credit: Some(side),
            payment_type: None,
            fee_types: Vec::new(),
            allows_change: false,
            allow_detail: false,
            require_detail: false,
        }
    }

    /// The register code text, or the id when the code has none.
    pub fn display_code(&self) -> String {
        self.code.clone().unwrap_or_else(|| self.id.to_string())
    }

    pub fn is_payment_type(&self, payment_type: &str) -> bool {
        self.payment_type.as_deref() == Some(payment_type)
    }

    pub fn is_check(&self) -> bool {
        self.is_payment_type(CHECK_PAYMENT_TYPE)
    }

    pub fn is_credit_card(&self) -> bool {
        self.is_payment_type(CREDIT_CARD_PAYMENT_TYPE)
    }
}

// =============================================================================
// Code Book
// =============================================================================

/// All codes available to one register, indexed by id.
#[derive(Debug, Clone)]
pub struct CodeBook {
    /// Every code in configuration order: purchase, payment, adjustment, credit.
    codes: Vec<Arc<Code>>,
    index: HashMap<CodeId, Arc<Code>>,
    change_code: Option<Arc<Code>>,
    change_payment_type: String,
}

impl CodeBook {
    /// Builds the book, tagging each code with the role of its list.
    ///
    /// Fails with [`RegisterError::OverlappingCodeIds`] when an id appears
    /// twice anywhere across the four lists.
    pub fn new(
        purchase_codes: Vec<Code>,
        payment_codes: Vec<Code>,
        adjustment_codes: Vec<Code>,
        credit_codes: Vec<Code>,
        change_payment_type: &str,
    ) -> RegisterResult<Self> {
        let tagged = [
            (CodeRole::Purchase, purchase_codes),
            (CodeRole::Payment, payment_codes),
            (CodeRole::Adjustment, adjustment_codes),
            (CodeRole::Credit, credit_codes),
        ];

        let mut codes = Vec::new();
        let mut index = HashMap::new();
        for (role, list) in tagged {
            for mut code in list {
                code.role = role;
                let code = Arc::new(code);
                if index.insert(code.id, Arc::clone(&code)).is_some() {
                    return Err(RegisterError::OverlappingCodeIds(code.id));
                }
                codes.push(code);
            }
        }

        let change_code = codes
            .iter()
            .find(|c| c.role == CodeRole::Payment && c.is_payment_type(change_payment_type))
            .cloned();

        debug!(
            codes = codes.len(),
            change_code = ?change_code.as_ref().map(|c| c.id),
            "Code book indexed"
        );

        Ok(CodeBook {
            codes,
            index,
            change_code,
            change_payment_type: change_payment_type.to_string(),
        })
    }

    pub fn find_code(&self, id: CodeId) -> Option<&Arc<Code>> {
        self.index.get(&id)
    }

    /// Looks up a code that may settle a payment (any role but purchase).
    pub fn payment_code(&self, id: CodeId) -> Option<&Arc<Code>> {
        self.find_code(id).filter(|c| c.role.settles_payment())
    }

    pub fn find_code_by_code(&self, code: &str) -> Option<&Arc<Code>> {
        self.codes.iter().find(|c| c.code.as_deref() == Some(code))
    }

    pub fn find_code_by_payment_type(&self, payment_type: &str) -> Option<&Arc<Code>> {
        self.codes
            .iter()
            .find(|c| c.role.settles_payment() && c.is_payment_type(payment_type))
    }

    /// The payment code used to post change back to the customer.
    pub fn change_code(&self) -> Option<&Arc<Code>> {
        self.change_code.as_ref()
    }

    pub fn change_payment_type(&self) -> &str {
        &self.change_payment_type
    }

    pub fn codes(&self, role: CodeRole) -> impl Iterator<Item = &Arc<Code>> + '_ {
        self.codes.iter().filter(move |c| c.role == role)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payment(id: i64, payment_type: &str) -> Code {
        let mut code = Code::new(id, CodeRole::Payment, DebitOrCredit::Debit);
        code.payment_type = Some(payment_type.to_string());
        code
    }

    fn book() -> CodeBook {
        let mut store = Code::new(1, CodeRole::Purchase, DebitOrCredit::Credit);
        store.code = Some("ST".to_string());
        let mut check = payment(5, "Check");
        check.code = Some("CH".to_string());
        CodeBook::new(
            vec![store],
            vec![payment(3, "Cash"), check],
            vec![Code::new(8, CodeRole::Adjustment, DebitOrCredit::Debit)],
            vec![Code::new(6, CodeRole::Credit, DebitOrCredit::Credit)],
            "Cash",
        )
        .unwrap()
    }

    #[test]
    fn test_roles_are_assigned_from_lists() {
        let book = book();
        assert_eq!(book.len(), 5);
        assert_eq!(book.find_code(CodeId(1)).unwrap().role, CodeRole::Purchase);
        assert_eq!(book.find_code(CodeId(8)).unwrap().role, CodeRole::Adjustment);
        assert_eq!(book.codes(CodeRole::Payment).count(), 2);
    }

    #[test]
    fn test_overlapping_ids_are_rejected() {
        let result = CodeBook::new(
            vec![Code::new(1, CodeRole::Purchase, DebitOrCredit::Credit)],
            vec![payment(1, "Cash")],
            vec![],
            vec![],
            "Cash",
        );
        assert!(matches!(result, Err(RegisterError::OverlappingCodeIds(CodeId(1)))));
    }

    #[test]
    fn test_payment_code_excludes_purchase_codes() {
        let book = book();
        assert!(book.payment_code(CodeId(1)).is_none());
        assert!(book.payment_code(CodeId(3)).is_some());
        assert!(book.payment_code(CodeId(6)).is_some());
        assert!(book.payment_code(CodeId(99)).is_none());
    }

    #[test]
    fn test_find_by_code_and_payment_type() {
        let book = book();
        assert_eq!(book.find_code_by_code("ST").unwrap().id, CodeId(1));
        assert_eq!(book.find_code_by_code("CH").unwrap().id, CodeId(5));
        assert!(book.find_code_by_code("ZZ").is_none());
        assert_eq!(book.find_code_by_payment_type("Check").unwrap().id, CodeId(5));
        assert!(book.find_code_by_payment_type("Bitcoin").is_none());
    }

    #[test]
    fn test_change_code_is_first_cash_payment_code() {
        let book = book();
        assert_eq!(book.change_code().unwrap().id, CodeId(3));

        let no_cash = CodeBook::new(vec![], vec![payment(5, "Check")], vec![], vec![], "Cash").unwrap();
        assert!(no_cash.change_code().is_none());
    }

    #[test]
    fn test_code_predicates() {
        assert!(payment(5, "Check").is_check());
        assert!(!payment(5, "Check").is_credit_card());
        assert!(payment(9, "CreditCard").is_credit_card());
    }

    #[test]
    fn test_code_deserializes_server_shape() {
        let code: Code = serde_json::from_value(json!({
            "id": 1,
            "code": "ST",
            "label": "Store Purchase",
            "account_number": "4210.000",
            "account_name": "Store Sales",
            "account_type": "Income",
            "debit_or_credit": "C",
            "fee_types": [],
            "allow_detail": false
        }))
        .unwrap();

        assert_eq!(code.id, CodeId(1));
        assert_eq!(code.account_type, Some(AccountType::Income));
        assert_eq!(code.debit_or_credit, Some(DebitOrCredit::Credit));
        assert_eq!(code.payment_type, None);
        assert!(!code.require_detail);
        assert_eq!(code.display_code(), "ST");
    }
}
