//! # Money Module
//!
//! The `Money` type plus the text boundary where amounts enter and leave the
//! register.
//!
//! ## Cents Everywhere
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE AMOUNTS CROSS THE BOUNDARY                                       │
//! │                                                                         │
//! │  Cashier types "$45.105" ──► parse_money ──► Money(4511)                │
//! │                              (half away from zero)                      │
//! │                                                                         │
//! │  Form field "4000"       ──► parse_cents ──► 4000                       │
//! │  Form field "40.5"       ──► parse_cents ──► Err(Fractional)            │
//! │  Legacy record "32.00"   ──► parse_money ──► Money(3200)                │
//! │                                                                         │
//! │  Ledger total 4000       ──► to_display  ──► "$40.00"                   │
//! │  Placeholder "n/a"       ──► to_display  ──► "n/a" (pass-through)       │
//! │                                                                         │
//! │  Inside the ledger: ONLY i64 cents. No floats, no dollars.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use register_core::money::{parse_money, Money};
//!
//! let tendered = parse_money("$150").unwrap();
//! assert_eq!(tendered.cents(), 15000);
//! assert_eq!(Money::from_cents(5000).to_display(true), "$50.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::CentsError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: journal amounts flip sign freely (refunds, reversals)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde**: serializes as a bare integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use register_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Formats the amount with exactly two decimal places.
    ///
    /// With `with_sign` the currency sign leads; a minus sign follows it,
    /// which is how the register has always rendered negative change.
    ///
    /// ## Example
    /// ```rust
    /// use register_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(4000).to_display(false), "40.00");
    /// assert_eq!(Money::from_cents(4000).to_display(true), "$40.00");
    /// assert_eq!(Money::from_cents(-5000).to_display(true), "$-50.00");
    /// ```
    pub fn to_display(&self, with_sign: bool) -> String {
        let magnitude = self.0.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            if with_sign { "$" } else { "" },
            if self.0 < 0 { "-" } else { "" },
            magnitude / 100,
            magnitude % 100
        )
    }
}

// =============================================================================
// Text Boundary
// =============================================================================

/// A decimal number as typed: sign, whole digits, fraction digits.
struct DecimalText {
    negative: bool,
    whole: String,
    fraction: String,
}

impl DecimalText {
    /// Accepts an optional sign, an optional `$` (either order), thousands
    /// separators in the whole part and at most one decimal point.
    fn parse(input: &str) -> Option<Self> {
        let mut text = input.trim();
        let mut negative = false;

        if let Some(rest) = text.strip_prefix('-') {
            negative = true;
            text = rest;
        } else if let Some(rest) = text.strip_prefix('+') {
            text = rest;
        }
        if let Some(rest) = text.strip_prefix('$') {
            text = rest;
            if !negative {
                if let Some(rest) = text.strip_prefix('-') {
                    negative = true;
                    text = rest;
                }
            }
        }

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        let whole: String = whole.chars().filter(|c| *c != ',').collect();

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(DecimalText {
            negative,
            whole,
            fraction: fraction.to_string(),
        })
    }

    /// Value × 10^scale, rounded half away from zero. `None` on overflow.
    fn scaled(&self, scale: usize) -> Option<i64> {
        let fraction = self.fraction.as_bytes();
        let mut digits = self.whole.clone();
        for i in 0..scale {
            digits.push(fraction.get(i).map_or('0', |b| *b as char));
        }

        let mut magnitude: i64 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
        if fraction.get(scale).is_some_and(|b| *b >= b'5') {
            magnitude = magnitude.checked_add(1)?;
        }

        Some(if self.negative { -magnitude } else { magnitude })
    }

    /// True when any digit past `scale` fractional places is non-zero.
    fn has_digits_beyond(&self, scale: usize) -> bool {
        self.fraction.bytes().skip(scale).any(|b| b != b'0')
    }
}

/// Parses dollar text into cents, rounding half away from zero.
///
/// Returns `None` for text that is not a number.
///
/// ## Example
/// ```rust
/// use register_core::money::parse_money;
///
/// assert_eq!(parse_money("45.105").map(|m| m.cents()), Some(4511));
/// assert_eq!(parse_money("-$2.50").map(|m| m.cents()), Some(-250));
/// assert_eq!(parse_money("$1,000").map(|m| m.cents()), Some(100000));
/// assert_eq!(parse_money("abc"), None);
/// ```
pub fn parse_money(input: &str) -> Option<Money> {
    parse_dollars(input).ok()
}

/// [`parse_money`] with the reason for a refusal.
pub fn parse_dollars(input: &str) -> Result<Money, CentsError> {
    let decimal = DecimalText::parse(input).ok_or_else(|| CentsError::NotANumber(input.to_string()))?;
    decimal
        .scaled(2)
        .map(Money::from_cents)
        .ok_or_else(|| CentsError::OutOfRange(input.to_string()))
}

/// Parses text that must already be a whole number of cents.
///
/// `"4000"` and `"4000.00"` are accepted; `"40.5"` is rejected as
/// fractional, `"forty"` as not a number and anything past `i64` as out
/// of range.
pub fn parse_cents(input: &str) -> Result<i64, CentsError> {
    let decimal = DecimalText::parse(input).ok_or_else(|| CentsError::NotANumber(input.to_string()))?;
    if decimal.has_digits_beyond(0) {
        return Err(CentsError::Fractional(input.to_string()));
    }
    decimal
        .scaled(0)
        .ok_or_else(|| CentsError::OutOfRange(input.to_string()))
}

/// Formats cents-valued text for display; text that is not a number is
/// returned unchanged.
pub fn to_display(input: &str, with_sign: bool) -> String {
    match DecimalText::parse(input).and_then(|d| d.scaled(0)) {
        Some(cents) => Money::from_cents(cents).to_display(with_sign),
        None => input.to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style rendering for logs (`-$5.50`); the register UI uses
/// [`Money::to_display`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money(cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(1099).cents(), 1099);
        assert_eq!(Money::from(-550), Money::from_cents(-550));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(i64::MIN)), "-$92233720368547758.08");
    }

    #[test]
    fn test_to_display() {
        assert_eq!(Money::from_cents(10000).to_display(false), "100.00");
        assert_eq!(Money::from_cents(5).to_display(true), "$0.05");
        assert_eq!(Money::from_cents(-5000).to_display(true), "$-50.00");
        assert_eq!(Money::from_cents(i64::MIN).to_display(false), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_money_rounds_half_away_from_zero() {
        assert_eq!(parse_money("45.105"), Some(Money::from_cents(4511)));
        assert_eq!(parse_money("45.104"), Some(Money::from_cents(4510)));
        assert_eq!(parse_money("-45.105"), Some(Money::from_cents(-4511)));
        assert_eq!(parse_money("0.005"), Some(Money::from_cents(1)));
    }

    #[test]
    fn test_parse_money_formats() {
        assert_eq!(parse_money("45"), Some(Money::from_cents(4500)));
        assert_eq!(parse_money(" $45.00 "), Some(Money::from_cents(4500)));
        assert_eq!(parse_money("$-45"), Some(Money::from_cents(-4500)));
        assert_eq!(parse_money("-$45"), Some(Money::from_cents(-4500)));
        assert_eq!(parse_money(".5"), Some(Money::from_cents(50)));
        assert_eq!(parse_money("1,234.5"), Some(Money::from_cents(123450)));
    }

    #[test]
    fn test_parse_money_rejects_non_numbers() {
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("$"), None);
        assert_eq!(parse_money("."), None);
        assert_eq!(parse_money("12abc"), None);
        assert_eq!(parse_money("1.2.3"), None);
        assert_eq!(parse_money("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_dollars_reports_why() {
        assert_eq!(parse_dollars("32.00"), Ok(Money::from_cents(3200)));
        assert_eq!(parse_dollars("thirty"), Err(CentsError::NotANumber("thirty".to_string())));
        assert_eq!(
            parse_dollars("92233720368547758.08"),
            Err(CentsError::OutOfRange("92233720368547758.08".to_string()))
        );
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("4000"), Ok(4000));
        assert_eq!(parse_cents("-250"), Ok(-250));
        assert_eq!(parse_cents("4000.00"), Ok(4000));
        assert_eq!(parse_cents("40.5"), Err(CentsError::Fractional("40.5".to_string())));
        assert_eq!(parse_cents("forty"), Err(CentsError::NotANumber("forty".to_string())));
        assert_eq!(parse_cents(""), Err(CentsError::NotANumber(String::new())));
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(CentsError::OutOfRange("99999999999999999999".to_string()))
        );
    }

    #[test]
    fn test_to_display_text_passes_non_numbers_through() {
        assert_eq!(to_display("4000", true), "$40.00");
        assert_eq!(to_display("-5000", false), "-50.00");
        assert_eq!(to_display("n/a", true), "n/a");
        assert_eq!(to_display("", false), "");
    }
}
