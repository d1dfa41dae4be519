//! Monetary amount validation
//!
//! Turns free-form text such as `"R$ 1.234,56"` or `"1,234.56"` into a
//! [`Money`] value and applies sign, zero and range constraints.
//!
//! Separator rule: when both `.` and `,` occur, the rightmost one is the
//! decimal separator and the other is a thousands separator. A lone `,` is a
//! decimal separator. More than one of either separator is rejected.
//!
//! Apart from the known currency symbols and whitespace, any character that
//! is not a digit, separator or leading minus makes the text invalid.

use std::fmt;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Symbols stripped before parsing; `R$` must precede `$`
const CURRENCY_SYMBOLS: [&str; 5] = ["R$", "$", "€", "£", "¥"];

/// Constraints applied to a parsed amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRules {
    pub allow_negative: bool,
    pub allow_zero: bool,
    pub min: Option<Money>,
    pub max: Option<Money>,
}

impl Default for AmountRules {
    fn default() -> Self {
        Self {
            allow_negative: false,
            allow_zero: true,
            min: None,
            max: None,
        }
    }
}

impl AmountRules {
    /// Default rules: non-negative, zero allowed, unbounded
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for amounts that must be strictly positive
    pub fn positive() -> Self {
        Self::default().allow_zero(false)
    }

    pub fn allow_negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    pub fn allow_zero(mut self, allow: bool) -> Self {
        self.allow_zero = allow;
        self
    }

    pub fn min(mut self, min: Money) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: Money) -> Self {
        self.max = Some(max);
        self
    }

    /// Apply the constraints to an already parsed value
    pub fn check(&self, value: Money) -> LedgerResult<()> {
        if !self.allow_negative && value.is_negative() {
            return Err(LedgerError::OutOfRange(
                "negative amounts are not allowed".into(),
            ));
        }
        if !self.allow_zero && value.is_zero() {
            return Err(LedgerError::OutOfRange("zero is not allowed".into()));
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(LedgerError::OutOfRange(format!(
                    "amount must not be greater than {}",
                    max
                )));
            }
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(LedgerError::OutOfRange(format!(
                    "amount must not be less than {}",
                    min
                )));
            }
        }
        Ok(())
    }
}

/// Parse and constrain an amount
///
/// Accepts anything displayable, so both text and numbers go through the
/// same normalization.
///
/// # Examples
/// ```
/// use pocket_ledger::validation::{validate_amount, AmountRules};
///
/// let amount = validate_amount("R$ 1.234,56", &AmountRules::new()).unwrap();
/// assert_eq!(amount.cents(), 123456);
/// assert!(validate_amount("-5", &AmountRules::new()).is_err());
/// ```
pub fn validate_amount<T: fmt::Display>(raw: T, rules: &AmountRules) -> LedgerResult<Money> {
    let value = parse_amount(&raw.to_string())?;
    rules.check(value)?;
    Ok(value)
}

/// Parse an amount without applying sign or zero rules
///
/// Magnitudes above [`Money::MAX`] are `OutOfRange`.
pub fn parse_amount(raw: &str) -> LedgerResult<Money> {
    let invalid = || LedgerError::InvalidFormat(format!("'{}' is not a valid amount", raw.trim()));

    let stripped = CURRENCY_SYMBOLS
        .iter()
        .fold(raw.trim().to_string(), |text, symbol| text.replace(symbol, ""));
    if stripped
        .chars()
        .any(|c| !(c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | ',' | '-')))
    {
        return Err(invalid());
    }
    let cleaned: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.matches('.').count() > 1 || cleaned.matches(',').count() > 1 {
        return Err(LedgerError::InvalidFormat(format!(
            "'{}' has more than one separator of the same kind",
            raw.trim()
        )));
    }

    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    let (negative, body) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.as_str()),
    };
    if body.contains('-') {
        return Err(invalid());
    }

    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }

    let overflow = || LedgerError::OutOfRange(format!("'{}' is too large", raw.trim()));

    let units: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| overflow())?
    };

    let mut digits = frac_part.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|d| d >= 5);
    let cents = tenths * 10 + hundredths + i64::from(round_up);

    let total = units
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .filter(|v| *v <= Money::MAX.cents())
        .ok_or_else(overflow)?;

    Ok(Money::from_cents(if negative { -total } else { total }))
}
