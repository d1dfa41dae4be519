//! Input validation
//!
//! Pure functions that turn free-form text into typed, range-checked values.
//! Every mutator in [`crate::ledger`] expects already-validated input.

pub mod amount;
pub mod date;

pub use amount::{parse_amount, validate_amount, AmountRules};
pub use date::{
    describe_format, validate_date, validate_date_on, validate_date_range,
    validate_date_range_on,
};

use crate::error::{LedgerError, LedgerResult};

/// Trim `raw` and reject it when nothing is left
pub fn validate_non_empty(field: &'static str, raw: &str) -> LedgerResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Check a year/month pair used by monthly reports
pub fn validate_year_month(year: i32, month: u32) -> LedgerResult<()> {
    if !(1..=9999).contains(&year) {
        return Err(LedgerError::OutOfRange(format!(
            "year {} must be between 1 and 9999",
            year
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(LedgerError::OutOfRange(format!(
            "month {} must be between 1 and 12",
            month
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(validate_non_empty("category", "  Food ").unwrap(), "Food");
        assert!(matches!(
            validate_non_empty("category", " \t "),
            Err(LedgerError::EmptyField("category"))
        ));
    }

    #[test]
    fn test_year_month() {
        assert!(validate_year_month(2024, 1).is_ok());
        assert!(validate_year_month(2024, 12).is_ok());
        assert!(matches!(
            validate_year_month(2024, 13),
            Err(LedgerError::OutOfRange(_))
        ));
        assert!(matches!(
            validate_year_month(2024, 0),
            Err(LedgerError::OutOfRange(_))
        ));
        assert!(matches!(
            validate_year_month(0, 5),
            Err(LedgerError::OutOfRange(_))
        ));
    }
}
