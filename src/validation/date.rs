//! Calendar date validation

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::dates::{self, DATE_FORMAT};

/// Parse `raw` with `format`, rejecting future dates unless `allow_future`
pub fn validate_date(raw: &str, format: &str, allow_future: bool) -> LedgerResult<NaiveDate> {
    validate_date_on(raw, format, allow_future, dates::today())
}

/// Same as [`validate_date`] with an explicit "today"
pub fn validate_date_on(
    raw: &str,
    format: &str,
    allow_future: bool,
    today: NaiveDate,
) -> LedgerResult<NaiveDate> {
    let text = raw.trim();
    let date = NaiveDate::parse_from_str(text, format).map_err(|_| {
        LedgerError::InvalidFormat(format!(
            "'{}' is not a valid date, expected {}",
            text,
            describe_format(format)
        ))
    })?;

    if !allow_future && date > today {
        return Err(LedgerError::FutureDateNotAllowed(date));
    }

    Ok(date)
}

/// Parse both bounds of an inclusive range; future dates are rejected
pub fn validate_date_range(
    start_raw: &str,
    end_raw: &str,
    format: &str,
) -> LedgerResult<(NaiveDate, NaiveDate)> {
    validate_date_range_on(start_raw, end_raw, format, dates::today())
}

pub fn validate_date_range_on(
    start_raw: &str,
    end_raw: &str,
    format: &str,
    today: NaiveDate,
) -> LedgerResult<(NaiveDate, NaiveDate)> {
    let start = validate_date_on(start_raw, format, false, today)?;
    let end = validate_date_on(end_raw, format, false, today)?;

    if start > end {
        return Err(LedgerError::InvalidRange { start, end });
    }

    Ok((start, end))
}

/// Human-readable form of a strftime pattern, e.g. `%d-%m-%Y` -> `DD-MM-YYYY`
pub fn describe_format(format: &str) -> String {
    if format == DATE_FORMAT {
        return "DD-MM-YYYY".to_string();
    }
    format
        .replace("%d", "DD")
        .replace("%m", "MM")
        .replace("%Y", "YYYY")
        .replace("%y", "YY")
}
