//! Monthly date stepping
//!
//! Every periodic schedule in the crate (mortgage payments, insurance,
//! maintenance, early repayments, rent cheques) is dated with
//! [`advance_months`], which keeps the day of month of the base date and
//! clamps it to the last day of shorter months.

use crate::error::{ConfigError, Result};
use chrono::{Datelike, NaiveDate};

/// Date format accepted for all configured dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Gregorian leap year: divisible by 4, and not by 100 unless by 400
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Date `months` months after `base`, on the same day of month or the last
/// valid day of the target month.
///
/// ```
/// use chrono::NaiveDate;
/// use rent_vs_buy::calendar::advance_months;
///
/// let base = NaiveDate::from_ymd_opt(2084, 1, 31).unwrap();
/// assert_eq!(advance_months(base, 1), NaiveDate::from_ymd_opt(2084, 2, 29).unwrap());
/// ```
pub fn advance_months(base: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = base.month0() as i64 + months as i64;
    let year = base.year() as i64 + zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;

    // Years beyond chrono's range saturate at the latest representable date
    let Ok(year) = i32::try_from(year) else {
        return NaiveDate::MAX;
    };
    let day = base.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

/// Parse a configured `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parse a configured date, naming the offending field on failure
pub fn parse_date_field(field: &'static str, value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| ConfigError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
