//! Configuration errors
//!
//! Everything that can go wrong is caught while building parameters. The
//! monthly simulation loops never fail once they have valid inputs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidFraction { field: &'static str, value: f64 },

    #[error("{field} must be at least one month")]
    InvalidInterval { field: &'static str },

    #[error("rent cheques must divide 12, got {cheques}")]
    InvalidRentCheques { cheques: u32 },

    #[error("{field} of {years} years exceeds the {max} year projection limit")]
    TermTooLong {
        field: &'static str,
        years: u32,
        max: u32,
    },

    #[error("initial rate period of {initial_years} years exceeds the {total_years} year term")]
    InitialPeriodTooLong { initial_years: u32, total_years: u32 },

    #[error("loan principal {principal} exceeds property price {property_price}")]
    PrincipalExceedsPrice { principal: f64, property_price: f64 },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed repayment CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Longest term, in years, any projection runs for
pub const MAX_TERM_YEARS: u32 = 200;

/// Reject negative values, accepting zero.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if value < 0.0 || value.is_nan() {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(value)
}

/// Reject zero and negative values.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if value <= 0.0 || value.is_nan() {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(value)
}

/// Reject year counts beyond [`MAX_TERM_YEARS`], keeping month arithmetic in range.
pub(crate) fn ensure_term_years(field: &'static str, years: u32) -> Result<u32> {
    if years > MAX_TERM_YEARS {
        return Err(ConfigError::TermTooLong {
            field,
            years,
            max: MAX_TERM_YEARS,
        });
    }
    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ensure_positive("principal", -5.0).unwrap_err();
        assert_eq!(err.to_string(), "principal must be positive, got -5");

        let err = ensure_non_negative("valuation_fee", -1.0).unwrap_err();
        assert!(err.to_string().contains("valuation_fee"));
    }

    #[test]
    fn test_zero_is_non_negative_but_not_positive() {
        assert!(ensure_non_negative("fee", 0.0).is_ok());
        assert!(ensure_positive("fee", 0.0).is_err());
        assert!(ensure_positive("fee", f64::NAN).is_err());
    }

    #[test]
    fn test_term_years_bounded() {
        assert_eq!(ensure_term_years("total_years", MAX_TERM_YEARS).unwrap(), MAX_TERM_YEARS);
        assert!(matches!(
            ensure_term_years("total_years", u32::MAX),
            Err(ConfigError::TermTooLong { field: "total_years", .. })
        ));
    }
}
