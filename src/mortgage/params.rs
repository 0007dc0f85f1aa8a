//! Validated mortgage parameters with rates in monthly/fractional form

use crate::calendar::parse_date_field;
use crate::config::{HouseholdInputs, MortgageInputs, RepaymentInput};
use crate::error::{
    ensure_non_negative, ensure_positive, ensure_term_years, ConfigError, Result,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::EmiRecast;

/// Recurring early repayment after validation
#[derive(Debug, Clone, PartialEq)]
pub struct RegularRepayment {
    pub amount: f64,
    pub interval_months: u32,
    pub first_date: NaiveDate,
}

/// One-off early repayment after validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArbitraryRepayment {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Immutable mortgage parameters
#[derive(Debug, Clone, PartialEq)]
pub struct MortgageParameters {
    /// Original loan amount
    pub principal: f64,

    /// Monthly rate during the initial period
    pub initial_rate: f64,
    pub initial_years: u32,

    /// Monthly rate after the initial period
    pub later_rate: f64,
    pub total_years: u32,

    pub property_price: f64,
    pub property_size: f64,

    /// AED per square foot per year
    pub maintenance_fee_rate: f64,
    pub maintenance_interval: u32,

    /// Annual life insurance rate as a fraction
    pub life_insurance_rate: f64,

    /// Annual property insurance rate as a fraction
    pub property_insurance_rate: f64,
    pub insurance_interval: u32,

    /// Monthly investment rate (annual / 12)
    pub investment_rate: f64,

    pub valuation_fee: f64,
    pub conveyance_fee: f64,

    /// Bank opening fee as a fraction of the principal
    pub bank_opening_rate: f64,

    pub property_value_factor: f64,

    /// Annual early repayment ceiling as a fraction of the principal
    pub max_early_repayment_fraction: f64,
    pub allow_exceed_limit: bool,

    pub regular_repayment: Option<RegularRepayment>,

    /// Sorted by date, none before `start_date`
    pub arbitrary_repayments: Vec<ArbitraryRepayment>,

    pub emi_recast: EmiRecast,

    pub start_date: NaiveDate,
}

fn interval_field(field: &'static str, months: u32) -> Result<u32> {
    if months == 0 {
        return Err(ConfigError::InvalidInterval { field });
    }
    Ok(months)
}

impl MortgageParameters {
    /// Validate inputs and convert percentages into monthly/fractional rates
    pub fn new(inputs: &MortgageInputs, start_date: NaiveDate) -> Result<Self> {
        let principal = ensure_positive("principal", inputs.principal)?;
        let property_price = ensure_positive("property_price", inputs.property_price)?;
        if principal > property_price {
            return Err(ConfigError::PrincipalExceedsPrice { principal, property_price });
        }

        if inputs.total_years == 0 {
            return Err(ConfigError::NonPositive {
                field: "total_years",
                value: 0.0,
            });
        }
        ensure_term_years("total_years", inputs.total_years)?;
        if inputs.initial_years > inputs.total_years {
            return Err(ConfigError::InitialPeriodTooLong {
                initial_years: inputs.initial_years,
                total_years: inputs.total_years,
            });
        }

        let max_fraction =
            ensure_non_negative("max_early_repayment_percent", inputs.max_early_repayment_percent)?
                / 100.0;
        if max_fraction > 1.0 {
            return Err(ConfigError::InvalidFraction {
                field: "max_early_repayment_percent",
                value: max_fraction,
            });
        }

        let regular_repayment = match &inputs.regular_repayment {
            Some(regular) if regular.amount > 0.0 => Some(RegularRepayment {
                amount: regular.amount,
                interval_months: interval_field(
                    "regular_repayment.interval_months",
                    regular.interval_months,
                )?,
                first_date: parse_date_field(
                    "regular_repayment.first_date",
                    &regular.first_date,
                )?,
            }),
            Some(regular) => {
                ensure_non_negative("regular_repayment.amount", regular.amount)?;
                None
            }
            None => None,
        };

        Ok(Self {
            principal,
            initial_rate: ensure_non_negative("initial_rate", inputs.initial_rate)? / 100.0 / 12.0,
            initial_years: inputs.initial_years,
            later_rate: ensure_non_negative("later_rate", inputs.later_rate)? / 100.0 / 12.0,
            total_years: inputs.total_years,
            property_price,
            property_size: ensure_non_negative("property_size", inputs.property_size)?,
            maintenance_fee_rate: ensure_non_negative(
                "maintenance_fee_rate",
                inputs.maintenance_fee_rate,
            )?,
            maintenance_interval: interval_field(
                "maintenance_interval",
                inputs.maintenance_interval,
            )?,
            life_insurance_rate: ensure_non_negative(
                "life_insurance_rate",
                inputs.life_insurance_rate,
            )? / 100.0,
            property_insurance_rate: ensure_non_negative(
                "property_insurance_rate",
                inputs.property_insurance_rate,
            )? / 100.0,
            insurance_interval: interval_field("insurance_interval", inputs.insurance_interval)?,
            investment_rate: inputs.investment_rate / 100.0 / 12.0,
            valuation_fee: ensure_non_negative("valuation_fee", inputs.valuation_fee)?,
            conveyance_fee: ensure_non_negative("conveyance_fee", inputs.conveyance_fee)?,
            bank_opening_rate: ensure_non_negative(
                "bank_opening_fee_rate",
                inputs.bank_opening_fee_rate,
            )? / 100.0,
            property_value_factor: ensure_non_negative(
                "property_value_factor",
                inputs.property_value_factor,
            )?,
            max_early_repayment_fraction: max_fraction,
            allow_exceed_limit: inputs.allow_exceed_limit,
            regular_repayment,
            arbitrary_repayments: arbitrary_repayments(&inputs.arbitrary_repayments, start_date)?,
            emi_recast: inputs.emi_recast,
            start_date,
        })
    }

    /// Validate against the household's start date
    pub fn from_inputs(inputs: &MortgageInputs, household: &HouseholdInputs) -> Result<Self> {
        let start_date = parse_date_field("start_date", &household.start_date)?;
        Self::new(inputs, start_date)
    }

    /// Number of monthly payments over the full term
    pub fn total_months(&self) -> u32 {
        self.total_years * 12
    }

    /// Number of months charged at the initial rate
    pub fn initial_months(&self) -> u32 {
        self.initial_years * 12
    }

    /// Cash paid up front towards the purchase price
    pub fn down_payment(&self) -> f64 {
        self.property_price - self.principal
    }

    /// Market value of the property used for net worth
    pub fn property_value(&self) -> f64 {
        self.property_price * self.property_value_factor
    }

    /// Annual maintenance charge for the whole property
    pub fn maintenance_fees(&self) -> f64 {
        self.property_size * self.maintenance_fee_rate
    }

    /// Penalty-free early repayment allowed per calendar year
    pub fn annual_repayment_limit(&self) -> f64 {
        self.principal * self.max_early_repayment_fraction
    }
}

/// Parse, drop entries before the start date, and order by date
fn arbitrary_repayments(
    inputs: &[RepaymentInput],
    start_date: NaiveDate,
) -> Result<Vec<ArbitraryRepayment>> {
    let mut repayments = Vec::with_capacity(inputs.len());
    for input in inputs {
        let date = parse_date_field("arbitrary_repayments.date", &input.date)?;
        let amount = ensure_non_negative("arbitrary_repayments.amount", input.amount)?;
        if date < start_date {
            log::warn!(
                "Discarding early repayment of {:.2} on {}: before start date {}",
                amount,
                date,
                start_date
            );
            continue;
        }
        repayments.push(ArbitraryRepayment { date, amount });
    }

    repayments.sort_by_key(|r| r.date);
    Ok(repayments)
}
