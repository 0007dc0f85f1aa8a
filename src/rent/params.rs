//! Validated rent-side parameters

use crate::calendar::parse_date_field;
use crate::config::{HouseholdInputs, RentInputs};
use crate::error::{ensure_non_negative, ensure_term_years, ConfigError, Result};
use chrono::NaiveDate;

/// Immutable rent-and-invest parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RentParameters {
    pub annual_rent: f64,

    /// Cheques per year, a divisor of 12
    pub rent_cheques: u32,

    /// Years between apartment changes
    pub change_interval_years: u32,

    /// One-off cost of each move
    pub move_in_costs: f64,

    /// Annual investment return as a fraction
    pub annual_investment_rate: f64,

    /// Months between interest credits
    pub interest_interval: u32,

    /// Agency fee as a fraction of annual rent, paid on every move
    pub agency_fee_rate: f64,

    /// EJARI fee as a fraction of annual rent, spread over the year
    pub ejari_fee_rate: f64,

    pub years: u32,
    pub start_date: NaiveDate,
}

impl RentParameters {
    pub fn new(inputs: &RentInputs, years: u32, start_date: NaiveDate) -> Result<Self> {
        if inputs.rent_cheques == 0 || 12 % inputs.rent_cheques != 0 {
            return Err(ConfigError::InvalidRentCheques {
                cheques: inputs.rent_cheques,
            });
        }
        if inputs.change_interval_years == 0 {
            return Err(ConfigError::InvalidInterval {
                field: "change_interval_years",
            });
        }
        ensure_term_years("change_interval_years", inputs.change_interval_years)?;
        if inputs.interest_interval == 0 {
            return Err(ConfigError::InvalidInterval {
                field: "interest_interval",
            });
        }
        let years = inputs.years.unwrap_or(years);
        if years == 0 {
            return Err(ConfigError::NonPositive {
                field: "years",
                value: 0.0,
            });
        }
        let years = ensure_term_years("years", years)?;

        Ok(Self {
            annual_rent: ensure_non_negative("annual_rent", inputs.annual_rent)?,
            rent_cheques: inputs.rent_cheques,
            change_interval_years: inputs.change_interval_years,
            move_in_costs: ensure_non_negative("move_in_costs", inputs.move_in_costs)?,
            annual_investment_rate: inputs.investment_rate / 100.0,
            interest_interval: inputs.interest_interval,
            agency_fee_rate: ensure_non_negative("agency_fee_rate", inputs.agency_fee_rate)?
                / 100.0,
            ejari_fee_rate: ensure_non_negative("ejari_fee_rate", inputs.ejari_fee_rate)? / 100.0,
            years,
            start_date,
        })
    }

    /// Validate against the household's start date, running for `default_years`
    /// unless the inputs name their own horizon
    pub fn from_inputs(
        inputs: &RentInputs,
        household: &HouseholdInputs,
        default_years: u32,
    ) -> Result<Self> {
        let start_date = parse_date_field("start_date", &household.start_date)?;
        Self::new(inputs, default_years, start_date)
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12
    }

    /// Months between rent cheques
    pub fn cheque_period(&self) -> u32 {
        12 / self.rent_cheques
    }

    /// Months between apartment changes
    pub fn change_period(&self) -> u32 {
        self.change_interval_years * 12
    }

    /// Effective monthly rate that compounds to the annual rate
    pub fn monthly_investment_rate(&self) -> f64 {
        (1.0 + self.annual_investment_rate).powf(1.0 / 12.0) - 1.0
    }

    pub fn rent_instalment(&self) -> f64 {
        self.annual_rent / f64::from(self.rent_cheques)
    }

    pub fn agency_fee(&self) -> f64 {
        self.annual_rent * self.agency_fee_rate
    }

    pub fn monthly_ejari_fee(&self) -> f64 {
        self.annual_rent * self.ejari_fee_rate / 12.0
    }

    /// Monthly rent with the agency fee spread over the tenancy
    pub fn average_monthly_rent(&self) -> f64 {
        (self.annual_rent + self.agency_fee() / f64::from(self.change_interval_years)) / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use approx::assert_relative_eq;

    fn example_inputs() -> (RentInputs, HouseholdInputs) {
        let config = ScenarioConfig::example();
        (config.rent, config.household)
    }

    #[test]
    fn test_example_parameters() {
        let (inputs, household) = example_inputs();
        let params = RentParameters::from_inputs(&inputs, &household, 25).unwrap();

        assert_eq!(params.total_months(), 300);
        assert_eq!(params.cheque_period(), 6);
        assert_eq!(params.change_period(), 36);
        assert_relative_eq!(params.rent_instalment(), 50_000.0);
        assert_relative_eq!(params.agency_fee(), 5_250.0, max_relative = 1e-12);
        assert_relative_eq!(params.monthly_ejari_fee(), 5_000.0 / 12.0, max_relative = 1e-12);
        // (100000 + 5250 / 3) / 12
        assert_relative_eq!(
            params.average_monthly_rent(),
            101_750.0 / 12.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_monthly_rate_compounds_to_annual() {
        let (inputs, household) = example_inputs();
        let params = RentParameters::from_inputs(&inputs, &household, 25).unwrap();
        let compounded = (1.0 + params.monthly_investment_rate()).powi(12) - 1.0;
        assert_relative_eq!(compounded, 0.045, max_relative = 1e-12);
    }

    #[test]
    fn test_cheques_must_divide_twelve() {
        let (mut inputs, household) = example_inputs();
        for cheques in [0, 5, 7, 24] {
            inputs.rent_cheques = cheques;
            assert!(matches!(
                RentParameters::from_inputs(&inputs, &household, 25),
                Err(ConfigError::InvalidRentCheques { .. })
            ));
        }
        for cheques in [1, 2, 3, 4, 6, 12] {
            inputs.rent_cheques = cheques;
            assert!(RentParameters::from_inputs(&inputs, &household, 25).is_ok());
        }
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let (mut inputs, household) = example_inputs();
        inputs.change_interval_years = 0;
        assert!(matches!(
            RentParameters::from_inputs(&inputs, &household, 25),
            Err(ConfigError::InvalidInterval { field: "change_interval_years" })
        ));

        let (mut inputs, household) = example_inputs();
        inputs.interest_interval = 0;
        assert!(RentParameters::from_inputs(&inputs, &household, 25).is_err());
    }

    #[test]
    fn test_oversized_year_counts_rejected() {
        let (mut inputs, household) = example_inputs();
        inputs.change_interval_years = u32::MAX;
        assert!(matches!(
            RentParameters::from_inputs(&inputs, &household, 25),
            Err(ConfigError::TermTooLong { field: "change_interval_years", .. })
        ));

        let (mut inputs, household) = example_inputs();
        inputs.years = Some(400_000_000);
        assert!(matches!(
            RentParameters::from_inputs(&inputs, &household, 25),
            Err(ConfigError::TermTooLong { field: "years", .. })
        ));
    }

    #[test]
    fn test_explicit_horizon_overrides_default() {
        let (mut inputs, household) = example_inputs();
        inputs.years = Some(10);
        let params = RentParameters::from_inputs(&inputs, &household, 25).unwrap();
        assert_eq!(params.total_months(), 120);
    }
}
