//! Scenario inputs
//!
//! Plain serde structs holding the values a user supplies. Rates are given in
//! percent and dates as `YYYY-MM-DD` strings; they are validated and converted
//! when [`MortgageParameters`](crate::mortgage::MortgageParameters) and
//! [`RentParameters`](crate::rent::RentParameters) are built.

use crate::calendar::parse_date_field;
use crate::error::{ensure_non_negative, Result};
use crate::mortgage::EmiRecast;
use chrono::NaiveDate;
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

fn default_insurance_interval() -> u32 {
    1
}

fn default_maintenance_interval() -> u32 {
    12
}

fn default_property_value_factor() -> f64 {
    1.0
}

fn default_interest_interval() -> u32 {
    1
}

fn default_agency_fee_rate() -> f64 {
    5.25
}

fn default_ejari_fee_rate() -> f64 {
    5.0
}

/// Income, spending and savings shared by both strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdInputs {
    /// Monthly salary in AED
    pub monthly_salary: f64,

    /// Monthly expenses in AED, excluding housing
    pub monthly_expenses: f64,

    /// Savings available on the start date
    pub initial_savings: f64,

    /// First payment date
    pub start_date: String,
}

/// Household cash flows after validation, shared by both engines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Household {
    pub monthly_salary: f64,
    pub monthly_expenses: f64,
    pub initial_savings: f64,
    pub start_date: NaiveDate,
}

impl Household {
    pub fn from_inputs(inputs: &HouseholdInputs) -> Result<Self> {
        Ok(Self {
            monthly_salary: ensure_non_negative("monthly_salary", inputs.monthly_salary)?,
            monthly_expenses: ensure_non_negative("monthly_expenses", inputs.monthly_expenses)?,
            initial_savings: inputs.initial_savings,
            start_date: parse_date_field("start_date", &inputs.start_date)?,
        })
    }

    /// Salary left over after expenses each month
    pub fn monthly_surplus(&self) -> f64 {
        self.monthly_salary - self.monthly_expenses
    }
}

/// A one-off early repayment on a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentInput {
    pub date: String,
    pub amount: f64,
}

/// Recurring early repayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularRepaymentInput {
    pub amount: f64,

    /// Months between repayments
    pub interval_months: u32,

    pub first_date: String,
}

/// Mortgage terms and property attributes, rates in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInputs {
    /// Loan amount
    pub principal: f64,

    /// Annual rate during the initial fixed period
    pub initial_rate: f64,
    pub initial_years: u32,

    /// Annual rate after the initial period
    pub later_rate: f64,
    pub total_years: u32,

    pub property_price: f64,

    /// Property size in square feet
    pub property_size: f64,

    /// Maintenance (service charge) in AED per square foot per year
    pub maintenance_fee_rate: f64,
    #[serde(default = "default_maintenance_interval")]
    pub maintenance_interval: u32,

    /// Annual life insurance rate on the outstanding balance
    pub life_insurance_rate: f64,

    /// Annual property insurance rate on the property price
    pub property_insurance_rate: f64,
    #[serde(default = "default_insurance_interval")]
    pub insurance_interval: u32,

    /// Annual return on invested savings
    pub investment_rate: f64,

    pub valuation_fee: f64,
    pub conveyance_fee: f64,
    pub bank_opening_fee_rate: f64,

    /// Property value as a multiple of the purchase price
    #[serde(default = "default_property_value_factor")]
    pub property_value_factor: f64,

    /// Share of the original principal that may be prepaid each year
    pub max_early_repayment_percent: f64,

    /// Allow prepaying beyond the annual cap against a fee
    #[serde(default)]
    pub allow_exceed_limit: bool,

    #[serde(default)]
    pub regular_repayment: Option<RegularRepaymentInput>,

    #[serde(default)]
    pub arbitrary_repayments: Vec<RepaymentInput>,

    #[serde(default)]
    pub emi_recast: EmiRecast,
}

/// Rent-side inputs, rates in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentInputs {
    pub annual_rent: f64,

    /// Cheques per year, must divide 12
    pub rent_cheques: u32,

    /// Years between apartment changes
    pub change_interval_years: u32,

    /// Projection length, defaults to the mortgage term
    #[serde(default)]
    pub years: Option<u32>,

    /// Fixed cost of each move
    pub move_in_costs: f64,

    /// Annual return on the invested balance
    pub investment_rate: f64,

    /// Months between investment interest credits
    #[serde(default = "default_interest_interval")]
    pub interest_interval: u32,

    #[serde(default = "default_agency_fee_rate")]
    pub agency_fee_rate: f64,

    #[serde(default = "default_ejari_fee_rate")]
    pub ejari_fee_rate: f64,
}

/// Complete input for one buy-versus-rent comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub household: HouseholdInputs,
    pub mortgage: MortgageInputs,
    pub rent: RentInputs,
}

impl ScenarioConfig {
    /// Reference scenario: AED 800k loan on a 1M apartment over 25 years
    pub fn example() -> Self {
        Self {
            household: HouseholdInputs {
                monthly_salary: 23_456.0,
                monthly_expenses: 12_345.0,
                initial_savings: 345_678.0,
                start_date: "2084-01-01".to_string(),
            },
            mortgage: MortgageInputs {
                principal: 800_000.0,
                initial_rate: 4.5,
                initial_years: 3,
                later_rate: 8.0,
                total_years: 25,
                property_price: 1_000_000.0,
                property_size: 850.0,
                maintenance_fee_rate: 18.0,
                maintenance_interval: 12,
                life_insurance_rate: 0.5,
                property_insurance_rate: 0.12,
                insurance_interval: 1,
                investment_rate: 4.5,
                valuation_fee: 3_150.0,
                conveyance_fee: 5_250.0,
                bank_opening_fee_rate: 1.0,
                property_value_factor: 1.0,
                max_early_repayment_percent: 20.0,
                allow_exceed_limit: false,
                regular_repayment: Some(RegularRepaymentInput {
                    amount: 10_000.0,
                    interval_months: 12,
                    first_date: "2084-07-01".to_string(),
                }),
                arbitrary_repayments: vec![
                    RepaymentInput { date: "2085-01-01".to_string(), amount: 20_000.0 },
                    RepaymentInput { date: "2086-01-01".to_string(), amount: 20_000.0 },
                ],
                emi_recast: EmiRecast::AtRateSwitch,
            },
            rent: RentInputs {
                annual_rent: 100_000.0,
                rent_cheques: 2,
                change_interval_years: 3,
                years: None,
                move_in_costs: 3_000.0,
                investment_rate: 4.5,
                interest_interval: 1,
                agency_fee_rate: 5.25,
                ejari_fee_rate: 5.0,
            },
        }
    }

    /// Load a scenario from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::example()
    }
}

/// Load arbitrary early repayments from a CSV file with `date,amount` columns
pub fn load_repayments<P: AsRef<Path>>(path: P) -> Result<Vec<RepaymentInput>> {
    load_repayments_from_reader(File::open(path)?)
}

/// Load arbitrary early repayments from any reader
pub fn load_repayments_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RepaymentInput>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut repayments = Vec::new();

    for row in csv_reader.deserialize() {
        let repayment: RepaymentInput = row?;
        repayments.push(repayment);
    }

    Ok(repayments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_household_validation() {
        let mut inputs = ScenarioConfig::example().household;
        let household = Household::from_inputs(&inputs).unwrap();
        assert_eq!(household.start_date, NaiveDate::from_ymd_opt(2084, 1, 1).unwrap());
        assert_eq!(household.monthly_surplus(), 11_111.0);

        inputs.start_date = "next year".to_string();
        assert!(Household::from_inputs(&inputs).is_err());

        inputs.start_date = "2084-01-01".to_string();
        inputs.monthly_expenses = -1.0;
        assert!(Household::from_inputs(&inputs).is_err());
    }

    #[test]
    fn test_json_defaults_fill_optional_fields() {
        let json = r#"{
            "household": {
                "monthly_salary": 20000, "monthly_expenses": 10000,
                "initial_savings": 400000, "start_date": "2084-01-01"
            },
            "mortgage": {
                "principal": 800000, "initial_rate": 4.5, "initial_years": 3,
                "later_rate": 8, "total_years": 25, "property_price": 1000000,
                "property_size": 850, "maintenance_fee_rate": 18,
                "life_insurance_rate": 0.5, "property_insurance_rate": 0.12,
                "investment_rate": 4.5, "valuation_fee": 3150,
                "conveyance_fee": 5250, "bank_opening_fee_rate": 1,
                "max_early_repayment_percent": 20
            },
            "rent": {
                "annual_rent": 100000, "rent_cheques": 4,
                "change_interval_years": 2, "move_in_costs": 3000,
                "investment_rate": 4.5
            }
        }"#;

        let config = ScenarioConfig::from_json_str(json).unwrap();
        assert_eq!(config.mortgage.maintenance_interval, 12);
        assert_eq!(config.mortgage.insurance_interval, 1);
        assert_eq!(config.mortgage.property_value_factor, 1.0);
        assert!(!config.mortgage.allow_exceed_limit);
        assert!(config.mortgage.regular_repayment.is_none());
        assert!(config.mortgage.arbitrary_repayments.is_empty());
        assert_eq!(config.mortgage.emi_recast, EmiRecast::AtRateSwitch);
        assert_eq!(config.rent.agency_fee_rate, 5.25);
        assert_eq!(config.rent.ejari_fee_rate, 5.0);
        assert_eq!(config.rent.interest_interval, 1);
    }

    #[test]
    fn test_example_survives_json_round_trip() {
        let config = ScenarioConfig::example();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ScenarioConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_load_repayments_from_reader() {
        let data = "date,amount\n2085-01-01,20000\n2086-06-15,5000.5\n";
        let repayments = load_repayments_from_reader(data.as_bytes()).unwrap();

        assert_eq!(repayments.len(), 2);
        assert_eq!(repayments[1].date, "2086-06-15");
        assert_eq!(repayments[1].amount, 5000.5);
    }

    #[test]
    fn test_load_repayments_from_path() {
        let path = std::env::temp_dir().join("rent_vs_buy_repayments_test.csv");
        std::fs::write(&path, "date,amount\n2087-03-01,15000\n").unwrap();

        let repayments = load_repayments(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            repayments,
            vec![RepaymentInput { date: "2087-03-01".to_string(), amount: 15_000.0 }]
        );

        assert!(matches!(load_repayments(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_repayments_rejects_bad_amount() {
        let data = "date,amount\n2085-01-01,lots\n";
        assert!(load_repayments_from_reader(data.as_bytes()).is_err());
    }
}
