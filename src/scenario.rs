//! Scenario runner for buy-versus-rent projections
//!
//! Validates the whole configuration up front, then runs both engines and
//! joins their net worth series. A configuration error aborts before any
//! record is produced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::comparison::{compare_net_worth, crossover_date, ComparisonRow};
use crate::config::{Household, ScenarioConfig};
use crate::error::Result;
use crate::mortgage::{AmortizationEngine, MortgageParameters, MortgageResult, OwnershipInsights};
use crate::rent::{RentEngine, RentParameters, RentResult};

/// Buying strategy output with its headline figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageOutcome {
    pub result: MortgageResult,
    pub insights: OwnershipInsights,
}

/// Both projections and their comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub mortgage: MortgageOutcome,
    pub rent: RentResult,
    pub comparison: Vec<ComparisonRow>,
}

/// One line per scenario, used for batch output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub mortgage_final_net_worth: f64,
    pub rent_final_balance: f64,
    pub total_interest: f64,
    pub total_early_repayments: f64,
    pub total_early_repayment_fees: f64,
    pub break_even_month: Option<u32>,
    pub payoff_month: Option<u32>,

    /// From this date on, buying stays ahead of renting
    pub crossover_date: Option<NaiveDate>,
}

impl ScenarioResult {
    pub fn summary(&self) -> ScenarioSummary {
        let mortgage = &self.mortgage.result.summary;
        ScenarioSummary {
            mortgage_final_net_worth: mortgage.final_net_worth,
            rent_final_balance: self.rent.summary.final_balance,
            total_interest: mortgage.total_interest,
            total_early_repayments: mortgage.total_early_repayments,
            total_early_repayment_fees: mortgage.total_early_repayment_fees,
            break_even_month: mortgage.break_even_month,
            payoff_month: mortgage.payoff_month,
            crossover_date: crossover_date(&self.comparison),
        }
    }
}

/// Runs projections for one scenario configuration
///
/// # Example
/// ```
/// use rent_vs_buy::ScenarioRunner;
///
/// let runner = ScenarioRunner::default();
/// let result = runner.run().unwrap();
/// assert_eq!(result.mortgage.result.payments.len(), 300);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ScenarioConfig,
}

impl ScenarioRunner {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Create runner from a JSON scenario file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(ScenarioConfig::from_json_path(path)?))
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Mutable access for adjusting inputs between runs
    pub fn config_mut(&mut self) -> &mut ScenarioConfig {
        &mut self.config
    }

    pub fn household(&self) -> Result<Household> {
        Household::from_inputs(&self.config.household)
    }

    /// Validated amortization engine for the buying strategy
    pub fn mortgage_engine(&self) -> Result<AmortizationEngine> {
        let household = self.household()?;
        let params = MortgageParameters::new(&self.config.mortgage, household.start_date)?;
        Ok(AmortizationEngine::new(params, household))
    }

    /// Validated rent engine, running over the mortgage term unless configured otherwise
    pub fn rent_engine(&self) -> Result<RentEngine> {
        let household = self.household()?;
        let params = RentParameters::new(
            &self.config.rent,
            self.config.mortgage.total_years,
            household.start_date,
        )?;
        Ok(RentEngine::new(params, household))
    }

    pub fn run_mortgage(&self) -> Result<MortgageOutcome> {
        let engine = self.mortgage_engine()?;
        Ok(Self::project_mortgage(&engine))
    }

    pub fn run_rent(&self) -> Result<RentResult> {
        Ok(self.rent_engine()?.run())
    }

    /// Run both strategies and compare net worth by date
    pub fn run(&self) -> Result<ScenarioResult> {
        // Both sides are validated before either runs
        let mortgage_engine = self.mortgage_engine()?;
        let rent_engine = self.rent_engine()?;

        let mortgage = Self::project_mortgage(&mortgage_engine);
        let rent = rent_engine.run();
        let comparison = compare_net_worth(&mortgage.result.net_worth, &rent.balances);

        Ok(ScenarioResult {
            mortgage,
            rent,
            comparison,
        })
    }

    /// Run several configurations in order, stopping at the first invalid one
    pub fn run_scenarios(configs: &[ScenarioConfig]) -> Result<Vec<ScenarioResult>> {
        configs
            .iter()
            .map(|config| Self::new(config.clone()).run())
            .collect()
    }

    fn project_mortgage(engine: &AmortizationEngine) -> MortgageOutcome {
        let result = engine.run();
        let household = engine.household();
        let insights =
            OwnershipInsights::new(engine.params(), &result.summary, household.monthly_salary);
        MortgageOutcome { result, insights }
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(ScenarioConfig::example())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegularRepaymentInput;
    use crate::error::ConfigError;

    #[test]
    fn test_example_scenario_runs_both_strategies() {
        let result = ScenarioRunner::default().run().unwrap();

        assert_eq!(result.mortgage.result.payments.len(), 300);
        assert_eq!(result.rent.balances.len(), 300);
        // Mortgage dates start one month before rent dates
        assert_eq!(result.comparison.len(), 301);
        assert!(result.comparison.first().unwrap().rent_net_worth.is_none());
        assert!(result.comparison.last().unwrap().mortgage_net_worth.is_none());
        assert!(result
            .comparison
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn test_invalid_rent_config_aborts_before_any_projection() {
        let mut runner = ScenarioRunner::default();
        runner.config_mut().rent.rent_cheques = 5;

        assert!(matches!(runner.run(), Err(ConfigError::InvalidRentCheques { cheques: 5 })));
        // The mortgage side alone is still valid
        assert!(runner.run_mortgage().is_ok());
    }

    #[test]
    fn test_insights_follow_configuration() {
        let outcome = ScenarioRunner::default().run_mortgage().unwrap();
        assert_eq!(outcome.insights.loan_amount, 800_000.0);
        assert_eq!(outcome.insights.down_payment, 200_000.0);
    }

    #[test]
    fn test_larger_regular_repayment_pays_less_interest() {
        let configs: Vec<ScenarioConfig> = [0.0, 20_000.0, 50_000.0]
            .iter()
            .map(|&amount| {
                let mut config = ScenarioConfig::example();
                config.mortgage.regular_repayment = Some(RegularRepaymentInput {
                    amount,
                    interval_months: 12,
                    first_date: "2084-07-01".to_string(),
                });
                config
            })
            .collect();

        let results = ScenarioRunner::run_scenarios(&configs).unwrap();
        assert_eq!(results.len(), 3);

        let interest: Vec<f64> = results.iter().map(|r| r.summary().total_interest).collect();
        assert!(interest[1] < interest[0]);
        assert!(interest[2] < interest[1]);
    }

    #[test]
    fn test_runner_from_json_path() {
        let mut config = ScenarioConfig::example();
        config.mortgage.total_years = 20;
        let path = std::env::temp_dir().join("rent_vs_buy_scenario_test.json");
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let runner = ScenarioRunner::from_json_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(runner.config(), &config);
        assert_eq!(runner.run_mortgage().unwrap().result.payments.len(), 240);

        assert!(matches!(ScenarioRunner::from_json_path(&path), Err(ConfigError::Io(_))));
    }
}
