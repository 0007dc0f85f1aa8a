//! Rent-and-invest projection
//!
//! Savings stay invested while the household rents. Each month the balance
//! earns interest, receives the salary surplus and pays rent cheques, move
//! costs and the EJARI fee. The balance is never clamped; a negative balance
//! is a strategy in deficit.

use crate::calendar::advance_months;
use crate::config::Household;
use log::{info, warn};

use super::params::RentParameters;
use super::records::{BalanceRecord, RentResult, RentSummary};

/// Mutable state of the rent-and-invest loop
#[derive(Debug, Clone)]
pub struct InvestmentState {
    /// Months completed
    pub month: u32,
    pub balance: f64,

    pub total_rent: f64,
    pub total_agency_fees: f64,
    pub total_move_in_costs: f64,
    pub total_ejari_fees: f64,
    pub total_earned_interest: f64,
    pub total_top_ups: f64,
    pub apartment_changes: u32,
    pub first_deficit_month: Option<u32>,
}

impl InvestmentState {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            month: 0,
            balance: initial_balance,
            total_rent: 0.0,
            total_agency_fees: 0.0,
            total_move_in_costs: 0.0,
            total_ejari_fees: 0.0,
            total_earned_interest: 0.0,
            total_top_ups: 0.0,
            apartment_changes: 0,
            first_deficit_month: None,
        }
    }

    /// Rent, agency fees, move-in costs and EJARI paid so far
    pub fn total_rental_costs(&self) -> f64 {
        self.total_rent + self.total_agency_fees + self.total_move_in_costs + self.total_ejari_fees
    }
}

/// Month-by-month rent-and-invest projection
#[derive(Debug, Clone)]
pub struct RentEngine {
    params: RentParameters,
    household: Household,
}

impl RentEngine {
    pub fn new(params: RentParameters, household: Household) -> Self {
        Self { params, household }
    }

    pub fn params(&self) -> &RentParameters {
        &self.params
    }

    /// Run the full projection starting from the household's savings
    pub fn run(&self) -> RentResult {
        let total_months = self.params.total_months();
        let mut state = InvestmentState::new(self.household.initial_savings);

        info!(
            "Projecting rent of {:.2}/year in {} cheques over {} months from {:.2} invested",
            self.params.annual_rent,
            self.params.rent_cheques,
            total_months,
            self.household.initial_savings
        );

        let balances: Vec<BalanceRecord> = (0..total_months)
            .map(|_| self.calculate_month(&mut state))
            .collect();

        let summary = RentSummary {
            total_months: state.month,
            initial_balance: self.household.initial_savings,
            final_balance: state.balance,
            total_rental_costs: state.total_rental_costs(),
            total_rent: state.total_rent,
            total_agency_fees: state.total_agency_fees,
            total_move_in_costs: state.total_move_in_costs,
            total_ejari_fees: state.total_ejari_fees,
            total_earned_interest: state.total_earned_interest,
            total_top_ups: state.total_top_ups,
            average_monthly_rent: self.params.average_monthly_rent(),
            apartment_changes: state.apartment_changes,
            first_deficit_month: state.first_deficit_month,
        };

        info!(
            "Rent projection complete: final balance {:.2}, rental costs {:.2}, interest {:.2}",
            summary.final_balance, summary.total_rental_costs, summary.total_earned_interest
        );

        RentResult { balances, summary }
    }

    fn calculate_month(&self, state: &mut InvestmentState) -> BalanceRecord {
        state.month += 1;
        let month = state.month;
        let date = advance_months(self.params.start_date, month);

        let interest = if month % self.params.interest_interval == 0 {
            state.balance * self.params.monthly_investment_rate()
        } else {
            0.0
        };
        state.balance += interest;

        let top_up = self.household.monthly_surplus();
        state.balance += top_up;

        // Boundaries fall on months 1, 1 + period, 1 + 2 * period, ...
        let cheque_due = (month - 1) % self.params.cheque_period() == 0;
        let moved = cheque_due && (month - 1) % self.params.change_period() == 0;

        let instalment = if cheque_due {
            self.params.rent_instalment()
        } else {
            0.0
        };
        let (agency_fee, move_in_costs) = if moved {
            (self.params.agency_fee(), self.params.move_in_costs)
        } else {
            (0.0, 0.0)
        };

        let ejari_fee = self.params.monthly_ejari_fee();
        state.balance -= instalment + agency_fee + move_in_costs + ejari_fee;

        state.total_earned_interest += interest;
        state.total_top_ups += top_up;
        state.total_rent += instalment;
        state.total_agency_fees += agency_fee;
        state.total_move_in_costs += move_in_costs;
        state.total_ejari_fees += ejari_fee;
        if moved {
            state.apartment_changes += 1;
        }

        if state.balance < 0.0 && state.first_deficit_month.is_none() {
            state.first_deficit_month = Some(month);
            warn!("Rent balance went negative in month {} ({}): {:.2}", month, date, state.balance);
        }

        BalanceRecord {
            month,
            date,
            balance: state.balance,
            interest,
            rent: instalment + agency_fee,
            ejari_fee,
            top_up,
            move_in_costs,
            moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::NaiveDate;

    fn engine_for(config: &ScenarioConfig) -> RentEngine {
        let params = RentParameters::from_inputs(
            &config.rent,
            &config.household,
            config.mortgage.total_years,
        )
        .unwrap();
        let household = Household::from_inputs(&config.household).unwrap();
        RentEngine::new(params, household)
    }

    #[test]
    fn test_one_record_per_month_dated_from_month_one() {
        let result = engine_for(&ScenarioConfig::example()).run();

        assert_eq!(result.balances.len(), 300);
        assert_eq!(result.balances[0].month, 1);
        assert_eq!(result.balances[0].date, NaiveDate::from_ymd_opt(2084, 2, 1).unwrap());
        assert_eq!(result.balances[299].date, NaiveDate::from_ymd_opt(2109, 1, 1).unwrap());
    }

    #[test]
    fn test_semi_annual_cheques_and_moves() {
        let result = engine_for(&ScenarioConfig::example()).run();

        for record in &result.balances {
            let cheque_month = record.month % 6 == 1;
            let move_month = record.month % 36 == 1;

            if move_month {
                assert_relative_eq!(record.rent, 50_000.0 + 5_250.0, max_relative = 1e-12);
                assert_eq!(record.move_in_costs, 3_000.0);
                assert!(record.moved);
            } else if cheque_month {
                assert_eq!(record.rent, 50_000.0);
                assert_eq!(record.move_in_costs, 0.0);
            } else {
                assert_eq!(record.rent, 0.0);
                assert_eq!(record.move_in_costs, 0.0);
            }
        }

        // Months 1, 37, ..., 289
        assert_eq!(result.summary.apartment_changes, 9);
        assert_eq!(result.moves().count(), 9);
    }

    #[test]
    fn test_monthly_cheques_pay_every_month() {
        let mut config = ScenarioConfig::example();
        config.rent.rent_cheques = 12;
        let result = engine_for(&config).run();

        assert!(result.balances.iter().all(|r| r.rent > 0.0));
        assert_relative_eq!(result.summary.total_rent, 100_000.0 * 25.0, max_relative = 1e-12);
    }

    #[test]
    fn test_first_month_figures() {
        let result = engine_for(&ScenarioConfig::example()).run();
        let first = &result.balances[0];

        let rate = 1.045_f64.powf(1.0 / 12.0) - 1.0;
        assert_relative_eq!(first.interest, 345_678.0 * rate, max_relative = 1e-12);
        assert_eq!(first.top_up, 11_111.0);
        assert_relative_eq!(first.ejari_fee, 5_000.0 / 12.0, max_relative = 1e-12);

        let expected = 345_678.0 + first.interest + 11_111.0 - 55_250.0 - 3_000.0 - first.ejari_fee;
        assert_relative_eq!(first.balance, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_interest_only_on_interval_months() {
        let mut config = ScenarioConfig::example();
        config.rent.interest_interval = 3;
        let result = engine_for(&config).run();

        for record in &result.balances {
            assert_eq!(record.interest > 0.0, record.month % 3 == 0);
        }
    }

    #[test]
    fn test_summary_totals_match_records() {
        let result = engine_for(&ScenarioConfig::example()).run();
        let summary = &result.summary;

        let costs: f64 = result
            .balances
            .iter()
            .map(|r| r.rent + r.move_in_costs + r.ejari_fee)
            .sum();
        let interest: f64 = result.balances.iter().map(|r| r.interest).sum();

        assert_abs_diff_eq!(summary.total_rental_costs, costs, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.total_earned_interest, interest, epsilon = 1e-6);
        assert_eq!(summary.final_balance, result.balances[299].balance);
        assert_relative_eq!(summary.total_agency_fees, 9.0 * 5_250.0, max_relative = 1e-12);

        // Final balance is savings plus inflows minus outflows
        let reconciled = summary.initial_balance + summary.total_top_ups + interest - costs;
        assert_abs_diff_eq!(summary.final_balance, reconciled, epsilon = 1e-4);
    }

    #[test]
    fn test_negative_balance_is_not_clamped() {
        let mut config = ScenarioConfig::example();
        config.household.initial_savings = 0.0;
        config.household.monthly_salary = 12_345.0;
        let result = engine_for(&config).run();

        assert_eq!(result.summary.first_deficit_month, Some(1));
        assert!(result.summary.final_balance < -1_000_000.0);
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let config = ScenarioConfig::example();
        assert_eq!(engine_for(&config).run(), engine_for(&config).run());
    }
}
