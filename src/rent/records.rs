//! Output records for the renting strategy

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One month of the rent-and-invest balance progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// Projection month (1-indexed)
    pub month: u32,
    pub date: NaiveDate,

    /// Invested balance after this month, may be negative
    pub balance: f64,
    pub interest: f64,

    /// Rent instalment, plus the agency fee on move months
    pub rent: f64,
    pub ejari_fee: f64,
    pub top_up: f64,
    pub move_in_costs: f64,

    /// Moved into a new apartment this month
    pub moved: bool,
}

/// Totals over the whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentSummary {
    pub total_months: u32,
    pub initial_balance: f64,
    pub final_balance: f64,

    /// Rent, agency fees, move-in costs and EJARI
    pub total_rental_costs: f64,
    pub total_rent: f64,
    pub total_agency_fees: f64,
    pub total_move_in_costs: f64,
    pub total_ejari_fees: f64,
    pub total_earned_interest: f64,
    pub total_top_ups: f64,
    pub average_monthly_rent: f64,
    pub apartment_changes: u32,

    /// First month the balance went negative
    pub first_deficit_month: Option<u32>,
}

/// Complete rent-and-invest projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentResult {
    pub balances: Vec<BalanceRecord>,
    pub summary: RentSummary,
}

impl RentResult {
    /// Record for a 1-indexed month
    pub fn balance(&self, month: u32) -> Option<&BalanceRecord> {
        month
            .checked_sub(1)
            .and_then(|index| self.balances.get(index as usize))
    }

    pub fn moves(&self) -> impl Iterator<Item = &BalanceRecord> {
        self.balances.iter().filter(|r| r.moved)
    }
}
