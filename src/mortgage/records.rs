//! Output records for the buying strategy

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::costs::InitialCosts;

/// One month of the mortgage payment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Projection month (1-indexed)
    pub month: u32,
    pub date: NaiveDate,

    // Payments
    pub principal: f64,
    pub interest: f64,
    pub early_repayment: f64,
    pub fee: f64,
    pub insurance: f64,
    pub maintenance: f64,

    /// Sum of all payments above
    pub total: f64,

    // Balances after this month
    pub mortgage_balance: f64,
    pub investment_balance: f64,

    /// Investment interest earned this month
    pub investment_interest: f64,
    pub net_cash_flow: f64,
}

/// Net worth decomposition at the end of a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthSnapshot {
    pub month: u32,
    pub date: NaiveDate,
    pub net_worth: f64,
    pub property_value: f64,
    pub investment_balance: f64,
    pub remaining_principal: f64,
}

/// Totals over the whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub total_months: u32,
    pub total_interest: f64,
    pub total_insurance: f64,
    pub total_maintenance: f64,
    pub total_early_repayments: f64,
    pub total_early_repayment_fees: f64,
    pub total_principal_repaid: f64,
    pub initial_costs: InitialCosts,
    pub initial_investment: f64,
    pub final_investment_balance: f64,
    pub final_mortgage_balance: f64,
    pub final_net_worth: f64,

    /// First month where the investment balance covers the remaining loan
    pub break_even_month: Option<u32>,

    /// Month in which the loan balance reached zero
    pub payoff_month: Option<u32>,
}

/// Complete buying-strategy projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub payments: Vec<PaymentRecord>,
    pub net_worth: Vec<NetWorthSnapshot>,
    pub summary: MortgageSummary,
}

impl MortgageResult {
    /// Record for a projection month (1-indexed)
    pub fn payment(&self, month: u32) -> Option<&PaymentRecord> {
        month.checked_sub(1).and_then(|i| self.payments.get(i as usize))
    }

    /// The row where break-even was reached
    pub fn break_even_record(&self) -> Option<&PaymentRecord> {
        self.summary.break_even_month.and_then(|m| self.payment(m))
    }
}
