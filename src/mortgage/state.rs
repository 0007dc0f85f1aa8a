//! Loan and investment state carried between months

use super::params::MortgageParameters;

/// Mutable state of a mortgage run
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Months processed so far
    pub month: u32,

    /// Outstanding loan balance, never negative
    pub remaining_principal: f64,

    /// Level monthly instalment currently in force
    pub emi: f64,

    /// Liquid savings; may go negative
    pub investable_balance: f64,

    /// Early repayments counted towards this calendar year's cap
    pub annual_early_repayments: f64,

    pub total_interest: f64,
    pub total_insurance: f64,
    pub total_maintenance: f64,
    pub total_early_repayments: f64,
    pub total_early_repayment_fees: f64,
    pub total_principal_repaid: f64,

    pub break_even_month: Option<u32>,
    pub payoff_month: Option<u32>,
}

impl LoanState {
    /// State before the first payment
    pub fn new(params: &MortgageParameters, initial_investment: f64) -> Self {
        Self {
            month: 0,
            remaining_principal: params.principal,
            emi: annuity_payment(params.principal, params.initial_rate, params.total_months()),
            investable_balance: initial_investment,
            annual_early_repayments: 0.0,
            total_interest: 0.0,
            total_insurance: 0.0,
            total_maintenance: 0.0,
            total_early_repayments: 0.0,
            total_early_repayment_fees: 0.0,
            total_principal_repaid: 0.0,
            break_even_month: None,
            payoff_month: None,
        }
    }

    /// Mark break-even the first time savings cover the loan; later months never move it
    pub fn record_break_even(&mut self) -> bool {
        if self.break_even_month.is_none() && self.investable_balance >= self.remaining_principal {
            self.break_even_month = Some(self.month);
            return true;
        }
        false
    }

    pub fn is_paid_off(&self) -> bool {
        self.remaining_principal <= 0.0
    }
}

/// Level payment `P·r·(1+r)^n / ((1+r)^n − 1)` repaying `principal` over `months`
///
/// Returns 0 when nothing is owed; a zero rate spreads the principal evenly.
pub fn annuity_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if principal <= 0.0 || months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(months as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}
