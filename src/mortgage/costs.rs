//! One-off purchase costs and whole-of-loan ownership figures

use serde::{Deserialize, Serialize};

use super::params::MortgageParameters;
use super::records::MortgageSummary;

/// Dubai Land Department transfer fee rate
const DLD_FEE_RATE: f64 = 0.04;
const DLD_ADMIN_FEE: f64 = 580.0;

/// Registration fee applies at the higher tier above this price
const REGISTRATION_PRICE_THRESHOLD: f64 = 500_000.0;
const REGISTRATION_FEE_HIGH: f64 = 4_000.0;
const REGISTRATION_FEE_LOW: f64 = 2_000.0;
const VAT: f64 = 0.05;

const MORTGAGE_REGISTRATION_RATE: f64 = 0.0025;
const MORTGAGE_REGISTRATION_FEE: f64 = 290.0;

const BROKERAGE_RATE: f64 = 0.021;

/// Transaction fees paid when the purchase completes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialCosts {
    pub dld_fee: f64,
    pub property_registration_fee: f64,
    pub mortgage_registration_fee: f64,
    pub brokerage_fee: f64,
    pub conveyance_fee: f64,
    pub valuation_fee: f64,
    pub bank_opening_fee: f64,
}

impl InitialCosts {
    /// Fee breakdown for purchasing `params.property_price` with `params.principal` borrowed
    pub fn calculate(params: &MortgageParameters) -> Self {
        let price = params.property_price;

        let registration_base = if price > REGISTRATION_PRICE_THRESHOLD {
            REGISTRATION_FEE_HIGH
        } else {
            REGISTRATION_FEE_LOW
        };

        Self {
            dld_fee: DLD_FEE_RATE * price + DLD_ADMIN_FEE,
            property_registration_fee: registration_base * (1.0 + VAT),
            mortgage_registration_fee: MORTGAGE_REGISTRATION_RATE * params.principal
                + MORTGAGE_REGISTRATION_FEE,
            brokerage_fee: BROKERAGE_RATE * price,
            conveyance_fee: params.conveyance_fee,
            valuation_fee: params.valuation_fee,
            bank_opening_fee: params.bank_opening_rate * params.principal,
        }
    }

    /// Sum of all fees, excluding the down payment
    pub fn total(&self) -> f64 {
        self.dld_fee
            + self.property_registration_fee
            + self.mortgage_registration_fee
            + self.brokerage_fee
            + self.conveyance_fee
            + self.valuation_fee
            + self.bank_opening_fee
    }
}

/// Headline figures for the buying strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnershipInsights {
    pub loan_amount: f64,
    pub down_payment: f64,

    /// Fees excluding the down payment
    pub initial_fees: f64,

    /// Fees plus down payment
    pub total_initial_costs: f64,

    /// Loan to value, in percent
    pub ltv_percent: f64,

    /// Loan over annual salary
    pub debt_to_income: f64,

    /// Price, fees, interest, insurance, maintenance and early repayment fees
    pub total_cost_of_ownership: f64,
}

impl OwnershipInsights {
    pub fn new(
        params: &MortgageParameters,
        summary: &MortgageSummary,
        monthly_salary: f64,
    ) -> Self {
        let initial_fees = summary.initial_costs.total();
        let down_payment = params.down_payment();
        let annual_salary = monthly_salary * 12.0;

        Self {
            loan_amount: params.principal,
            down_payment,
            initial_fees,
            total_initial_costs: initial_fees + down_payment,
            ltv_percent: params.principal / params.property_price * 100.0,
            debt_to_income: if annual_salary > 0.0 {
                params.principal / annual_salary
            } else {
                f64::INFINITY
            },
            total_cost_of_ownership: params.property_price
                + initial_fees
                + summary.total_interest
                + summary.total_insurance
                + summary.total_maintenance
                + summary.total_early_repayment_fees,
        }
    }
}
