//! Amortization engine for monthly mortgage projections

use crate::calendar::advance_months;
use crate::config::Household;
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::cap::RepaymentCap;
use super::costs::InitialCosts;
use super::params::MortgageParameters;
use super::records::{MortgageResult, MortgageSummary, NetWorthSnapshot, PaymentRecord};
use super::schedule::{RepaymentSchedule, ScheduleCursor};
use super::state::{annuity_payment, LoanState};

/// When the level instalment is recomputed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmiRecast {
    /// Once, when the later rate takes over; early repayments shorten the term
    #[default]
    AtRateSwitch,
    /// Every month of the later-rate period over the remaining term; early
    /// repayments lower the instalment
    Monthly,
}

/// Early repayments applied within one month
#[derive(Debug, Clone, Copy, Default)]
struct MonthRepayments {
    accepted: f64,
    fees: f64,
}

/// Month-by-month mortgage and investment projection
#[derive(Debug, Clone)]
pub struct AmortizationEngine {
    params: MortgageParameters,
    household: Household,
    schedule: RepaymentSchedule,
    cap: RepaymentCap,
    initial_costs: InitialCosts,
}

impl AmortizationEngine {
    pub fn new(params: MortgageParameters, household: Household) -> Self {
        let schedule = RepaymentSchedule::build(&params);
        let cap = RepaymentCap::new(
            params.principal,
            params.max_early_repayment_fraction,
            params.allow_exceed_limit,
        );
        let initial_costs = InitialCosts::calculate(&params);

        Self {
            params,
            household,
            schedule,
            cap,
            initial_costs,
        }
    }

    pub fn params(&self) -> &MortgageParameters {
        &self.params
    }

    pub fn household(&self) -> &Household {
        &self.household
    }

    pub fn schedule(&self) -> &RepaymentSchedule {
        &self.schedule
    }

    pub fn initial_costs(&self) -> &InitialCosts {
        &self.initial_costs
    }

    /// Savings left to invest after the down payment and purchase fees
    pub fn initial_investment(&self) -> f64 {
        self.household.initial_savings - self.params.down_payment() - self.initial_costs.total()
    }

    /// Payment date of a 0-indexed month
    fn payment_date(&self, month_index: u32) -> NaiveDate {
        advance_months(self.params.start_date, month_index)
    }

    /// Run the full projection
    pub fn run(&self) -> MortgageResult {
        let total_months = self.params.total_months();
        let initial_investment = self.initial_investment();
        let mut state = LoanState::new(&self.params, initial_investment);
        let mut cursor = self.schedule.cursor();

        info!(
            "Projecting mortgage of {:.2} over {} months; {} early repayments scheduled, \
             {:.2} invested",
            self.params.principal,
            total_months,
            self.schedule.len(),
            initial_investment
        );

        let mut payments = Vec::with_capacity(total_months as usize);
        let mut net_worth = Vec::with_capacity(total_months as usize);

        for _ in 0..total_months {
            let (payment, snapshot) = self.calculate_month(&mut state, &mut cursor);
            payments.push(payment);
            net_worth.push(snapshot);
        }

        if cursor.remaining() > 0 {
            debug!("{} early repayments fall after the final payment", cursor.remaining());
        }

        let summary = self.summarize(&state, initial_investment, net_worth.last());
        info!(
            "Mortgage projection complete: interest {:.2}, final investments {:.2}, \
             break-even {:?}",
            summary.total_interest, summary.final_investment_balance, summary.break_even_month
        );

        MortgageResult {
            payments,
            net_worth,
            summary,
        }
    }

    /// Advance the state by one month and emit its records
    fn calculate_month(
        &self,
        state: &mut LoanState,
        cursor: &mut ScheduleCursor<'_>,
    ) -> (PaymentRecord, NetWorthSnapshot) {
        let index = state.month;
        let date = self.payment_date(index);
        state.month += 1;
        let is_final_month = state.month == self.params.total_months();

        let rate = self.select_rate(index, state);
        let interest = state.remaining_principal * rate;
        let mut principal_payment = state.emi - interest;

        // Early repayments come off the balance before the scheduled principal
        let early = self.apply_early_repayments(date, state, cursor);
        state.remaining_principal = (state.remaining_principal - early.accepted).max(0.0);

        if is_final_month || principal_payment > state.remaining_principal {
            principal_payment = state.remaining_principal;
        }
        let principal_payment = principal_payment.clamp(0.0, state.remaining_principal);
        state.remaining_principal -= principal_payment;

        if state.is_paid_off() && state.payoff_month.is_none() {
            state.payoff_month = Some(state.month);
            info!("Mortgage paid off in month {} ({})", state.month, date);
        }

        let insurance = if !state.is_paid_off() && index % self.params.insurance_interval == 0 {
            let life = state.remaining_principal * (self.params.life_insurance_rate / 12.0);
            let property =
                self.params.property_price * (self.params.property_insurance_rate / 12.0);
            life + property
        } else {
            0.0
        };

        let maintenance = if index % self.params.maintenance_interval == 0 {
            self.params.maintenance_fees()
        } else {
            0.0
        };

        // The first month earns nothing
        let investment_interest = if index > 0 {
            state.investable_balance * self.params.investment_rate
        } else {
            0.0
        };

        let total =
            principal_payment + interest + early.accepted + early.fees + insurance + maintenance;
        let net_cash_flow = self.household.monthly_surplus() - total + investment_interest;
        state.investable_balance += net_cash_flow;

        state.total_interest += interest;
        state.total_insurance += insurance;
        state.total_maintenance += maintenance;
        state.total_early_repayments += early.accepted;
        state.total_early_repayment_fees += early.fees;
        state.total_principal_repaid += principal_payment;

        let property_value = self.params.property_value();
        let snapshot = NetWorthSnapshot {
            month: state.month,
            date,
            net_worth: property_value - state.remaining_principal + state.investable_balance,
            property_value,
            investment_balance: state.investable_balance,
            remaining_principal: state.remaining_principal,
        };

        if state.record_break_even() {
            info!(
                "Break-even in month {} ({}): investments {:.2} cover remaining principal {:.2}",
                state.month, date, state.investable_balance, state.remaining_principal
            );
        }

        // The cap is per calendar year
        if date.month() == 12 {
            state.annual_early_repayments = 0.0;
        }

        let payment = PaymentRecord {
            month: state.month,
            date,
            principal: principal_payment,
            interest,
            early_repayment: early.accepted,
            fee: early.fees,
            insurance,
            maintenance,
            total,
            mortgage_balance: state.remaining_principal,
            investment_balance: state.investable_balance,
            investment_interest,
            net_cash_flow,
        };

        (payment, snapshot)
    }

    /// Monthly rate for a 0-indexed month, recasting the instalment as configured
    fn select_rate(&self, index: u32, state: &mut LoanState) -> f64 {
        let initial_months = self.params.initial_months();
        if index < initial_months {
            return self.params.initial_rate;
        }

        let recast = match self.params.emi_recast {
            EmiRecast::AtRateSwitch => index == initial_months,
            EmiRecast::Monthly => true,
        };
        if recast {
            let remaining_months = self.params.total_months() - index;
            let rate = self.params.later_rate;
            state.emi = annuity_payment(state.remaining_principal, rate, remaining_months);
            debug!("Instalment recast to {:.2} over {} months", state.emi, remaining_months);
        }

        self.params.later_rate
    }

    /// Route every event due by `date` through the cap, threading the cap usage,
    /// outstanding balance and cash between events
    fn apply_early_repayments(
        &self,
        date: NaiveDate,
        state: &mut LoanState,
        cursor: &mut ScheduleCursor<'_>,
    ) -> MonthRepayments {
        let mut applied = MonthRepayments::default();

        for event in cursor.drain_until(date) {
            let decision = self.cap.apply(
                event.amount,
                state.remaining_principal - applied.accepted,
                state.investable_balance - applied.accepted - applied.fees,
                state.annual_early_repayments,
            );
            debug!(
                "{:?} early repayment dated {} applied {}: requested {:.2}, accepted {:.2}, \
                 fee {:.2}",
                event.kind, event.date, date, event.amount, decision.accepted, decision.fee
            );

            applied.accepted += decision.accepted;
            applied.fees += decision.fee;
            state.annual_early_repayments = decision.annual_used;
        }

        applied
    }

    fn summarize(
        &self,
        state: &LoanState,
        initial_investment: f64,
        last: Option<&NetWorthSnapshot>,
    ) -> MortgageSummary {
        MortgageSummary {
            total_months: state.month,
            total_interest: state.total_interest,
            total_insurance: state.total_insurance,
            total_maintenance: state.total_maintenance,
            total_early_repayments: state.total_early_repayments,
            total_early_repayment_fees: state.total_early_repayment_fees,
            total_principal_repaid: state.total_principal_repaid,
            initial_costs: self.initial_costs,
            initial_investment,
            final_investment_balance: state.investable_balance,
            final_mortgage_balance: state.remaining_principal,
            final_net_worth: last.map(|s| s.net_worth).unwrap_or(0.0),
            break_even_month: state.break_even_month,
            payoff_month: state.payoff_month,
        }
    }
}
