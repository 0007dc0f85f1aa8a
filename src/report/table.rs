//! Fixed-width console tables
//!
//! Every function writes to any [`Write`] so output can go to stdout or be
//! captured. `limit` caps the number of monthly rows shown; the remaining
//! count is printed after the table.

use std::io::{self, Write};

use crate::comparison::ComparisonRow;
use crate::mortgage::{MortgageResult, OwnershipInsights};
use crate::rent::RentResult;

/// Marker in the first column of the break-even row
pub const BREAK_EVEN_MARKER: char = '*';

/// `1234567.891` as `1,234,567.89`
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Rounding can turn a tiny negative into "0.00"
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| "-".to_string())
}

fn write_remaining<W: Write>(w: &mut W, shown: usize, total: usize) -> io::Result<()> {
    if total > shown {
        writeln!(w, "... ({} more months)", total - shown)?;
    }
    Ok(())
}

/// Monthly mortgage payment plan with the break-even month marked
pub fn write_payment_plan<W: Write>(
    w: &mut W,
    result: &MortgageResult,
    limit: Option<usize>,
) -> io::Result<()> {
    let break_even = result.summary.break_even_month;
    let shown = limit.unwrap_or(result.payments.len()).min(result.payments.len());

    writeln!(
        w,
        " {:>5} {:>10} {:>12} {:>12} {:>12} {:>10} {:>10} {:>11} {:>12} {:>14} {:>14} {:>12}",
        "Month", "Date", "Principal", "Interest", "Early Rep.", "Fee", "Insurance",
        "Maintenance", "Total", "Mortgage Bal.", "Investments", "Net Cash"
    )?;
    writeln!(w, "{}", "-".repeat(152))?;

    for row in result.payments.iter().take(shown) {
        let marker = if Some(row.month) == break_even { BREAK_EVEN_MARKER } else { ' ' };
        writeln!(
            w,
            "{}{:>5} {:>10} {:>12} {:>12} {:>12} {:>10} {:>10} {:>11} {:>12} {:>14} {:>14} {:>12}",
            marker,
            row.month,
            row.date,
            format_amount(row.principal),
            format_amount(row.interest),
            format_amount(row.early_repayment),
            format_amount(row.fee),
            format_amount(row.insurance),
            format_amount(row.maintenance),
            format_amount(row.total),
            format_amount(row.mortgage_balance),
            format_amount(row.investment_balance),
            format_amount(row.net_cash_flow),
        )?;
    }
    write_remaining(w, shown, result.payments.len())?;

    if break_even.is_some() {
        writeln!(w, "{} investments cover the remaining mortgage", BREAK_EVEN_MARKER)?;
    }
    Ok(())
}

pub fn write_mortgage_summary<W: Write>(
    w: &mut W,
    result: &MortgageResult,
    insights: &OwnershipInsights,
) -> io::Result<()> {
    let summary = &result.summary;
    let costs = &summary.initial_costs;

    writeln!(w, "Initial costs:")?;
    write_amount(w, "DLD fee:", costs.dld_fee)?;
    write_amount(w, "Property registration:", costs.property_registration_fee)?;
    write_amount(w, "Mortgage registration:", costs.mortgage_registration_fee)?;
    write_amount(w, "Brokerage:", costs.brokerage_fee)?;
    write_amount(w, "Conveyance:", costs.conveyance_fee)?;
    write_amount(w, "Valuation:", costs.valuation_fee)?;
    write_amount(w, "Bank opening:", costs.bank_opening_fee)?;
    write_amount(w, "Down payment:", insights.down_payment)?;
    write_amount(w, "Total upfront:", insights.total_initial_costs)?;
    writeln!(w)?;

    writeln!(w, "Mortgage summary:")?;
    write_amount(w, "Loan amount:", insights.loan_amount)?;
    writeln!(w, "  Loan to value:              {:>19.2}%", insights.ltv_percent)?;
    writeln!(w, "  Debt to income:             {:>20.2}", insights.debt_to_income)?;
    write_amount(w, "Total interest:", summary.total_interest)?;
    write_amount(w, "Total insurance:", summary.total_insurance)?;
    write_amount(w, "Total maintenance:", summary.total_maintenance)?;
    write_amount(w, "Early repayments:", summary.total_early_repayments)?;
    write_amount(w, "Early repayment fees:", summary.total_early_repayment_fees)?;
    write_amount(w, "Total cost of ownership:", insights.total_cost_of_ownership)?;
    write_amount(w, "Final investments:", summary.final_investment_balance)?;
    write_amount(w, "Final net worth:", summary.final_net_worth)?;

    match summary.payoff_month {
        Some(month) => writeln!(w, "  Paid off in month:          {:>20}", month)?,
        None => writeln!(w, "  Paid off in month:          {:>20}", "never")?,
    }
    match result.break_even_record() {
        Some(row) => {
            let label = format!("{} ({})", row.month, row.date);
            writeln!(w, "  Break-even:                 {:>20}", label)?
        }
        None => writeln!(w, "  Break-even:                 {:>20}", "not reached")?,
    }
    Ok(())
}

/// One labelled summary line with the amount right-aligned
fn write_amount<W: Write>(w: &mut W, label: &str, amount: f64) -> io::Result<()> {
    writeln!(w, "  {:<28}AED {:>16}", label, format_amount(amount))
}

/// Monthly rent-and-invest balance progression
pub fn write_balance_progression<W: Write>(
    w: &mut W,
    result: &RentResult,
    limit: Option<usize>,
) -> io::Result<()> {
    let shown = limit.unwrap_or(result.balances.len()).min(result.balances.len());

    writeln!(
        w,
        " {:>5} {:>10} {:>14} {:>10} {:>12} {:>9} {:>10} {:>10}",
        "Month", "Date", "Balance", "Interest", "Rent", "EJARI", "Top Up", "Move-in"
    )?;
    writeln!(w, "{}", "-".repeat(88))?;

    for row in result.balances.iter().take(shown) {
        writeln!(
            w,
            " {:>5} {:>10} {:>14} {:>10} {:>12} {:>9} {:>10} {:>10}",
            row.month,
            row.date,
            format_amount(row.balance),
            format_amount(row.interest),
            format_amount(row.rent),
            format_amount(row.ejari_fee),
            format_amount(row.top_up),
            format_amount(row.move_in_costs),
        )?;
    }
    write_remaining(w, shown, result.balances.len())
}

pub fn write_rent_summary<W: Write>(w: &mut W, result: &RentResult) -> io::Result<()> {
    let summary = &result.summary;

    writeln!(w, "Rent & invest summary:")?;
    write_amount(w, "Final balance:", summary.final_balance)?;
    write_amount(w, "Total rental costs:", summary.total_rental_costs)?;
    write_amount(w, "Total earned interest:", summary.total_earned_interest)?;
    write_amount(w, "Average monthly rent:", summary.average_monthly_rent)?;
    writeln!(w, "  Apartment changes:          {:>20}", summary.apartment_changes)?;
    if let Some(month) = summary.first_deficit_month {
        writeln!(w, "  First deficit month:        {:>20}", month)?;
    }
    Ok(())
}

/// Net worth of both strategies side by side
pub fn write_comparison<W: Write>(
    w: &mut W,
    rows: &[ComparisonRow],
    limit: Option<usize>,
) -> io::Result<()> {
    let shown = limit.unwrap_or(rows.len()).min(rows.len());

    writeln!(
        w,
        " {:>10} {:>18} {:>18} {:>16}",
        "Date", "Mortgage", "Rent & Invest", "Difference"
    )?;
    writeln!(w, "{}", "-".repeat(66))?;

    for row in rows.iter().take(shown) {
        writeln!(
            w,
            " {:>10} {:>18} {:>18} {:>16}",
            row.date,
            format_optional(row.mortgage_net_worth),
            format_optional(row.rent_net_worth),
            format_optional(row.difference()),
        )?;
    }
    write_remaining(w, shown, rows.len())
}
