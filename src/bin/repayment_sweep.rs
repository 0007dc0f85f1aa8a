//! Sweep the regular early repayment amount
//!
//! Runs the scenario once per amount in parallel and writes one CSV row per
//! run with the final net worth of both strategies, total interest and the
//! payoff month.

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use rent_vs_buy::config::RegularRepaymentInput;
use rent_vs_buy::report::write_records_to_path;
use rent_vs_buy::ScenarioRunner;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "repayment_sweep", about = "Sweep regular early repayment amounts")]
struct Args {
    /// Scenario JSON file; the built-in example is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    min: f64,

    #[arg(long, default_value_t = 100_000.0)]
    max: f64,

    #[arg(long, default_value_t = 5_000.0)]
    step: f64,

    /// Months between regular repayments
    #[arg(long, default_value_t = 12)]
    interval: u32,

    /// First regular repayment date, defaults to the configured one or the start date
    #[arg(long)]
    first_date: Option<String>,

    #[arg(long, default_value = "repayment_sweep.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    regular_amount: f64,
    mortgage_final_net_worth: f64,
    rent_final_balance: f64,
    total_interest: f64,
    total_early_repayments: f64,
    total_early_repayment_fees: f64,
    payoff_month: Option<u32>,
    break_even_month: Option<u32>,
}

fn amounts(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || max < min {
        return vec![min];
    }
    let count = ((max - min) / step).floor() as usize + 1;
    (0..count).map(|i| min + step * i as f64).collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.config {
        Some(path) => ScenarioRunner::from_json_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioRunner::default(),
    };
    let base = runner.config();
    let first_date = args.first_date.clone().unwrap_or_else(|| {
        base.mortgage
            .regular_repayment
            .as_ref()
            .map(|r| r.first_date.clone())
            .unwrap_or_else(|| base.household.start_date.clone())
    });

    let amounts = amounts(args.min, args.max, args.step);
    println!("Running {} scenarios...", amounts.len());
    let start = Instant::now();

    // Each run is independent and single-threaded
    let rows: Vec<SweepRow> = amounts
        .par_iter()
        .map(|&amount| -> rent_vs_buy::Result<SweepRow> {
            let mut config = base.clone();
            config.mortgage.regular_repayment = Some(RegularRepaymentInput {
                amount,
                interval_months: args.interval,
                first_date: first_date.clone(),
            });

            let summary = ScenarioRunner::new(config).run()?.summary();
            Ok(SweepRow {
                regular_amount: amount,
                mortgage_final_net_worth: summary.mortgage_final_net_worth,
                rent_final_balance: summary.rent_final_balance,
                total_interest: summary.total_interest,
                total_early_repayments: summary.total_early_repayments,
                total_early_repayment_fees: summary.total_early_repayment_fees,
                payoff_month: summary.payoff_month,
                break_even_month: summary.break_even_month,
            })
        })
        .collect::<rent_vs_buy::Result<Vec<SweepRow>>>()
        .context("invalid scenario")?;

    println!("Scenarios complete in {:?}", start.elapsed());

    write_records_to_path(&args.output, &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Results written to: {}", args.output.display());

    if let Some(best) = rows
        .iter()
        .max_by(|a, b| a.mortgage_final_net_worth.total_cmp(&b.mortgage_final_net_worth))
    {
        println!(
            "Highest final net worth: {:.2} with {:.2} every {} months",
            best.mortgage_final_net_worth, best.regular_amount, args.interval
        );
    }

    Ok(())
}
