//! Rent vs Buy CLI
//!
//! Command-line interface for running the mortgage and rent-and-invest
//! projections and comparing them.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rent_vs_buy::config::load_repayments;
use rent_vs_buy::mortgage::EmiRecast;
use rent_vs_buy::report::{table, write_json, write_records_to_path};
use rent_vs_buy::ScenarioRunner;
use std::io::{self, Write};
use std::path::PathBuf;

/// Compare buying a home with a mortgage against renting and investing
#[derive(Parser)]
#[command(name = "rent-vs-buy", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mortgage payment plan, purchase costs and net worth
    Mortgage(CommonArgs),
    /// Rent-and-invest balance progression
    Rent(CommonArgs),
    /// Net worth of both strategies side by side
    Compare(CommonArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Scenario JSON file; the built-in example is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV of `date,amount` early repayments, replacing those in the config
    #[arg(long)]
    repayments: Option<PathBuf>,

    /// Override how the mortgage instalment is recomputed
    #[arg(long, value_enum)]
    emi_recast: Option<CliEmiRecast>,

    /// Write the monthly records to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Monthly rows to print (all when omitted)
    #[arg(long)]
    rows: Option<usize>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliEmiRecast {
    AtRateSwitch,
    Monthly,
}

impl From<CliEmiRecast> for EmiRecast {
    fn from(value: CliEmiRecast) -> Self {
        match value {
            CliEmiRecast::AtRateSwitch => EmiRecast::AtRateSwitch,
            CliEmiRecast::Monthly => EmiRecast::Monthly,
        }
    }
}

impl CommonArgs {
    fn runner(&self) -> Result<ScenarioRunner> {
        let mut runner = match &self.config {
            Some(path) => ScenarioRunner::from_json_path(path)
                .with_context(|| format!("loading scenario {}", path.display()))?,
            None => ScenarioRunner::default(),
        };

        let config = runner.config_mut();
        if let Some(path) = &self.repayments {
            config.mortgage.arbitrary_repayments = load_repayments(path)
                .with_context(|| format!("loading repayments {}", path.display()))?;
        }
        if let Some(recast) = self.emi_recast {
            config.mortgage.emi_recast = recast.into();
        }

        Ok(runner)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Mortgage(args) => run_mortgage(&args, &mut out),
        Commands::Rent(args) => run_rent(&args, &mut out),
        Commands::Compare(args) => run_compare(&args, &mut out),
    }
}

fn run_mortgage<W: Write>(args: &CommonArgs, out: &mut W) -> Result<()> {
    let outcome = args
        .runner()?
        .run_mortgage()
        .context("invalid mortgage configuration")?;

    if let Some(path) = &args.csv {
        write_records_to_path(path, &outcome.result.payments)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        write_json(&mut *out, &outcome)?;
        return Ok(());
    }

    writeln!(out, "------ Mortgage Payment Plan ------\n")?;
    table::write_payment_plan(out, &outcome.result, args.rows)?;
    writeln!(out)?;
    table::write_mortgage_summary(out, &outcome.result, &outcome.insights)?;
    Ok(())
}

fn run_rent<W: Write>(args: &CommonArgs, out: &mut W) -> Result<()> {
    let rent = args
        .runner()?
        .run_rent()
        .context("invalid rent configuration")?;

    if let Some(path) = &args.csv {
        write_records_to_path(path, &rent.balances)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        write_json(&mut *out, &rent)?;
        return Ok(());
    }

    writeln!(out, "------ Rent & Invest Balance Progression ------\n")?;
    table::write_balance_progression(out, &rent, args.rows)?;
    writeln!(out)?;
    table::write_rent_summary(out, &rent)?;
    Ok(())
}

fn run_compare<W: Write>(args: &CommonArgs, out: &mut W) -> Result<()> {
    let result = args.runner()?.run().context("invalid scenario")?;

    if let Some(path) = &args.csv {
        write_records_to_path(path, &result.comparison)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        write_json(&mut *out, &result.summary())?;
        return Ok(());
    }

    writeln!(out, "------ Comparison of Net Worth Progression ------\n")?;
    table::write_comparison(out, &result.comparison, args.rows)?;
    writeln!(out)?;

    let summary = result.summary();
    writeln!(
        out,
        "Final net worth (mortgage):       AED {:>16}",
        table::format_amount(summary.mortgage_final_net_worth)
    )?;
    writeln!(
        out,
        "Final net worth (rent & invest):  AED {:>16}",
        table::format_amount(summary.rent_final_balance)
    )?;
    match summary.crossover_date {
        Some(date) => writeln!(out, "Buying stays ahead from:          {:>20}", date)?,
        None => writeln!(out, "Buying does not stay ahead")?,
    }
    Ok(())
}
