//! Rent vs Buy - Month-by-month projections for the UAE housing market
//!
//! This library provides:
//! - Mortgage amortization with a two-tier rate, capped early repayments and
//!   overage fees, insurance and maintenance, and a parallel investment balance
//! - Purchase cost breakdown (DLD, registration, brokerage, bank fees)
//! - Rent-and-invest projection with rent cheques, moves, agency and EJARI fees
//! - Net worth comparison of both strategies by date
//! - Console tables plus CSV and JSON export

pub mod calendar;
pub mod comparison;
pub mod config;
pub mod error;
pub mod mortgage;
pub mod rent;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use comparison::{compare_net_worth, ComparisonRow};
pub use config::{Household, ScenarioConfig};
pub use error::{ConfigError, Result};
pub use mortgage::{AmortizationEngine, MortgageParameters, MortgageResult, PaymentRecord};
pub use rent::{BalanceRecord, RentEngine, RentParameters, RentResult};
pub use scenario::{ScenarioResult, ScenarioRunner, ScenarioSummary};
