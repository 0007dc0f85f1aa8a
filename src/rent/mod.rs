//! Renting strategy: rent cheques, moves and EJARI paid from an invested balance

mod engine;
mod params;
mod records;

pub use engine::{InvestmentState, RentEngine};
pub use params::RentParameters;
pub use records::{BalanceRecord, RentResult, RentSummary};
