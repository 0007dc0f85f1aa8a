//! Buying strategy: mortgage amortization with early repayments, ownership
//! costs and a parallel investment balance

mod cap;
mod costs;
mod engine;
mod params;
mod records;
mod schedule;
mod state;

pub use cap::{CapDecision, RepaymentCap};
pub use costs::{InitialCosts, OwnershipInsights};
pub use engine::{AmortizationEngine, EmiRecast};
pub use params::{ArbitraryRepayment, MortgageParameters, RegularRepayment};
pub use records::{MortgageResult, MortgageSummary, NetWorthSnapshot, PaymentRecord};
pub use schedule::{
    merge_by_date, regular_dates, EarlyRepaymentEvent, RepaymentKind, RepaymentSchedule,
    ScheduleCursor,
};
pub use state::{annuity_payment, LoanState};
