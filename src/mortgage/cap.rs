//! Annual early repayment ceiling
//!
//! Banks cap penalty-free prepayments at a fraction of the original loan per
//! calendar year. Beyond that the request is either cut back to the remaining
//! headroom or, when allowed, accepted against an overage fee. A repayment can
//! never exceed the outstanding balance or the cash available to pay it.

/// Overage fee rate applied to the outstanding balance
const OVERAGE_FEE_RATE: f64 = 0.01;

/// Maximum overage fee per repayment
const OVERAGE_FEE_CAP: f64 = 10_000.0;

/// Outcome of routing one requested repayment through the cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapDecision {
    /// Amount actually applied to the loan
    pub accepted: f64,

    /// Overage fee charged, independent of any cash clamp
    pub fee: f64,

    /// Early repayments counted towards this year's cap, including this one
    pub annual_used: f64,
}

/// The annual cap policy for one mortgage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepaymentCap {
    /// Yearly ceiling (principal × max fraction)
    pub annual_limit: f64,

    /// Whether prepayment beyond the ceiling is permitted against a fee
    pub allow_exceed_limit: bool,
}

impl RepaymentCap {
    pub fn new(principal: f64, max_fraction: f64, allow_exceed_limit: bool) -> Self {
        Self {
            annual_limit: principal * max_fraction,
            allow_exceed_limit,
        }
    }

    /// Overage fee for exceeding the cap with `remaining_principal` outstanding
    pub fn overage_fee(remaining_principal: f64) -> f64 {
        (OVERAGE_FEE_RATE * remaining_principal).min(OVERAGE_FEE_CAP)
    }

    /// Decide how much of `requested` is applied. Pure: the caller applies the result.
    pub fn apply(
        &self,
        requested: f64,
        remaining_principal: f64,
        investable_balance: f64,
        annual_used: f64,
    ) -> CapDecision {
        let headroom = self.annual_limit - annual_used;
        let mut amount = requested;
        let mut fee = 0.0;

        if amount > headroom {
            if self.allow_exceed_limit {
                fee = Self::overage_fee(remaining_principal);
                if amount + fee > investable_balance {
                    amount = investable_balance - fee;
                }
            } else {
                amount = headroom;
            }
        }

        amount = amount.min(remaining_principal);

        // Never more than the available cash, and never negative
        let accepted = amount.min(investable_balance).max(0.0);
        if accepted < amount {
            log::warn!(
                "Early repayment of {:.2} reduced to {:.2}: investable balance {:.2}",
                amount,
                accepted,
                investable_balance
            );
        }

        CapDecision {
            accepted,
            fee,
            annual_used: annual_used + accepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn capped() -> RepaymentCap {
        RepaymentCap::new(800_000.0, 0.2, false)
    }

    fn with_overage() -> RepaymentCap {
        RepaymentCap::new(800_000.0, 0.2, true)
    }

    #[test]
    fn test_within_headroom_accepted_in_full() {
        let decision = capped().apply(10_000.0, 700_000.0, 50_000.0, 0.0);
        assert_eq!(decision, CapDecision { accepted: 10_000.0, fee: 0.0, annual_used: 10_000.0 });
    }

    #[test]
    fn test_clamped_to_headroom_without_overage() {
        let decision = capped().apply(100_000.0, 700_000.0, 500_000.0, 150_000.0);
        assert_relative_eq!(decision.accepted, 10_000.0);
        assert_eq!(decision.fee, 0.0);
        assert_relative_eq!(decision.annual_used, 160_000.0);
    }

    #[test]
    fn test_overage_fee_is_one_percent_capped_at_ten_thousand() {
        assert_relative_eq!(RepaymentCap::overage_fee(500_000.0), 5_000.0);
        assert_relative_eq!(RepaymentCap::overage_fee(2_000_000.0), 10_000.0);

        let decision = with_overage().apply(200_000.0, 700_000.0, 1_000_000.0, 0.0);
        assert_relative_eq!(decision.accepted, 200_000.0);
        assert_relative_eq!(decision.fee, 7_000.0);
    }

    #[test]
    fn test_overage_limited_by_cash_still_charges_full_fee() {
        let decision = with_overage().apply(200_000.0, 700_000.0, 100_000.0, 0.0);
        assert_relative_eq!(decision.accepted, 93_000.0);
        assert_relative_eq!(decision.fee, 7_000.0);
        assert_relative_eq!(decision.annual_used, 93_000.0);
    }

    #[test]
    fn test_cannot_overpay_loan() {
        let decision = capped().apply(50_000.0, 20_000.0, 100_000.0, 0.0);
        assert_relative_eq!(decision.accepted, 20_000.0);
    }

    #[test]
    fn test_limited_by_investable_balance() {
        let decision = capped().apply(50_000.0, 700_000.0, 12_345.0, 0.0);
        assert_relative_eq!(decision.accepted, 12_345.0);
        assert_relative_eq!(decision.annual_used, 12_345.0);
    }

    #[test]
    fn test_negative_balance_accepts_nothing() {
        let decision = capped().apply(10_000.0, 700_000.0, -5_000.0, 0.0);
        assert_eq!(decision.accepted, 0.0);
        assert_eq!(decision.annual_used, 0.0);
    }

    #[test]
    fn test_no_fee_when_within_cap_even_if_allowed() {
        let decision = with_overage().apply(160_000.0, 700_000.0, 1_000_000.0, 0.0);
        assert_eq!(decision.fee, 0.0);
        assert_relative_eq!(decision.accepted, 160_000.0);
    }
}
