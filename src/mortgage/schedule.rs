//! Early repayment scheduling
//!
//! Regular (interval based) and arbitrary (explicitly dated) repayments are
//! combined into one chronological sequence which the amortization engine
//! drains month by month.

use crate::calendar::advance_months;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::params::MortgageParameters;

/// Origin of an early repayment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentKind {
    Regular,
    Arbitrary,
}

/// A single requested early repayment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyRepaymentEvent {
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: RepaymentKind,
}

/// Chronological sequence of early repayment events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepaymentSchedule {
    events: Vec<EarlyRepaymentEvent>,
}

impl RepaymentSchedule {
    /// Build the merged schedule for a mortgage
    pub fn build(params: &MortgageParameters) -> Self {
        let last_payment =
            advance_months(params.start_date, params.total_months().saturating_sub(1));

        let regular = match &params.regular_repayment {
            Some(regular) => {
                regular_dates(regular.first_date, regular.interval_months, last_payment)
                    .into_iter()
                    .map(|date| EarlyRepaymentEvent {
                        date,
                        amount: regular.amount,
                        kind: RepaymentKind::Regular,
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let arbitrary = params
            .arbitrary_repayments
            .iter()
            .map(|r| EarlyRepaymentEvent {
                date: r.date,
                amount: r.amount,
                kind: RepaymentKind::Arbitrary,
            })
            .collect();

        Self {
            events: merge_by_date(regular, arbitrary),
        }
    }

    pub fn from_events(events: Vec<EarlyRepaymentEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[EarlyRepaymentEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Cursor that yields events in order as payment dates advance
    pub fn cursor(&self) -> ScheduleCursor<'_> {
        ScheduleCursor {
            events: &self.events,
            next: 0,
        }
    }
}

/// Drains events from a [`RepaymentSchedule`] up to a payment date
#[derive(Debug)]
pub struct ScheduleCursor<'a> {
    events: &'a [EarlyRepaymentEvent],
    next: usize,
}

impl<'a> ScheduleCursor<'a> {
    /// All not yet drained events dated on or before `payment_date`
    pub fn drain_until(&mut self, payment_date: NaiveDate) -> &'a [EarlyRepaymentEvent] {
        let remaining = &self.events[self.next..];
        let due = remaining.partition_point(|e| e.date <= payment_date);
        self.next += due;
        &remaining[..due]
    }

    /// Events that were never reached
    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }
}

/// Dates from `first`, each `interval_months` after the previous one, up to
/// and including `last`
///
/// Each date steps from the previous one, so a day clamped in a short month
/// carries forward (Jan 31, Feb 29, Mar 29). An interval of zero yields no dates.
pub fn regular_dates(first: NaiveDate, interval_months: u32, last: NaiveDate) -> Vec<NaiveDate> {
    if interval_months == 0 {
        return Vec::new();
    }

    std::iter::successors(Some(first), |date| {
        let next = advance_months(*date, interval_months);
        // Stepping stops once dates saturate at the calendar's end
        (next > *date).then_some(next)
    })
    .take_while(|date| *date <= last)
    .collect()
}

/// Stable merge of two date-ordered sequences, regular events first on equal dates
pub fn merge_by_date(
    regular: Vec<EarlyRepaymentEvent>,
    arbitrary: Vec<EarlyRepaymentEvent>,
) -> Vec<EarlyRepaymentEvent> {
    let mut merged = regular;
    merged.extend(arbitrary);
    // Stable sort keeps regular events ahead of arbitrary ones on the same date
    merged.sort_by_key(|event| event.date);
    merged
}
