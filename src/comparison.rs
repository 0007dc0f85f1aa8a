//! Side-by-side net worth of both strategies
//!
//! Mortgage snapshots are dated from the first payment and rent balances from
//! the end of the first month, so the two series overlap on all but one date
//! at each end. Rows are an outer join on date with either side optional.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::mortgage::NetWorthSnapshot;
use crate::rent::BalanceRecord;

/// Net worth of each strategy on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub mortgage_net_worth: Option<f64>,
    pub rent_net_worth: Option<f64>,
}

impl ComparisonRow {
    /// Buying minus renting, when both sides are known
    pub fn difference(&self) -> Option<f64> {
        Some(self.mortgage_net_worth? - self.rent_net_worth?)
    }
}

/// Outer join of both series on date, ordered by date
///
/// Both inputs are already in date order, as the engines emit them.
pub fn compare_net_worth(
    mortgage: &[NetWorthSnapshot],
    rent: &[BalanceRecord],
) -> Vec<ComparisonRow> {
    let mut rows = Vec::with_capacity(mortgage.len().max(rent.len()) + 1);
    let mut mortgage = mortgage.iter().peekable();
    let mut rent = rent.iter().peekable();

    loop {
        let row = match (mortgage.peek(), rent.peek()) {
            (Some(m), Some(r)) => match m.date.cmp(&r.date) {
                Ordering::Less => ComparisonRow {
                    date: m.date,
                    mortgage_net_worth: mortgage.next().map(|m| m.net_worth),
                    rent_net_worth: None,
                },
                Ordering::Greater => ComparisonRow {
                    date: r.date,
                    mortgage_net_worth: None,
                    rent_net_worth: rent.next().map(|r| r.balance),
                },
                Ordering::Equal => ComparisonRow {
                    date: m.date,
                    mortgage_net_worth: mortgage.next().map(|m| m.net_worth),
                    rent_net_worth: rent.next().map(|r| r.balance),
                },
            },
            (Some(m), None) => ComparisonRow {
                date: m.date,
                mortgage_net_worth: mortgage.next().map(|m| m.net_worth),
                rent_net_worth: None,
            },
            (None, Some(r)) => ComparisonRow {
                date: r.date,
                mortgage_net_worth: None,
                rent_net_worth: rent.next().map(|r| r.balance),
            },
            (None, None) => break,
        };
        rows.push(row);
    }

    rows
}

/// First date from which buying stays ahead of renting to the end
pub fn crossover_date(rows: &[ComparisonRow]) -> Option<NaiveDate> {
    let mut crossover = None;
    for row in rows {
        match row.difference() {
            Some(diff) if diff >= 0.0 => {
                crossover.get_or_insert(row.date);
            }
            Some(_) => crossover = None,
            None => {}
        }
    }
    crossover
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn snapshot(month: u32, date: NaiveDate, net_worth: f64) -> NetWorthSnapshot {
        NetWorthSnapshot {
            month,
            date,
            net_worth,
            property_value: 0.0,
            investment_balance: 0.0,
            remaining_principal: 0.0,
        }
    }

    fn balance(month: u32, date: NaiveDate, balance: f64) -> BalanceRecord {
        BalanceRecord {
            month,
            date,
            balance,
            interest: 0.0,
            rent: 0.0,
            ejari_fee: 0.0,
            top_up: 0.0,
            move_in_costs: 0.0,
            moved: false,
        }
    }

    #[test]
    fn test_outer_join_keeps_unmatched_dates() {
        let mortgage = vec![
            snapshot(1, date(2084, 1), 10.0),
            snapshot(2, date(2084, 2), 20.0),
            snapshot(3, date(2084, 3), 30.0),
        ];
        let rent = vec![
            balance(1, date(2084, 2), 5.0),
            balance(2, date(2084, 3), 6.0),
            balance(3, date(2084, 4), 7.0),
        ];

        let rows = compare_net_worth(&mortgage, &rent);
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2084, 1), date(2084, 2), date(2084, 3), date(2084, 4)]);

        assert_eq!(rows[0].mortgage_net_worth, Some(10.0));
        assert_eq!(rows[0].rent_net_worth, None);
        assert_eq!(rows[1].difference(), Some(15.0));
        assert_eq!(rows[3].mortgage_net_worth, None);
        assert_eq!(rows[3].rent_net_worth, Some(7.0));
        assert_eq!(rows[3].difference(), None);
    }

    #[test]
    fn test_empty_side() {
        let rent = vec![balance(1, date(2084, 2), 5.0)];
        let rows = compare_net_worth(&[], &rent);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mortgage_net_worth, None);
        assert!(compare_net_worth(&[], &[]).is_empty());
    }

    #[test]
    fn test_crossover_must_hold_to_the_end() {
        let mortgage = vec![
            snapshot(1, date(2084, 1), 10.0),
            snapshot(2, date(2084, 2), 1.0),
            snapshot(3, date(2084, 3), 10.0),
            snapshot(4, date(2084, 4), 10.0),
        ];
        let rent = vec![
            balance(1, date(2084, 1), 5.0),
            balance(2, date(2084, 2), 5.0),
            balance(3, date(2084, 3), 5.0),
        ];

        let rows = compare_net_worth(&mortgage, &rent);
        assert_eq!(crossover_date(&rows), Some(date(2084, 3)));

        let behind = vec![balance(1, date(2084, 4), 50.0)];
        let rows = compare_net_worth(&mortgage, &behind);
        assert_eq!(crossover_date(&rows), None);
    }
}
