//! CSV export of record sequences

use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Write `records` with a header row taken from the field names
pub fn write_records<W: Write, T: Serialize>(writer: W, records: &[T]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `records` to a new file at `path`
pub fn write_records_to_path<P: AsRef<Path>, T: Serialize>(
    path: P,
    records: &[T],
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::ComparisonRow;
    use crate::ScenarioRunner;
    use chrono::NaiveDate;

    #[test]
    fn test_payment_plan_csv_has_header_and_one_row_per_month() {
        let outcome = ScenarioRunner::default().run_mortgage().unwrap();

        let mut out = Vec::new();
        write_records(&mut out, &outcome.result.payments).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "month,date,principal,interest,early_repayment,fee,insurance,maintenance,total,\
             mortgage_balance,investment_balance,investment_interest,net_cash_flow"
        );
        assert!(lines.next().unwrap().starts_with("1,2084-01-01,"));
        assert_eq!(text.lines().count(), 301);
    }

    #[test]
    fn test_missing_side_written_as_empty_field() {
        let rows = vec![ComparisonRow {
            date: NaiveDate::from_ymd_opt(2084, 1, 1).unwrap(),
            mortgage_net_worth: Some(1.5),
            rent_net_worth: None,
        }];

        let mut out = Vec::new();
        write_records(&mut out, &rows).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,mortgage_net_worth,rent_net_worth\n2084-01-01,1.5,\n"
        );
    }
}
