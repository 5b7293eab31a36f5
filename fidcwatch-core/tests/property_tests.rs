//! Property tests for the coercion and derivation invariants.

use chrono::{Months, NaiveDate};
use proptest::prelude::*;

use fidcwatch_core::data::ingest::parse_numeric_cell;
use fidcwatch_core::data::returns::{derive_cumulative_returns, sort_records};
use fidcwatch_core::domain::{FundId, FundRecord};

fn record(fund: &str, month_offset: u32, rate: Option<f64>) -> FundRecord {
    let mut rec = FundRecord::new(FundId::from(fund));
    rec.reference_date =
        NaiveDate::from_ymd_opt(2022, 1, 31).map(|d| d + Months::new(month_offset));
    rec.sub_return_rate = rate;
    rec
}

proptest! {
    /// cumulative(d) = ∏(1 + rate/100) − 1 over dates ≤ d, for any rates.
    #[test]
    fn cumulative_return_matches_running_product(
        rates in prop::collection::vec(prop::option::of(-50.0f64..50.0), 1..40)
    ) {
        let mut records: Vec<FundRecord> = rates
            .iter()
            .enumerate()
            .map(|(i, rate)| record("Alpha", i as u32, *rate))
            .collect();
        sort_records(&mut records);
        derive_cumulative_returns(&mut records);

        let mut acc = 1.0f64;
        for (rec, rate) in records.iter().zip(&rates) {
            acc *= 1.0 + rate.unwrap_or(0.0) / 100.0;
            prop_assert!((rec.cumulative_return - (acc - 1.0)).abs() < 1e-9);
            prop_assert_eq!(rec.sub_return_rate, *rate);
        }
    }

    /// Running derivation twice over the same rows changes nothing.
    #[test]
    fn derivation_is_idempotent(
        rates in prop::collection::vec(prop::option::of(-50.0f64..50.0), 1..40)
    ) {
        let mut records: Vec<FundRecord> = rates
            .iter()
            .enumerate()
            .map(|(i, rate)| record(if i % 2 == 0 { "Alpha" } else { "Beta" }, i as u32, *rate))
            .collect();
        sort_records(&mut records);
        derive_cumulative_returns(&mut records);
        let first: Vec<f64> = records.iter().map(|r| r.cumulative_return).collect();

        sort_records(&mut records);
        derive_cumulative_returns(&mut records);
        let second: Vec<f64> = records.iter().map(|r| r.cumulative_return).collect();

        prop_assert_eq!(first, second);
    }

    /// After sorting, dates never decrease within a fund.
    #[test]
    fn sorted_dates_are_monotone_per_fund(
        rows in prop::collection::vec((0u8..4, 0u32..60), 0..80)
    ) {
        let mut records: Vec<FundRecord> = rows
            .iter()
            .map(|(fund, offset)| record(&format!("Fund{fund}"), *offset, None))
            .collect();
        sort_records(&mut records);

        for pair in records.windows(2) {
            if pair[0].fund == pair[1].fund {
                prop_assert!(pair[0].reference_date <= pair[1].reference_date);
            }
        }
    }

    /// Decimal-comma cells coerce to the same value as their period form.
    #[test]
    fn comma_decimal_equals_period_decimal(v in -1.0e9f64..1.0e9) {
        let period = format!("{v:.4}");
        let comma = period.replace('.', ",");
        let parsed = parse_numeric_cell(Some(&comma));
        let expected = period.parse::<f64>().ok();
        prop_assert_eq!(parsed, expected);
    }
}
