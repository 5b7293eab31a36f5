//! Derived cumulative subordinated returns.

use crate::domain::{FundId, FundRecord};

/// Sort rows by (fund, reference date) ascending. `None` dates sort first,
/// so rows with unparseable dates never interrupt a fund's compounding run.
/// The sort is stable: equal (fund, date) rows keep file order.
pub fn sort_records(records: &mut [FundRecord]) {
    records.sort_by(|a, b| {
        a.fund
            .cmp(&b.fund)
            .then(a.reference_date.cmp(&b.reference_date))
    });
}

/// Recompute the cumulative compounded return column in place.
///
/// For each fund, in ascending date order:
/// `cumulative(d) = ∏ (1 + rate_i / 100) − 1` over that fund's rows with
/// date ≤ d. The raw rate column is read, never written, so running this
/// twice over the same sorted rows yields identical results.
///
/// Expects `records` already sorted by (fund, date); the compounding run
/// resets whenever the fund changes.
pub fn derive_cumulative_returns(records: &mut [FundRecord]) {
    let mut acc = 1.0;
    let mut current: Option<FundId> = None;
    for rec in records.iter_mut() {
        if current.as_ref() != Some(&rec.fund) {
            current = Some(rec.fund.clone());
            acc = 1.0;
        }
        acc *= rec.growth_factor();
        rec.cumulative_return = acc - 1.0;
    }
}
