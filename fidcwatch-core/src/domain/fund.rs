//! Fund record — one monitored fund (deal) on one reference date.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fund (deal) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FundId(pub String);

impl FundId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FundId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FundId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One fund-level row.
///
/// Fixed columns are `Option` — `None` is the sentinel for a cell that failed
/// coercion; the row itself is always kept. Dynamic column families are keyed
/// by the suffix after the family prefix (`status_liquidity` → `liquidity`),
/// and a family map simply has no entry where the source cell was blank or
/// unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    pub fund: FundId,
    /// `None` when the source date failed to parse.
    pub reference_date: Option<NaiveDate>,
    pub net_worth: Option<f64>,
    pub pv_credit_rights: Option<f64>,
    pub pdd: Option<f64>,
    /// Subordinated-quota periodic return, in percent, exactly as sourced.
    pub sub_return_rate: Option<f64>,
    /// Receivables originated in the reference month.
    pub origination: Option<f64>,
    pub net_allocation: Option<f64>,
    /// Compliance flags (`status_*`), string-valued.
    pub status: BTreeMap<String, String>,
    /// Subordination ratio per tranche (`subordination_*`).
    pub subordination: BTreeMap<String, f64>,
    /// Contractual limit per tranche (`threshold_*`).
    pub thresholds: BTreeMap<String, f64>,
    /// Delinquency ratio per overdue-range bucket (`delinq_ratio_*`).
    pub delinquency: BTreeMap<String, f64>,
    /// Receivables balance per time-to-maturity bucket.
    pub aging: BTreeMap<String, f64>,
    /// Derived: compounded subordinated return up to and including this row.
    pub cumulative_return: f64,
}

impl FundRecord {
    pub fn new(fund: FundId) -> Self {
        Self {
            fund,
            reference_date: None,
            net_worth: None,
            pv_credit_rights: None,
            pdd: None,
            sub_return_rate: None,
            origination: None,
            net_allocation: None,
            status: BTreeMap::new(),
            subordination: BTreeMap::new(),
            thresholds: BTreeMap::new(),
            delinquency: BTreeMap::new(),
            aging: BTreeMap::new(),
            cumulative_return: 0.0,
        }
    }

    /// Compounding factor contributed by this row: `1 + rate/100`.
    ///
    /// A missing rate compounds as zero return; the raw rate field is never
    /// touched by derivation, which keeps recomputation idempotent.
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.sub_return_rate.unwrap_or(0.0) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_factor_from_percent_rate() {
        let mut rec = FundRecord::new(FundId::from("Alpha"));
        rec.sub_return_rate = Some(1.5);
        assert!((rec.growth_factor() - 1.015).abs() < 1e-12);
    }

    #[test]
    fn missing_rate_compounds_as_zero() {
        let rec = FundRecord::new(FundId::from("Alpha"));
        assert_eq!(rec.growth_factor(), 1.0);
        assert_eq!(rec.sub_return_rate, None);
    }

    #[test]
    fn fund_ids_order_lexically() {
        assert!(FundId::from("Alpha") < FundId::from("Beta"));
    }
}
