//! The loaded, analysis-ready snapshot the presentation layer consumes.
//!
//! A `PortfolioData` is built once per load, shared behind an `Arc`, and
//! only ever read. Every query here is a pure view over the sorted tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::{FundSchema, LoadIssue};
use crate::domain::{CovenantRecord, FundId, FundRecord, MacroRecord};

/// One bucket's time series, for the stacked-bar style charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSeries {
    pub bucket: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// One tranche's subordination ratio and its contractual threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrancheSeries {
    pub tranche: String,
    pub ratio: Vec<(NaiveDate, f64)>,
    pub threshold: Vec<(NaiveDate, f64)>,
}

/// Normalized tables for one load, plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    /// Fund rows sorted by (fund, date), cumulative return derived.
    pub funds: Vec<FundRecord>,
    /// Covenant table, `None` when the layout has none or its file failed.
    pub covenants: Option<Vec<CovenantRecord>>,
    /// Macro table, `None` when the layout has none or its file failed.
    pub macro_series: Option<Vec<MacroRecord>>,
    /// Macro indicator names in header order.
    pub macro_indicators: Vec<String>,
    /// Dynamic column families discovered at load time.
    pub schema: FundSchema,
    /// Non-fatal problems encountered during the load.
    pub issues: Vec<LoadIssue>,
    /// BLAKE3 fingerprint of the fund table.
    pub dataset_hash: String,
}

impl PortfolioData {
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Unique fund ids in ascending order.
    pub fn fund_ids(&self) -> Vec<FundId> {
        let mut ids: Vec<FundId> = self.funds.iter().map(|r| r.fund.clone()).collect();
        ids.dedup();
        ids
    }

    /// All rows for one fund, ascending by date. The rows are contiguous in
    /// the sorted table, so this is a binary-searched slice, not a scan.
    pub fn history(&self, fund: &FundId) -> &[FundRecord] {
        let start = self.funds.partition_point(|r| r.fund < *fund);
        let end = self.funds.partition_point(|r| r.fund <= *fund);
        &self.funds[start..end]
    }

    /// The most recent row for one fund. When two rows share the latest
    /// date, the later source row wins (the sort is stable).
    pub fn latest(&self, fund: &FundId) -> Option<&FundRecord> {
        self.history(fund).last()
    }

    /// Delinquency ratio per bucket over time, canonical bucket order.
    /// Rows with sentinel dates carry no x position and are skipped.
    pub fn delinquency_series(&self, fund: &FundId) -> Vec<BucketSeries> {
        self.bucket_series(fund, &self.schema.delinquency, |r, label| {
            r.delinquency.get(label).copied()
        })
    }

    /// Receivables aging balance per bucket over time, canonical order.
    pub fn aging_series(&self, fund: &FundId) -> Vec<BucketSeries> {
        self.bucket_series(fund, &self.schema.aging, |r, label| {
            r.aging.get(label).copied()
        })
    }

    fn bucket_series(
        &self,
        fund: &FundId,
        family: &[crate::data::FamilyColumn],
        get: impl Fn(&FundRecord, &str) -> Option<f64>,
    ) -> Vec<BucketSeries> {
        let history = self.history(fund);
        family
            .iter()
            .map(|col| BucketSeries {
                bucket: col.label.clone(),
                points: history
                    .iter()
                    .filter_map(|r| Some((r.reference_date?, get(r, &col.label)?)))
                    .collect(),
            })
            .collect()
    }

    /// Subordination ratio vs threshold per tranche. A tranche whose
    /// threshold never carries a value for this fund is skipped — no limit,
    /// nothing to compare against.
    pub fn subordination_series(&self, fund: &FundId) -> Vec<TrancheSeries> {
        let history = self.history(fund);
        self.schema
            .tranches
            .iter()
            .filter_map(|tranche| {
                let ratio: Vec<(NaiveDate, f64)> = history
                    .iter()
                    .filter_map(|r| {
                        Some((r.reference_date?, r.subordination.get(tranche).copied()?))
                    })
                    .collect();
                let threshold: Vec<(NaiveDate, f64)> = history
                    .iter()
                    .filter_map(|r| Some((r.reference_date?, r.thresholds.get(tranche).copied()?)))
                    .collect();
                if threshold.is_empty() {
                    return None;
                }
                Some(TrancheSeries {
                    tranche: tranche.clone(),
                    ratio,
                    threshold,
                })
            })
            .collect()
    }

    /// Cumulative subordinated return over time for one fund.
    pub fn cumulative_return_series(&self, fund: &FundId) -> Vec<(NaiveDate, f64)> {
        self.history(fund)
            .iter()
            .filter_map(|r| Some((r.reference_date?, r.cumulative_return)))
            .collect()
    }

    /// Covenant rows for one deal, source order.
    pub fn covenants_for(&self, fund: &FundId) -> Vec<&CovenantRecord> {
        self.covenants
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|c| &c.deal == fund)
            .collect()
    }

    /// One macro indicator over time, skipping sentinel dates and readings.
    pub fn macro_points(&self, indicator: &str) -> Vec<(NaiveDate, f64)> {
        self.macro_series
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|r| Some((r.date?, r.value(indicator)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::FundSchema;
    use crate::data::layout::SPLIT;

    fn record(fund: &str, ym: (i32, u32)) -> FundRecord {
        let mut rec = FundRecord::new(FundId::from(fund));
        rec.reference_date = NaiveDate::from_ymd_opt(ym.0, ym.1, 28);
        rec
    }

    fn snapshot(funds: Vec<FundRecord>, schema: FundSchema) -> PortfolioData {
        PortfolioData {
            funds,
            covenants: None,
            macro_series: None,
            macro_indicators: Vec::new(),
            schema,
            issues: Vec::new(),
            dataset_hash: String::new(),
        }
    }

    fn empty_schema() -> FundSchema {
        FundSchema::discover(&[], &SPLIT)
    }

    #[test]
    fn history_is_a_contiguous_slice_per_fund() {
        let data = snapshot(
            vec![
                record("Alpha", (2024, 1)),
                record("Alpha", (2024, 2)),
                record("Beta", (2024, 1)),
            ],
            empty_schema(),
        );
        assert_eq!(data.history(&FundId::from("Alpha")).len(), 2);
        assert_eq!(data.history(&FundId::from("Beta")).len(), 1);
        assert!(data.history(&FundId::from("Gamma")).is_empty());
        assert_eq!(data.fund_ids().len(), 2);
    }

    #[test]
    fn latest_is_the_last_sorted_row() {
        let data = snapshot(
            vec![record("Alpha", (2024, 1)), record("Alpha", (2024, 3))],
            empty_schema(),
        );
        let latest = data.latest(&FundId::from("Alpha")).unwrap();
        assert_eq!(latest.reference_date, NaiveDate::from_ymd_opt(2024, 3, 28));
    }

    #[test]
    fn delinquency_series_follows_canonical_bucket_order() {
        // Source column order deliberately scrambled.
        let columns: Vec<String> = ["delinq_ratio_61-90", "delinq_ratio_30", "delinq_ratio_31-60"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let schema = FundSchema::discover(&columns, &SPLIT);

        let mut rec = record("Alpha", (2024, 1));
        for (label, v) in [("30", 0.01), ("31-60", 0.02), ("61-90", 0.03)] {
            rec.delinquency.insert(label.to_string(), v);
        }
        let data = snapshot(vec![rec], schema);

        let series = data.delinquency_series(&FundId::from("Alpha"));
        let buckets: Vec<&str> = series.iter().map(|s| s.bucket.as_str()).collect();
        assert_eq!(buckets, ["30", "31-60", "61-90"]);
        assert_eq!(series[0].points[0].1, 0.01);
    }

    #[test]
    fn tranche_without_threshold_values_is_skipped() {
        let columns: Vec<String> = [
            "subordination_senior",
            "threshold_senior",
            "subordination_mezz",
            "threshold_mezz",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let schema = FundSchema::discover(&columns, &SPLIT);

        let mut rec = record("Alpha", (2024, 1));
        rec.subordination.insert("senior".into(), 0.35);
        rec.thresholds.insert("senior".into(), 0.25);
        rec.subordination.insert("mezz".into(), 0.15);
        // mezz threshold column exists but never carries a value.
        let data = snapshot(vec![rec], schema);

        let series = data.subordination_series(&FundId::from("Alpha"));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].tranche, "senior");
        assert_eq!(series[0].ratio[0].1, 0.35);
        assert_eq!(series[0].threshold[0].1, 0.25);
    }

    #[test]
    fn sentinel_dates_are_skipped_in_series() {
        let mut undated = record("Alpha", (2024, 1));
        undated.reference_date = None;
        let dated = record("Alpha", (2024, 2));
        let data = snapshot(vec![undated, dated], empty_schema());

        let series = data.cumulative_return_series(&FundId::from("Alpha"));
        assert_eq!(series.len(), 1);
    }
}
