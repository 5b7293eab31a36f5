//! Schema discovery — explicit queries over the source header row.
//!
//! The dynamic column families (`status_*`, `subordination_*`/`threshold_*`,
//! `delinq_ratio_*`, aging buckets) are discovered once per load; render
//! paths only ever query the resulting `FundSchema`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::layout::SchemaDialect;

/// One discovered family member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyColumn {
    /// Suffix after the family prefix; doubles as the display label.
    pub label: String,
    /// Full normalized column name in the source.
    pub column: String,
}

/// The discovered dynamic shape of a fund dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundSchema {
    /// Compliance-flag columns, in header order.
    pub status: Vec<FamilyColumn>,
    /// Subordination-ratio columns, in header order.
    pub subordination: Vec<FamilyColumn>,
    /// Threshold columns, in header order.
    pub thresholds: Vec<FamilyColumn>,
    /// Tranche suffixes that have BOTH a subordination and a threshold
    /// column — the pairs the comparison charts can draw.
    pub tranches: Vec<String>,
    /// Delinquency buckets in canonical overdue order.
    pub delinquency: Vec<FamilyColumn>,
    /// Aging buckets in canonical maturity order, totals excluded.
    pub aging: Vec<FamilyColumn>,
}

impl FundSchema {
    /// Scan a normalized header row for every family the dialect names.
    pub fn discover(columns: &[String], dialect: &SchemaDialect) -> Self {
        let status = family(columns, dialect.status_prefix);

        let subordination = family(columns, dialect.subordination_prefix);
        let thresholds = family(columns, dialect.threshold_prefix);
        let threshold_labels: BTreeSet<&str> =
            thresholds.iter().map(|c| c.label.as_str()).collect();
        let tranches = subordination
            .iter()
            .filter(|c| threshold_labels.contains(c.label.as_str()))
            .map(|c| c.label.clone())
            .collect();

        let mut delinquency = family(columns, dialect.delinq_prefix);
        sort_buckets(&mut delinquency);

        let mut aging: Vec<FamilyColumn> = family(columns, dialect.aging_prefix)
            .into_iter()
            .filter(|c| !c.label.contains(dialect.aging_total_marker))
            .collect();
        sort_buckets(&mut aging);

        Self {
            status,
            subordination,
            thresholds,
            tranches,
            delinquency,
            aging,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
            && self.subordination.is_empty()
            && self.thresholds.is_empty()
            && self.delinquency.is_empty()
            && self.aging.is_empty()
    }
}

/// Columns matching `prefix` with a non-empty suffix, in header order.
fn family(columns: &[String], prefix: &str) -> Vec<FamilyColumn> {
    columns
        .iter()
        .filter(|c| c.starts_with(prefix) && c.len() > prefix.len())
        .map(|c| FamilyColumn {
            label: c[prefix.len()..].to_string(),
            column: c.clone(),
        })
        .collect()
}

/// Canonical bucket order: by the leading day/term number in the label,
/// open-ended buckets (`90+`) after bounded ones sharing the same lower
/// edge, label as the final tie-break. Source column order is never
/// trusted — lexicographic order would put `120+` before `30`.
fn sort_buckets(buckets: &mut [FamilyColumn]) {
    buckets.sort_by_key(|c| bucket_sort_key(&c.label));
}

fn bucket_sort_key(label: &str) -> (u32, u8, String) {
    let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
    let lower = digits.parse::<u32>().unwrap_or(u32::MAX);
    let open_ended = u8::from(label.ends_with('+'));
    (lower, open_ended, label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::layout::SPLIT;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn discovers_status_family_in_header_order() {
        let schema = FundSchema::discover(
            &cols(&["fund", "status_liquidity", "net_worth", "status_concentration"]),
            &SPLIT,
        );
        let labels: Vec<&str> = schema.status.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["liquidity", "concentration"]);
        assert_eq!(schema.status[0].column, "status_liquidity");
    }

    #[test]
    fn tranche_requires_both_ratio_and_threshold() {
        let schema = FundSchema::discover(
            &cols(&[
                "subordination_senior",
                "threshold_senior",
                "subordination_mezz",
            ]),
            &SPLIT,
        );
        assert_eq!(schema.tranches, ["senior"]);
    }

    #[test]
    fn delinquency_buckets_sort_by_overdue_range() {
        let schema = FundSchema::discover(
            &cols(&[
                "delinq_ratio_61-90",
                "delinq_ratio_120+",
                "delinq_ratio_30",
                "delinq_ratio_31-60",
            ]),
            &SPLIT,
        );
        let labels: Vec<&str> = schema.delinquency.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["30", "31-60", "61-90", "120+"]);
    }

    #[test]
    fn open_ended_bucket_sorts_after_bounded_same_edge() {
        let schema = FundSchema::discover(
            &cols(&["delinq_ratio_90+", "delinq_ratio_90"]),
            &SPLIT,
        );
        let labels: Vec<&str> = schema.delinquency.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["90", "90+"]);
    }

    #[test]
    fn aging_total_columns_are_excluded() {
        let schema = FundSchema::discover(
            &cols(&["cr_due_360", "cr_due_total", "cr_due_30"]),
            &SPLIT,
        );
        let labels: Vec<&str> = schema.aging.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["30", "360"]);
    }

    #[test]
    fn bare_prefix_is_not_a_family_member() {
        let schema = FundSchema::discover(&cols(&["status_", "status_x"]), &SPLIT);
        assert_eq!(schema.status.len(), 1);
    }
}
