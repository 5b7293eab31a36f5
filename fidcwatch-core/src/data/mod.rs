//! Data layer — layouts, decoding, ingest, derived metrics, session cache.

pub mod cache;
pub mod decode;
pub mod ingest;
pub mod layout;
pub mod returns;
pub mod schema;

pub use cache::SessionCache;
pub use layout::{SchemaDialect, SourceLayout, TextEncoding};
pub use schema::{FamilyColumn, FundSchema};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::portfolio::PortfolioData;

/// Errors that make a dataset unavailable.
///
/// Only the fund dataset propagates these out of `load_portfolio`; covenant
/// and macro failures degrade to a recorded [`LoadIssue`] instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("source file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("malformed data in {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("{}: missing required column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// Which logical dataset an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dataset {
    Funds,
    Covenants,
    Macro,
}

impl Dataset {
    pub fn label(self) -> &'static str {
        match self {
            Dataset::Funds => "funds",
            Dataset::Covenants => "covenants",
            Dataset::Macro => "macro",
        }
    }
}

/// A non-fatal problem recorded during a load and surfaced to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadIssue {
    pub dataset: Dataset,
    pub detail: String,
}

impl LoadIssue {
    pub fn new(dataset: Dataset, detail: impl Into<String>) -> Self {
        Self {
            dataset,
            detail: detail.into(),
        }
    }

    pub fn row(dataset: Dataset, line: usize, message: impl std::fmt::Display) -> Self {
        Self::new(dataset, format!("row {line}: {message}"))
    }
}

impl std::fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.dataset.label(), self.detail)
    }
}

/// Load every dataset the layout provides.
///
/// The fund table is required — its absence or a total parse failure is an
/// error. Covenant and macro tables degrade: a missing or malformed file
/// yields `None` for that dataset plus a recorded issue, never a failure.
/// The load is pure with respect to the source contents; callers cache the
/// result through [`SessionCache`].
pub fn load_portfolio(layout: &SourceLayout) -> Result<PortfolioData, DataError> {
    let dialect = layout.dialect();

    let fund_path = layout.fund_path();
    let mut funds = ingest::ingest_funds(&fund_path, dialect)?;
    returns::sort_records(&mut funds.records);
    returns::derive_cumulative_returns(&mut funds.records);

    let mut issues = funds.issues;

    let covenants = match layout.covenant_path() {
        None => None,
        Some(path) => match ingest::ingest_covenants(&path, dialect) {
            Ok(ingested) => {
                issues.extend(ingested.issues);
                Some(ingested.records)
            }
            Err(e) => {
                issues.push(LoadIssue::new(Dataset::Covenants, e.to_string()));
                None
            }
        },
    };

    let (macro_series, macro_indicators) = match layout.macro_path() {
        None => (None, Vec::new()),
        Some(path) => match ingest::ingest_macro(&path, dialect) {
            Ok(ingested) => {
                issues.extend(ingested.issues);
                (Some(ingested.records), ingested.indicators)
            }
            Err(e) => {
                issues.push(LoadIssue::new(Dataset::Macro, e.to_string()));
                (None, Vec::new())
            }
        },
    };

    let dataset_hash = fingerprint(&funds.records);

    Ok(PortfolioData {
        funds: funds.records,
        covenants,
        macro_series,
        macro_indicators,
        schema: funds.schema,
        issues,
        dataset_hash,
    })
}

/// Deterministic BLAKE3 fingerprint of the loaded fund table.
///
/// Rows are already in sorted order, so equal source contents hash equally
/// regardless of file row order.
fn fingerprint(records: &[crate::domain::FundRecord]) -> String {
    let bytes = serde_json::to_vec(records).unwrap_or_default();
    blake3::hash(&bytes).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_issue_display_names_the_dataset() {
        let issue = LoadIssue::row(Dataset::Covenants, 7, "bad record");
        assert_eq!(issue.to_string(), "[covenants] row 7: bad record");
    }

    #[test]
    fn missing_fund_file_fails_the_load() {
        let layout = SourceLayout::consolidated("/nonexistent/portfolio.csv");
        let err = load_portfolio(&layout).unwrap_err();
        assert!(matches!(err, DataError::FileNotFound { .. }));
    }
}
