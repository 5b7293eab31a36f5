//! CSV ingest — header mapping, cell coercion, row building.
//!
//! Coercion policy: a cell that fails to parse becomes the `None` sentinel
//! and the row is kept; only a missing required column or an unreadable
//! header row fails the dataset. Row-level CSV errors are recorded as load
//! issues and the offending row is skipped.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{CovenantRecord, CovenantStatus, FundId, FundRecord, MacroRecord};

use super::decode::{read_to_string, strip_bom_artifact};
use super::layout::{covenant_cols, SchemaDialect, MACRO_DATE_COL};
use super::schema::FundSchema;
use super::{DataError, Dataset, LoadIssue};

/// Date shapes accepted across both export generations.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d %H:%M:%S"];

/// Normalized header name → column index, names kept in file order.
pub struct HeaderMap {
    by_name: HashMap<String, usize>,
    names: Vec<String>,
}

impl HeaderMap {
    fn new(headers: &StringRecord) -> Self {
        let mut by_name = HashMap::new();
        let mut names = Vec::with_capacity(headers.len());
        for (idx, raw) in headers.iter().enumerate() {
            let name = normalize_header(raw);
            by_name.entry(name.clone()).or_insert(idx);
            names.push(name);
        }
        Self { by_name, names }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn require(&self, name: &str, path: &Path) -> Result<usize, DataError> {
        self.index_of(name).ok_or_else(|| DataError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
    }
}

/// Header normalization: BOM-artifact strip, trim, lowercase.
fn normalize_header(raw: &str) -> String {
    strip_bom_artifact(raw.trim()).trim().to_ascii_lowercase()
}

/// A trimmed, non-empty cell.
fn cell<'a>(record: &'a StringRecord, idx: Option<usize>) -> Option<&'a str> {
    let idx = idx?;
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Coerce a date cell. Unparseable dates become the `None` sentinel.
pub fn parse_date_cell(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Coerce a numeric cell, normalizing a decimal comma to a period first
/// (`"1,5"` → 1.5, `"1.234,56"` → 1234.56). Failures and non-finite values
/// become the `None` sentinel.
pub fn parse_numeric_cell(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn reader_for<'a>(text: &'a str, dialect: &SchemaDialect) -> csv::Reader<&'a [u8]> {
    csv::ReaderBuilder::new()
        .delimiter(dialect.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn read_headers(
    reader: &mut csv::Reader<&[u8]>,
    path: &Path,
) -> Result<HeaderMap, DataError> {
    let headers = reader
        .headers()
        .map_err(|e| DataError::Format {
            path: path.to_path_buf(),
            message: format!("unreadable header row: {e}"),
        })?
        .clone();
    Ok(HeaderMap::new(&headers))
}

// ── Fund dataset ────────────────────────────────────────────────────

/// Result of ingesting the fund-level file. Rows are in file order; sorting
/// and derivation happen in `returns`.
#[derive(Debug)]
pub struct FundIngest {
    pub records: Vec<FundRecord>,
    pub schema: FundSchema,
    pub rows_read: usize,
    pub issues: Vec<LoadIssue>,
}

pub fn ingest_funds(path: &Path, dialect: &SchemaDialect) -> Result<FundIngest, DataError> {
    let text = read_to_string(path, dialect.encoding)?;
    let mut reader = reader_for(&text, dialect);
    let headers = read_headers(&mut reader, path)?;

    let fund_idx = headers.require(dialect.fund_col, path)?;
    let date_idx = headers.require(dialect.date_col, path)?;

    // One discovery pass per load; render paths only query the result.
    let schema = FundSchema::discover(headers.names(), dialect);

    let net_worth_idx = headers.index_of(dialect.net_worth_col);
    let pv_idx = headers.index_of(dialect.pv_col);
    let pdd_idx = headers.index_of(dialect.pdd_col);
    let sub_return_idx = headers.index_of(dialect.sub_return_col);
    let origination_idx = headers.index_of(dialect.origination_col);
    let net_allocation_idx = headers.index_of(dialect.net_allocation_col);

    let mut records = Vec::new();
    let mut issues = Vec::new();
    let mut rows_read = 0usize;

    for (i, result) in reader.records().enumerate() {
        // Header is line 1, so data rows are 1-based from line 2.
        let line = i + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                issues.push(LoadIssue::row(Dataset::Funds, line, e.to_string()));
                continue;
            }
        };

        let Some(fund) = cell(&record, Some(fund_idx)) else {
            issues.push(LoadIssue::row(
                Dataset::Funds,
                line,
                format!("empty `{}` cell", dialect.fund_col),
            ));
            continue;
        };

        let mut row = FundRecord::new(FundId::from(fund));
        row.reference_date = parse_date_cell(cell(&record, Some(date_idx)));
        row.net_worth = parse_numeric_cell(cell(&record, net_worth_idx));
        row.pv_credit_rights = parse_numeric_cell(cell(&record, pv_idx));
        row.pdd = parse_numeric_cell(cell(&record, pdd_idx));
        row.sub_return_rate = parse_numeric_cell(cell(&record, sub_return_idx));
        row.origination = parse_numeric_cell(cell(&record, origination_idx));
        row.net_allocation = parse_numeric_cell(cell(&record, net_allocation_idx));

        for col in &schema.status {
            if let Some(v) = cell(&record, headers.index_of(&col.column)) {
                row.status.insert(col.label.clone(), v.to_string());
            }
        }
        for col in &schema.subordination {
            if let Some(v) = parse_numeric_cell(cell(&record, headers.index_of(&col.column))) {
                row.subordination.insert(col.label.clone(), v);
            }
        }
        for col in &schema.thresholds {
            if let Some(v) = parse_numeric_cell(cell(&record, headers.index_of(&col.column))) {
                row.thresholds.insert(col.label.clone(), v);
            }
        }
        for col in &schema.delinquency {
            if let Some(v) = parse_numeric_cell(cell(&record, headers.index_of(&col.column))) {
                row.delinquency.insert(col.label.clone(), v);
            }
        }
        for col in &schema.aging {
            if let Some(v) = parse_numeric_cell(cell(&record, headers.index_of(&col.column))) {
                row.aging.insert(col.label.clone(), v);
            }
        }

        records.push(row);
    }

    Ok(FundIngest {
        records,
        schema,
        rows_read,
        issues,
    })
}

// ── Covenant dataset ────────────────────────────────────────────────

pub struct CovenantIngest {
    pub records: Vec<CovenantRecord>,
    pub rows_read: usize,
    pub issues: Vec<LoadIssue>,
}

pub fn ingest_covenants(
    path: &Path,
    dialect: &SchemaDialect,
) -> Result<CovenantIngest, DataError> {
    let text = read_to_string(path, dialect.encoding)?;
    let mut reader = reader_for(&text, dialect);
    let headers = read_headers(&mut reader, path)?;

    let deal_idx = headers.require(covenant_cols::DEAL, path)?;
    let metric_idx = headers.require(covenant_cols::METRIC, path)?;
    let date_idx = headers.index_of(covenant_cols::DATE);
    let value_idx = headers.index_of(covenant_cols::VALUE);
    let threshold_idx = headers.index_of(covenant_cols::THRESHOLD);
    let status_idx = headers.index_of(covenant_cols::STATUS);

    let mut records = Vec::new();
    let mut issues = Vec::new();
    let mut rows_read = 0usize;

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                issues.push(LoadIssue::row(Dataset::Covenants, line, e.to_string()));
                continue;
            }
        };

        let (Some(deal), Some(metric)) = (
            cell(&record, Some(deal_idx)),
            cell(&record, Some(metric_idx)),
        ) else {
            issues.push(LoadIssue::row(
                Dataset::Covenants,
                line,
                "empty deal or metric cell".to_string(),
            ));
            continue;
        };

        records.push(CovenantRecord {
            deal: FundId::from(deal),
            date: parse_date_cell(cell(&record, date_idx)),
            metric: metric.to_string(),
            value: parse_numeric_cell(cell(&record, value_idx)),
            threshold: parse_numeric_cell(cell(&record, threshold_idx)),
            status: CovenantStatus::parse(cell(&record, status_idx)),
        });
    }

    Ok(CovenantIngest {
        records,
        rows_read,
        issues,
    })
}

// ── Macro dataset ───────────────────────────────────────────────────

pub struct MacroIngest {
    pub records: Vec<MacroRecord>,
    /// Indicator columns in header order.
    pub indicators: Vec<String>,
    pub rows_read: usize,
    pub issues: Vec<LoadIssue>,
}

pub fn ingest_macro(path: &Path, dialect: &SchemaDialect) -> Result<MacroIngest, DataError> {
    let text = read_to_string(path, dialect.encoding)?;
    let mut reader = reader_for(&text, dialect);
    let headers = read_headers(&mut reader, path)?;

    let date_idx = headers.require(MACRO_DATE_COL, path)?;
    let indicators: Vec<String> = headers
        .names()
        .iter()
        .filter(|n| n.as_str() != MACRO_DATE_COL && !n.is_empty())
        .cloned()
        .collect();

    let mut records = Vec::new();
    let mut issues = Vec::new();
    let mut rows_read = 0usize;

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                issues.push(LoadIssue::row(Dataset::Macro, line, e.to_string()));
                continue;
            }
        };

        let mut row = MacroRecord {
            date: parse_date_cell(cell(&record, Some(date_idx))),
            indicators: Default::default(),
        };
        for name in &indicators {
            let value = parse_numeric_cell(cell(&record, headers.index_of(name)));
            row.indicators.insert(name.clone(), value);
        }
        records.push(row);
    }

    Ok(MacroIngest {
        records,
        indicators,
        rows_read,
        issues,
    })
}
