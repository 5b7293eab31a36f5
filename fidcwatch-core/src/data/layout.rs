//! Source layouts — the two observed export shapes behind one loader.
//!
//! The consolidated layout is a single comma-delimited UTF-8 export of the
//! monitoring workbook, Portuguese column labels, fund data only. The split
//! layout is a directory of three semicolon-delimited WINDOWS_1252 files
//! with English labels. Each layout carries a schema dialect; the ingest
//! machinery itself is shared.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fund-level file name in the split layout.
pub const FUND_FILE: &str = "fund_data.csv";
/// Covenant file name in the split layout.
pub const COVENANT_FILE: &str = "covenants.csv";
/// Macro file name in the split layout.
pub const MACRO_FILE: &str = "macro_data.csv";

/// Covenant file columns (split layout only).
pub mod covenant_cols {
    pub const DEAL: &str = "deal";
    pub const DATE: &str = "date";
    pub const METRIC: &str = "metric";
    pub const VALUE: &str = "value";
    pub const THRESHOLD: &str = "threshold";
    pub const STATUS: &str = "status";
}

/// Macro file date column (split layout only). Every other column in that
/// file is an indicator series.
pub const MACRO_DATE_COL: &str = "date";

/// Where the source files live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLayout {
    /// A single consolidated fund-data export file.
    Consolidated { file: PathBuf },
    /// A directory holding `fund_data.csv`, `covenants.csv`, `macro_data.csv`.
    Split { dir: PathBuf },
}

impl SourceLayout {
    pub fn consolidated(file: impl Into<PathBuf>) -> Self {
        Self::Consolidated { file: file.into() }
    }

    pub fn split(dir: impl Into<PathBuf>) -> Self {
        Self::Split { dir: dir.into() }
    }

    /// The fund-level file. Required in both layouts.
    pub fn fund_path(&self) -> PathBuf {
        match self {
            Self::Consolidated { file } => file.clone(),
            Self::Split { dir } => dir.join(FUND_FILE),
        }
    }

    /// The covenant file, if this layout carries one.
    pub fn covenant_path(&self) -> Option<PathBuf> {
        match self {
            Self::Consolidated { .. } => None,
            Self::Split { dir } => Some(dir.join(COVENANT_FILE)),
        }
    }

    /// The macro file, if this layout carries one.
    pub fn macro_path(&self) -> Option<PathBuf> {
        match self {
            Self::Consolidated { .. } => None,
            Self::Split { dir } => Some(dir.join(MACRO_FILE)),
        }
    }

    pub fn dialect(&self) -> &'static SchemaDialect {
        match self {
            Self::Consolidated { .. } => &CONSOLIDATED,
            Self::Split { .. } => &SPLIT,
        }
    }

    /// The resolved identity of this layout — the session-cache key. The
    /// layout *root* is canonicalized (not the individual files), so the key
    /// stays stable even if a source file vanishes after the first load.
    pub fn cache_key(&self) -> SourceLayout {
        match self {
            Self::Consolidated { file } => Self::Consolidated {
                file: file.canonicalize().unwrap_or_else(|_| file.clone()),
            },
            Self::Split { dir } => Self::Split {
                dir: dir.canonicalize().unwrap_or_else(|_| dir.clone()),
            },
        }
    }

    /// Short human label for status lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Consolidated { file } => format!("consolidated export {}", file.display()),
            Self::Split { dir } => format!("data directory {}", dir.display()),
        }
    }
}

/// Text encoding of a layout's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// Legacy single-byte encoding used by the split-layout exports.
    Windows1252,
}

/// Column naming and file shape for one layout.
///
/// Column names here are in normalized (lowercase) form; header matching is
/// case-insensitive.
#[derive(Debug)]
pub struct SchemaDialect {
    pub delimiter: u8,
    pub encoding: TextEncoding,
    pub fund_col: &'static str,
    pub date_col: &'static str,
    pub net_worth_col: &'static str,
    pub pv_col: &'static str,
    pub pdd_col: &'static str,
    pub sub_return_col: &'static str,
    pub origination_col: &'static str,
    pub net_allocation_col: &'static str,
    pub status_prefix: &'static str,
    pub subordination_prefix: &'static str,
    pub threshold_prefix: &'static str,
    pub delinq_prefix: &'static str,
    pub aging_prefix: &'static str,
    /// Aging columns whose suffix contains this marker are running totals,
    /// not buckets, and are excluded from the family.
    pub aging_total_marker: &'static str,
}

/// Portuguese-labeled consolidated workbook export.
pub static CONSOLIDATED: SchemaDialect = SchemaDialect {
    delimiter: b',',
    encoding: TextEncoding::Utf8,
    fund_col: "fundo",
    date_col: "data_referencia",
    net_worth_col: "net_worth",
    pv_col: "pv_credit_rights",
    pdd_col: "pdd",
    sub_return_col: "retorno_subordinada_1",
    origination_col: "vl_dicred_aquis_mes",
    net_allocation_col: "net_allocation",
    status_prefix: "status_",
    subordination_prefix: "subordination_",
    threshold_prefix: "threshold_",
    delinq_prefix: "delinq_ratio_",
    aging_prefix: "vl_prazo_venc_",
    aging_total_marker: "som",
};

/// English-labeled three-file export.
pub static SPLIT: SchemaDialect = SchemaDialect {
    delimiter: b';',
    encoding: TextEncoding::Windows1252,
    fund_col: "fund",
    date_col: "reference_date",
    net_worth_col: "net_worth",
    pv_col: "pv_credit_rights",
    pdd_col: "pdd",
    sub_return_col: "sub_return_rate",
    origination_col: "origination_month",
    net_allocation_col: "net_allocation",
    status_prefix: "status_",
    subordination_prefix: "subordination_",
    threshold_prefix: "threshold_",
    delinq_prefix: "delinq_ratio_",
    aging_prefix: "cr_due_",
    aging_total_marker: "total",
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn split_layout_resolves_three_files() {
        let layout = SourceLayout::split("/tmp/fidc");
        assert!(layout.fund_path().ends_with(FUND_FILE));
        assert!(layout.covenant_path().unwrap().ends_with(COVENANT_FILE));
        assert!(layout.macro_path().unwrap().ends_with(MACRO_FILE));
    }

    #[test]
    fn consolidated_layout_has_fund_data_only() {
        let layout = SourceLayout::consolidated("/tmp/portfolio.csv");
        assert_eq!(layout.fund_path(), Path::new("/tmp/portfolio.csv"));
        assert_eq!(layout.covenant_path(), None);
        assert_eq!(layout.macro_path(), None);
    }

    #[test]
    fn cache_key_is_stable_when_a_source_file_vanishes() {
        let dir = tempfile::tempdir().unwrap();
        let layout = SourceLayout::split(dir.path());
        let before = layout.cache_key();

        // Files inside the directory do not shape the key.
        std::fs::write(dir.path().join(FUND_FILE), b"fund;reference_date\n").unwrap();
        let with_file = layout.cache_key();
        std::fs::remove_file(dir.path().join(FUND_FILE)).unwrap();
        let after = layout.cache_key();

        assert_eq!(before, with_file);
        assert_eq!(before, after);
    }

    #[test]
    fn layouts_with_the_same_path_key_differently() {
        let key_a = SourceLayout::split("/tmp/fidc").cache_key();
        let key_b = SourceLayout::consolidated("/tmp/fidc").cache_key();
        assert_ne!(key_a, key_b);
    }

    #[test]
    fn dialects_differ_where_the_exports_do() {
        let cons = SourceLayout::consolidated("x.csv");
        let split = SourceLayout::split("d");
        assert_eq!(cons.dialect().delimiter, b',');
        assert_eq!(split.dialect().delimiter, b';');
        assert_eq!(cons.dialect().fund_col, "fundo");
        assert_eq!(split.dialect().fund_col, "fund");
        assert_eq!(split.dialect().encoding, TextEncoding::Windows1252);
    }
}
