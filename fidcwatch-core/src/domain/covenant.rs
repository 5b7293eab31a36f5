//! Covenant record — one contractual metric observation for a deal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FundId;

/// Compliance status label attached to a covenant observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CovenantStatus {
    Ok,
    Flag,
    NotApplicable,
    /// A label outside the known set, preserved verbatim.
    Other(String),
}

impl CovenantStatus {
    /// Parse a source label. Absent or blank cells are `NotApplicable`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::NotApplicable;
        };
        match raw.to_ascii_uppercase().as_str() {
            "OK" => Self::Ok,
            "FLAG" => Self::Flag,
            "N/A" | "NA" => Self::NotApplicable,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Flag => "FLAG",
            Self::NotApplicable => "N/A",
            Self::Other(s) => s,
        }
    }

    /// FLAG outranks unknown labels, which outrank OK/N/A, when picking the
    /// worst status for a summary row.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Flag => 2,
            Self::Other(_) => 1,
            Self::Ok | Self::NotApplicable => 0,
        }
    }
}

/// One covenant observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CovenantRecord {
    pub deal: FundId,
    pub date: Option<NaiveDate>,
    pub metric: String,
    pub value: Option<f64>,
    pub threshold: Option<f64>,
    pub status: CovenantStatus,
}
