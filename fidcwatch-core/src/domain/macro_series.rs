//! Macro record — one date of macroeconomic indicator readings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of macro indicator values. No fund association.
///
/// Indicator names come from the source header; a `None` value marks a
/// reading that failed numeric coercion (the row is kept regardless).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRecord {
    pub date: Option<NaiveDate>,
    pub indicators: BTreeMap<String, Option<f64>>,
}

impl MacroRecord {
    pub fn value(&self, indicator: &str) -> Option<f64> {
        self.indicators.get(indicator).copied().flatten()
    }
}
