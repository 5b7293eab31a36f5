//! Application state — single-owner, main-thread only.
//!
//! Loads are synchronous and go through the session cache, so the reload
//! path is cheap after the first load of a given source set.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use fidcwatch_core::data::{SessionCache, SourceLayout};
use fidcwatch_core::domain::FundId;
use fidcwatch_core::portfolio::PortfolioData;

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Portfolio,
    Fund,
    Macro,
    Help,
}

impl View {
    pub fn index(self) -> usize {
        match self {
            View::Portfolio => 0,
            View::Fund => 1,
            View::Macro => 2,
            View::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(View::Portfolio),
            1 => Some(View::Fund),
            2 => Some(View::Macro),
            3 => Some(View::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Portfolio => "Portfolio",
            View::Fund => "Fund",
            View::Macro => "Macro",
            View::Help => "Help",
        }
    }

    pub fn next(self) -> View {
        View::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> View {
        View::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Which chart the fund drill-down shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundChart {
    Balance,
    Subordination,
    JuniorReturn,
    Delinquency,
    Origination,
    Aging,
}

impl FundChart {
    pub const ALL: [FundChart; 6] = [
        FundChart::Balance,
        FundChart::Subordination,
        FundChart::JuniorReturn,
        FundChart::Delinquency,
        FundChart::Origination,
        FundChart::Aging,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            FundChart::Balance => "Net Worth / PV / PDD",
            FundChart::Subordination => "Subordination vs Threshold",
            FundChart::JuniorReturn => "Junior Quota Cumulative Return",
            FundChart::Delinquency => "Delinquency by Range",
            FundChart::Origination => "Origination vs Net Allocation",
            FundChart::Aging => "Receivables Aging",
        }
    }

    pub fn next(self) -> FundChart {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FundChart {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An entry in the error-history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
}

/// What floats above the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
}

/// All TUI state.
pub struct AppState {
    pub running: bool,
    pub active_view: View,
    pub overlay: Overlay,
    pub layout: SourceLayout,
    pub cache: SessionCache,
    pub data: Option<Arc<PortfolioData>>,
    pub fund_ids: Vec<FundId>,
    pub selected_fund: usize,
    pub fund_chart: FundChart,
    pub selected_indicator: usize,
    pub portfolio_cursor: usize,
    pub status_message: Option<(String, StatusLevel)>,
    pub errors: Vec<ErrorRecord>,
}

impl AppState {
    pub fn new(layout: SourceLayout) -> Self {
        Self {
            running: true,
            active_view: View::Portfolio,
            overlay: Overlay::None,
            layout,
            cache: SessionCache::new(),
            data: None,
            fund_ids: Vec::new(),
            selected_fund: 0,
            fund_chart: FundChart::Balance,
            selected_indicator: 0,
            portfolio_cursor: 0,
            status_message: None,
            errors: Vec::new(),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        let message = message.into();
        if level != StatusLevel::Info {
            self.errors.push(ErrorRecord {
                timestamp: chrono::Local::now().naive_local(),
                message: message.clone(),
            });
        }
        self.status_message = Some((message, level));
    }

    /// Load (or re-load) through the session cache. `force` clears the
    /// cache first so the files are actually re-read.
    pub fn reload(&mut self, force: bool) {
        if force {
            self.cache.clear();
        }

        match self.cache.load(&self.layout) {
            Ok(data) => {
                self.fund_ids = data.fund_ids();
                if self.selected_fund >= self.fund_ids.len() {
                    self.selected_fund = 0;
                }
                if self.portfolio_cursor >= self.fund_ids.len() {
                    self.portfolio_cursor = 0;
                }
                if self.selected_indicator >= data.macro_indicators.len() {
                    self.selected_indicator = 0;
                }

                let issues = data.issues.len();
                let summary = format!(
                    "Loaded {} funds, {} rows from {}",
                    self.fund_ids.len(),
                    data.funds.len(),
                    self.layout.describe()
                );
                if issues > 0 {
                    for issue in &data.issues {
                        self.errors.push(ErrorRecord {
                            timestamp: chrono::Local::now().naive_local(),
                            message: issue.to_string(),
                        });
                    }
                    self.status_message = Some((
                        format!("{summary} — {issues} issue(s), press e for details"),
                        StatusLevel::Warning,
                    ));
                } else {
                    self.status_message = Some((summary, StatusLevel::Info));
                }
                self.data = Some(data);
            }
            Err(e) => {
                self.data = None;
                self.fund_ids.clear();
                self.set_status(format!("Dashboard unavailable: {e}"), StatusLevel::Error);
            }
        }
    }

    pub fn selected_fund_id(&self) -> Option<&FundId> {
        self.fund_ids.get(self.selected_fund)
    }

    pub fn select_next_fund(&mut self) {
        if !self.fund_ids.is_empty() {
            self.selected_fund = (self.selected_fund + 1) % self.fund_ids.len();
        }
    }

    pub fn select_prev_fund(&mut self) {
        if !self.fund_ids.is_empty() {
            self.selected_fund =
                (self.selected_fund + self.fund_ids.len() - 1) % self.fund_ids.len();
        }
    }

    pub fn macro_indicators(&self) -> &[String] {
        self.data
            .as_ref()
            .map(|d| d.macro_indicators.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_indicator_name(&self) -> Option<&str> {
        self.macro_indicators()
            .get(self.selected_indicator)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_cycle_in_order() {
        assert_eq!(View::Portfolio.next(), View::Fund);
        assert_eq!(View::Help.next(), View::Portfolio);
        assert_eq!(View::Portfolio.prev(), View::Help);
    }

    #[test]
    fn charts_cycle_through_all_six() {
        let mut chart = FundChart::Balance;
        for _ in 0..FundChart::ALL.len() {
            chart = chart.next();
        }
        assert_eq!(chart, FundChart::Balance);
        assert_eq!(FundChart::Balance.prev(), FundChart::Aging);
    }

    #[test]
    fn failed_load_leaves_no_data_and_reports() {
        let mut app = AppState::new(SourceLayout::split("/nonexistent/fidc"));
        app.reload(false);
        assert!(app.data.is_none());
        assert!(app.fund_ids.is_empty());
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Error))
        ));
        assert_eq!(app.errors.len(), 1);
    }

    #[test]
    fn fund_selection_wraps() {
        let mut app = AppState::new(SourceLayout::split("/nonexistent/fidc"));
        app.fund_ids = vec![FundId::from("A"), FundId::from("B")];
        app.select_prev_fund();
        assert_eq!(app.selected_fund, 1);
        app.select_next_fund();
        assert_eq!(app.selected_fund, 0);
    }
}
