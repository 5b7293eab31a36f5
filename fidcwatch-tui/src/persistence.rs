//! UI state persistence — JSON save/load across restarts.
//!
//! Only UI-side state is persisted (active view, selections). The datasets
//! themselves are never written back anywhere.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{AppState, FundChart, View};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_view: View,
    pub fund_chart: FundChart,
    pub selected_fund: Option<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_view: View::Portfolio,
            fund_chart: FundChart::Balance,
            selected_fund: None,
        }
    }
}

/// Load persisted state from disk. Returns defaults if missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        active_view: app.active_view,
        fund_chart: app.fund_chart,
        selected_fund: app.selected_fund_id().map(|id| id.as_str().to_string()),
    }
}

/// Apply persisted state to AppState. Fund selection is restored by name so
/// a changed dataset cannot point the cursor out of range.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.active_view = state.active_view;
    app.fund_chart = state.fund_chart;
    if let Some(name) = state.selected_fund {
        if let Some(idx) = app.fund_ids.iter().position(|id| id.as_str() == name) {
            app.selected_fund = idx;
            app.portfolio_cursor = idx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidcwatch_core::data::SourceLayout;
    use fidcwatch_core::domain::FundId;

    #[test]
    fn missing_file_loads_defaults() {
        let state = load(Path::new("/nonexistent/state.json"));
        assert_eq!(state.active_view, View::Portfolio);
        assert!(state.selected_fund.is_none());
    }

    #[test]
    fn roundtrip_preserves_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fidcwatch").join("state.json");

        let mut app = AppState::new(SourceLayout::split("/nonexistent"));
        app.fund_ids = vec![FundId::from("Alpha"), FundId::from("Beta")];
        app.selected_fund = 1;
        app.active_view = View::Fund;
        app.fund_chart = FundChart::Delinquency;

        save(&path, &extract(&app)).unwrap();

        let mut restored = AppState::new(SourceLayout::split("/nonexistent"));
        restored.fund_ids = vec![FundId::from("Alpha"), FundId::from("Beta")];
        apply(&mut restored, load(&path));

        assert_eq!(restored.active_view, View::Fund);
        assert_eq!(restored.fund_chart, FundChart::Delinquency);
        assert_eq!(restored.selected_fund, 1);
    }

    #[test]
    fn unknown_fund_name_keeps_cursor_at_zero() {
        let mut app = AppState::new(SourceLayout::split("/nonexistent"));
        app.fund_ids = vec![FundId::from("Alpha")];
        apply(
            &mut app,
            PersistedState {
                active_view: View::Fund,
                fund_chart: FundChart::Balance,
                selected_fund: Some("Gone".to_string()),
            },
        );
        assert_eq!(app.selected_fund, 0);
    }
}
