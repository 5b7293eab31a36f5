//! Resolve the source layout for the dashboard process.

use std::path::PathBuf;

use fidcwatch_core::data::SourceLayout;

/// Default split-layout data directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// `fidcwatch-tui [PATH]` — a file argument is a consolidated export, a
/// directory (or anything not yet on disk) is a split-layout data dir.
pub fn resolve_layout(arg: Option<&str>) -> SourceLayout {
    let path = PathBuf::from(arg.unwrap_or(DEFAULT_DATA_DIR));
    if path.is_file() {
        SourceLayout::consolidated(path)
    } else {
        SourceLayout::split(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_argument_selects_consolidated_layout() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let layout = resolve_layout(f.path().to_str());
        assert!(matches!(layout, SourceLayout::Consolidated { .. }));
    }

    #[test]
    fn directory_argument_selects_split_layout() {
        let dir = tempfile::tempdir().unwrap();
        let layout = resolve_layout(dir.path().to_str());
        assert!(matches!(layout, SourceLayout::Split { .. }));
    }

    #[test]
    fn missing_argument_defaults_to_data_dir() {
        let layout = resolve_layout(None);
        assert_eq!(layout, SourceLayout::split(DEFAULT_DATA_DIR));
    }
}
