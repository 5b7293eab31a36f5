//! FidcWatch Core — data layer for FIDC portfolio monitoring.
//!
//! This crate owns everything below the presentation layer:
//! - Domain rows (fund, covenant, macro)
//! - Source layouts and their schema dialects (consolidated vs split exports)
//! - CSV ingest with legacy-encoding, BOM-artifact, and cell-coercion handling
//! - Derived per-fund cumulative subordinated returns
//! - The session cache keyed by resolved source paths
//!
//! The presentation layer holds the loaded snapshot behind an `Arc` and only
//! ever reads from it.

pub mod data;
pub mod domain;
pub mod portfolio;
pub mod sample;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything shared across the UI boundary is
    /// Send + Sync, so the snapshot can move behind an `Arc` freely.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::FundId>();
        require_sync::<domain::FundId>();
        require_send::<domain::FundRecord>();
        require_sync::<domain::FundRecord>();
        require_send::<domain::CovenantRecord>();
        require_sync::<domain::CovenantRecord>();
        require_send::<domain::MacroRecord>();
        require_sync::<domain::MacroRecord>();

        require_send::<data::SourceLayout>();
        require_sync::<data::SourceLayout>();
        require_send::<data::FundSchema>();
        require_sync::<data::FundSchema>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::SessionCache>();
        require_sync::<data::SessionCache>();

        require_send::<portfolio::PortfolioData>();
        require_sync::<portfolio::PortfolioData>();
    }
}
