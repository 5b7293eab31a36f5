//! Session cache — one load per source path set, explicit invalidation only.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::portfolio::PortfolioData;

use super::layout::SourceLayout;
use super::{load_portfolio, DataError};

/// Process-lifetime cache from resolved source paths to loaded snapshots.
///
/// The UI re-runs its load path on every interaction; a hit must return the
/// shared handle without touching the filesystem. Nothing invalidates an
/// entry except `clear` — changes to the files on disk are not observed,
/// matching the one-load-per-session contract. Failed loads are not cached:
/// a missing file is cheap to rediscover and the operator may drop the
/// export in place mid-session.
pub struct SessionCache {
    entries: Mutex<HashMap<SourceLayout, Arc<PortfolioData>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Load through the cache. A hit returns the cached handle; a miss runs
    /// the full load and stores the snapshot on success.
    pub fn load(&self, layout: &SourceLayout) -> Result<Arc<PortfolioData>, DataError> {
        let key = layout.cache_key();
        if let Some(hit) = self.entries.lock().expect("cache mutex poisoned").get(&key) {
            return Ok(Arc::clone(hit));
        }

        let data = Arc::new(load_portfolio(layout)?);
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(key, Arc::clone(&data));
        Ok(data)
    }

    /// Drop every cached snapshot. The only invalidation path.
    pub fn clear(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
