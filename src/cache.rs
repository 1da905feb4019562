use crate::vars::PathVars;

use std::sync::Arc;

use dashmap::DashMap;
use log::trace;

/// Outcome of one dynamic scan, cached by request path. NOT_FOUND is a
/// cacheable outcome too, so repeated misses skip the scan.
#[derive(Debug, Clone)]
pub(crate) enum CacheEntry {
    Found { route: usize, vars: Arc<PathVars> },
    NotFound,
}

/// Bounded concurrent path cache. When full it is flushed wholesale; a
/// dropped entry is recomputed by the next lookup, never reported.
#[derive(Debug)]
pub(crate) struct LookupCache {
    map: DashMap<Box<str>, CacheEntry>,
    capacity: usize,
}

impl LookupCache {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: DashMap::new(),
            capacity,
        }
    }

    pub(crate) fn get(&self, path: &str) -> Option<CacheEntry> {
        self.map.get(path).map(|entry| entry.clone())
    }

    pub(crate) fn insert(&self, path: &str, entry: CacheEntry) {
        if self.map.len() >= self.capacity {
            trace!("lookup cache full ({} entries), flushing", self.map.len());
            self.map.clear();
        }
        self.map.insert(path.into(), entry);
    }
}
