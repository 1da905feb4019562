use crate::cache::{CacheEntry, LookupCache};
use crate::pattern::RoutePattern;
use crate::vars::PathVars;

use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;

const CACHE_CAPACITY: usize = 256;

/// All routes registered for one HTTP method.
///
/// Static patterns resolve through a whole-path map. Dynamic patterns are
/// grouped by segment count and then by their literal first segment, so a
/// lookup scans only the routes that could possibly match. Scan outcomes
/// (including NOT_FOUND) land in a bounded cache keyed by path.
#[derive(Debug)]
pub(crate) struct MethodTable<T> {
    routes: Vec<RegisteredRoute<T>>,
    static_map: HashMap<Box<str>, usize>,
    groups: Vec<SegmentGroup>,
    cache: LookupCache,
    empty_vars: Arc<PathVars>,
}

#[derive(Debug)]
struct RegisteredRoute<T> {
    pattern: RoutePattern,
    handler: T,
}

/// Dynamic routes sharing one segment count.
#[derive(Debug, Default)]
struct SegmentGroup {
    /// Routes whose first segment is a literal, keyed by that literal.
    by_first: HashMap<Box<str>, Vec<usize>>,
    /// Routes whose first segment is itself dynamic; scanned after the
    /// grouped bucket.
    ungrouped: Vec<usize>,
}

impl<T> MethodTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            routes: Vec::new(),
            static_map: HashMap::new(),
            groups: Vec::new(),
            cache: LookupCache::with_capacity(CACHE_CAPACITY),
            empty_vars: Arc::new(PathVars::default()),
        }
    }

    pub(crate) fn insert(&mut self, pattern: RoutePattern, handler: T) {
        let id = self.routes.len();

        if pattern.is_static() {
            self.static_map.insert(pattern.source().into(), id);
        } else {
            let count = pattern.segment_count();
            if self.groups.len() <= count {
                self.groups.resize_with(count + 1, SegmentGroup::default);
            }
            let group = &mut self.groups[count];
            match pattern.first_literal() {
                Some(first) => group.by_first.entry(first.into()).or_default().push(id),
                None => group.ungrouped.push(id),
            }
        }

        self.routes.push(RegisteredRoute { pattern, handler });
    }

    /// Static map, then cache, then the grouped dynamic scan; the scan
    /// outcome is cached either way.
    pub(crate) fn find(&self, path: &str) -> Option<(&T, Arc<PathVars>)> {
        if let Some(&id) = self.static_map.get(path) {
            return Some((&self.routes[id].handler, Arc::clone(&self.empty_vars)));
        }

        match self.cache.get(path) {
            Some(CacheEntry::Found { route, vars }) => {
                return Some((&self.routes[route].handler, vars));
            }
            Some(CacheEntry::NotFound) => return None,
            None => {}
        }

        let segments: SmallVec<[&str; 8]> = trim_first_slash(path).split('/').collect();

        match self.scan(&segments) {
            Some((route, vars)) => {
                self.cache.insert(
                    path,
                    CacheEntry::Found {
                        route,
                        vars: Arc::clone(&vars),
                    },
                );
                Some((&self.routes[route].handler, vars))
            }
            None => {
                self.cache.insert(path, CacheEntry::NotFound);
                None
            }
        }
    }

    fn scan(&self, segments: &[&str]) -> Option<(usize, Arc<PathVars>)> {
        let group = self.groups.get(segments.len())?;
        let mut vars = PathVars::new();

        if let Some(ids) = group.by_first.get(segments[0]) {
            if let Some(route) = self.scan_routes(ids, segments, &mut vars) {
                return Some((route, Arc::new(vars)));
            }
        }

        let route = self.scan_routes(&group.ungrouped, segments, &mut vars)?;
        Some((route, Arc::new(vars)))
    }

    /// First matching pattern wins; ids are in registration order.
    fn scan_routes(&self, ids: &[usize], segments: &[&str], vars: &mut PathVars) -> Option<usize> {
        ids.iter()
            .copied()
            .find(|&id| self.routes[id].pattern.matches(segments, vars))
    }
}

#[inline]
fn trim_first_slash(s: &str) -> &str {
    if s.starts_with('/') {
        &s[1..]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentCache;

    fn table(patterns: &[&str]) -> MethodTable<usize> {
        let mut segments = SegmentCache::new();
        let mut table = MethodTable::new();
        for (i, pattern) in patterns.iter().enumerate() {
            let parsed = RoutePattern::parse(pattern, &mut segments).unwrap();
            table.insert(parsed, i);
        }
        table
    }

    #[test]
    fn static_wins_over_dynamic() {
        let table = table(&["/users/{id}", "/users/me"]);

        let (handler, vars) = table.find("/users/me").unwrap();
        assert_eq!(*handler, 1);
        assert!(vars.is_empty());

        let (handler, vars) = table.find("/users/42").unwrap();
        assert_eq!(*handler, 0);
        assert_eq!(vars.get("id"), Some("42"));
    }

    #[test]
    fn grouped_bucket_scans_before_ungrouped() {
        let table = table(&["/{x}/b", "/a/{y}"]);

        let (handler, vars) = table.find("/a/b").unwrap();
        assert_eq!(*handler, 1);
        assert_eq!(vars.get("y"), Some("b"));

        // no grouped bucket for "c", so the ungrouped list resolves it
        let (handler, vars) = table.find("/c/b").unwrap();
        assert_eq!(*handler, 0);
        assert_eq!(vars.get("x"), Some("c"));
    }

    #[test]
    fn miss_is_cached_and_stays_a_miss() {
        let table = table(&["/a/{x}"]);
        assert!(table.find("/b/c").is_none());
        assert!(table.find("/b/c").is_none());
    }

    #[test]
    fn segment_count_prunes_groups() {
        let table = table(&["/a/{x}"]);
        assert!(table.find("/a").is_none());
        assert!(table.find("/a/b/c").is_none());
    }

    #[test]
    fn repeated_dynamic_hits_share_cached_vars() {
        let table = table(&["/users/{id}"]);
        let (_, first) = table.find("/users/7").unwrap();
        let (_, second) = table.find("/users/7").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
