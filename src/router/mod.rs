mod error;
mod router_macro;

pub use self::error::RouterError;

use crate::pattern::RoutePattern;
use crate::segment::SegmentCache;
use crate::table::MethodTable;
use crate::vars::PathVars;

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use log::debug;

/// The routing facade: one route table per HTTP method, generic over an
/// opaque handler type.
///
/// Registration (`insert` / `try_insert`) is a single-threaded startup
/// phase. Once built, `find` may be called concurrently from any number
/// of threads; only the per-table lookup cache mutates after startup.
#[derive(Debug, Default)]
pub struct Router<T> {
    tables: HashMap<Method, MethodTable<T>>,
    segments: SegmentCache,
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            segments: SegmentCache::new(),
        }
    }

    /// Registers a route, panicking on a malformed pattern.
    pub fn insert(&mut self, method: Method, pattern: &str, handler: T) -> &mut Self {
        if let Err(e) = self.try_insert(method, pattern, handler) {
            panic!("{}", e);
        }
        self
    }

    /// Registers a route for `method`. Fails on a pattern without a
    /// leading slash, with too many segments, or with a bad capture.
    pub fn try_insert(
        &mut self,
        method: Method,
        pattern: &str,
        handler: T,
    ) -> Result<&mut Self, RouterError> {
        let route = RoutePattern::parse(pattern, &mut self.segments)?;
        debug!("registered route: {} {}", method, route.source());
        self.access_table(method).insert(route, handler);
        Ok(self)
    }

    /// Resolves `path` for `method`. `None` means no route matched; a
    /// method with no routes at all is an ordinary miss, not an error.
    pub fn find(&self, method: &Method, path: &str) -> Option<(&T, Arc<PathVars>)> {
        self.tables.get(method)?.find(path)
    }

    fn access_table(&mut self, method: Method) -> &mut MethodTable<T> {
        self.tables.entry(method).or_insert_with(MethodTable::new)
    }
}
