use std::collections::HashMap;
use std::str::FromStr;

use smallvec::SmallVec;

/// Path variables captured by a matched route.
///
/// Insertion-ordered. Routes declare a handful of captures at most, so
/// lookups are a linear scan over a flat buffer instead of a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVars {
    buf: SmallVec<[(Box<str>, Box<str>); 4]>,
}

impl PathVars {
    pub(crate) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: &str) {
        self.buf.push((name.into(), value.into()));
    }

    /// Drops all entries, keeping the allocation for reuse.
    pub(crate) fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.buf
            .iter()
            .find_map(|(k, v)| if name == &**k { Some(&**v) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buf.iter().map(|(k, v)| (&**k, &**v))
    }

    /// Materializes the variables into an owned map.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.buf
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
