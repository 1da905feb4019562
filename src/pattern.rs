use crate::router::RouterError;
use crate::segment::{SegmentCache, SegmentMatcher};
use crate::vars::PathVars;

use std::sync::Arc;

/// Upper bound on pattern depth; registration fails beyond it.
pub(crate) const MAX_SEGMENTS: usize = 20;

/// A parsed route pattern: one matcher per `/`-delimited token, plus the
/// source text for diagnostics. Immutable once built.
#[derive(Debug)]
pub(crate) struct RoutePattern {
    source: Box<str>,
    matchers: Vec<Arc<SegmentMatcher>>,
}

impl RoutePattern {
    pub(crate) fn parse(pattern: &str, segments: &mut SegmentCache) -> Result<Self, RouterError> {
        if !pattern.starts_with('/') {
            return Err(RouterError::MissingLeadingSlash {
                pattern: pattern.into(),
            });
        }

        let tokens: Vec<&str> = pattern[1..].split('/').collect();
        if tokens.len() > MAX_SEGMENTS {
            return Err(RouterError::TooManySegments {
                pattern: pattern.into(),
            });
        }

        let mut matchers = Vec::with_capacity(tokens.len());
        for token in tokens {
            matchers.push(segments.get_or_build(token)?);
        }

        Ok(Self {
            source: pattern.into(),
            matchers,
        })
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn segment_count(&self) -> usize {
        self.matchers.len()
    }

    /// True when every segment is a literal. Such patterns are resolved by
    /// whole-string equality and never scanned.
    pub(crate) fn is_static(&self) -> bool {
        self.matchers.iter().all(|m| m.is_exact())
    }

    /// The literal first segment, when there is one to group by.
    pub(crate) fn first_literal(&self) -> Option<&str> {
        self.matchers.first().and_then(|m| m.exact_text())
    }

    /// Matches pre-split request segments in order, short-circuiting on
    /// the first failure. The table only hands over paths whose segment
    /// count equals this pattern's.
    pub(crate) fn matches(&self, segments: &[&str], vars: &mut PathVars) -> bool {
        assert_eq!(
            segments.len(),
            self.matchers.len(),
            "segment count mismatch for {:?}",
            self.source
        );

        for (matcher, segment) in self.matchers.iter().zip(segments) {
            if !matcher.matches(segment, vars) {
                // a partial match is meaningless
                vars.clear();
                return false;
            }
        }
        true
    }
}
