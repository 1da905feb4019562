mod glob;

use crate::router::RouterError;
use crate::vars::PathVars;

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

/// Matcher for one `/`-delimited token of a route pattern.
#[derive(Debug)]
pub(crate) enum SegmentMatcher {
    /// Literal text, matched by string equality.
    Exact(Box<str>),
    /// `{name}` (or a bare `*`): accepts any segment and binds it.
    Capture(Box<str>),
    /// Token with embedded `{name}` / `{name:regex}` groups, compiled to
    /// one anchored regex with named captures.
    Regex { regex: Regex, names: Vec<Box<str>> },
    /// `*` / `?` wildcards, no binding.
    Glob(Box<str>),
}

impl SegmentMatcher {
    /// Tests one request segment, appending captures to `vars` on success.
    pub(crate) fn matches(&self, segment: &str, vars: &mut PathVars) -> bool {
        match self {
            SegmentMatcher::Exact(text) => &**text == segment,
            SegmentMatcher::Capture(name) => {
                vars.push(name, segment);
                true
            }
            SegmentMatcher::Regex { regex, names } => match regex.captures(segment) {
                Some(caps) => {
                    for name in names {
                        // every group is a top-level element of the
                        // concatenation, so it participates in any match
                        vars.push(name, caps.name(name).unwrap().as_str());
                    }
                    true
                }
                None => false,
            },
            SegmentMatcher::Glob(pattern) => glob::glob_match(pattern, segment),
        }
    }

    pub(crate) fn exact_text(&self) -> Option<&str> {
        match self {
            SegmentMatcher::Exact(text) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn is_exact(&self) -> bool {
        self.exact_text().is_some()
    }

    /// Selects the variant for one token. First rule wins: `{` means a
    /// capture (plain or regex), then `*` / `?` mean wildcards, else the
    /// token is a literal.
    fn build(token: &str) -> Result<Self, RouterError> {
        if token.contains('{') {
            if let Some(name) = plain_capture_name(token) {
                if name.is_empty() {
                    return Err(RouterError::EmptyCaptureName {
                        pattern: token.into(),
                    });
                }
                return Ok(SegmentMatcher::Capture(name.into()));
            }
            return build_composite(token);
        }
        if token.contains('*') {
            if token == "*" {
                return Ok(SegmentMatcher::Capture("*".into()));
            }
            return Ok(SegmentMatcher::Glob(token.into()));
        }
        if token.contains('?') {
            return Ok(SegmentMatcher::Glob(token.into()));
        }
        Ok(SegmentMatcher::Exact(token.into()))
    }
}

/// Extracts the name of a whole-segment capture: `{name}` alone, with no
/// sub-pattern. Anything else with a `{` takes the composite regex form.
fn plain_capture_name(token: &str) -> Option<&str> {
    if token.contains(':') {
        return None;
    }
    let inner = token.strip_prefix('{')?.strip_suffix('}')?;
    if inner.contains('{') || inner.contains('}') {
        return None;
    }
    Some(inner)
}

/// Builds the composite regex for a token: literal runs pass through
/// `regex::escape`, each `{name}` / `{name:sub}` becomes `(?P<name>sub)`
/// with `sub` defaulting to `[^/]+`, and the whole pattern is anchored so
/// it must span the segment.
fn build_composite(token: &str) -> Result<SegmentMatcher, RouterError> {
    let mut pattern = String::with_capacity(token.len() + 16);
    let mut names: Vec<Box<str>> = Vec::new();

    pattern.push('^');

    let mut rest = token;
    while let Some(open) = rest.find('{') {
        let close = match rest[open..].find('}') {
            Some(i) => open + i,
            // unclosed brace: the remainder is literal text
            None => break,
        };

        pattern.push_str(&regex::escape(&rest[..open]));

        let inner = &rest[open + 1..close];
        let (name, sub) = match inner.find(':') {
            Some(pos) => (inner[..pos].trim(), inner[pos + 1..].trim()),
            None => (inner.trim(), "[^/]+"),
        };
        if name.is_empty() {
            return Err(RouterError::EmptyCaptureName {
                pattern: token.into(),
            });
        }

        pattern.push_str("(?P<");
        pattern.push_str(name);
        pattern.push('>');
        pattern.push_str(sub);
        pattern.push(')');
        names.push(name.into());

        rest = &rest[close + 1..];
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    let regex = Regex::new(&pattern).map_err(|source| RouterError::InvalidCaptureRegex {
        pattern: token.into(),
        source,
    })?;

    Ok(SegmentMatcher::Regex { regex, names })
}

/// Registration-time memo of compiled matchers, keyed by token text.
/// Tokens like `{id}` recur across many routes; each compiles once.
#[derive(Debug, Default)]
pub(crate) struct SegmentCache {
    map: HashMap<Box<str>, Arc<SegmentMatcher>>,
}

impl SegmentCache {
    pub(crate) fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub(crate) fn get_or_build(&mut self, token: &str) -> Result<Arc<SegmentMatcher>, RouterError> {
        if let Some(matcher) = self.map.get(token) {
            return Ok(Arc::clone(matcher));
        }
        let matcher = Arc::new(SegmentMatcher::build(token)?);
        self.map.insert(token.into(), Arc::clone(&matcher));
        Ok(matcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(token: &str) -> SegmentMatcher {
        SegmentMatcher::build(token).unwrap()
    }

    fn matched_vars(matcher: &SegmentMatcher, segment: &str) -> Option<PathVars> {
        let mut vars = PathVars::new();
        if matcher.matches(segment, &mut vars) {
            Some(vars)
        } else {
            None
        }
    }

    #[test]
    fn variant_selection() {
        assert!(matches!(build("users"), SegmentMatcher::Exact(_)));
        assert!(matches!(build("{id}"), SegmentMatcher::Capture(_)));
        assert!(matches!(build("{id:[0-9]+}"), SegmentMatcher::Regex { .. }));
        assert!(matches!(build("x{id}"), SegmentMatcher::Regex { .. }));
        assert!(matches!(build("{a}{b}"), SegmentMatcher::Regex { .. }));
        assert!(matches!(build("a*b"), SegmentMatcher::Glob(_)));
        assert!(matches!(build("a?b"), SegmentMatcher::Glob(_)));
        // a bare `*` is a capture named "*", not a glob
        match build("*") {
            SegmentMatcher::Capture(name) => assert_eq!(&*name, "*"),
            other => panic!("expected capture, got {:?}", other),
        }
    }

    #[test]
    fn exact_matches_by_equality() {
        let m = build("users");
        assert!(matched_vars(&m, "users").unwrap().is_empty());
        assert!(matched_vars(&m, "user").is_none());
        assert!(matched_vars(&m, "Users").is_none());
    }

    #[test]
    fn capture_binds_whole_segment() {
        let m = build("{id}");
        let vars = matched_vars(&m, "42").unwrap();
        assert_eq!(vars.get("id"), Some("42"));
    }

    #[test]
    fn regex_default_sub_pattern_excludes_nothing_but_slash() {
        let m = build("v{num}");
        let vars = matched_vars(&m, "v1.2-beta").unwrap();
        assert_eq!(vars.get("num"), Some("1.2-beta"));
        assert!(matched_vars(&m, "x1").is_none());
    }

    #[test]
    fn regex_constrained_sub_pattern() {
        let m = build("{id:[0-9]+}");
        assert_eq!(matched_vars(&m, "42").unwrap().get("id"), Some("42"));
        assert!(matched_vars(&m, "abc").is_none());
        assert!(matched_vars(&m, "42x").is_none());
    }

    #[test]
    fn literal_metacharacters_are_escaped() {
        let m = build("report.{ext}");
        assert_eq!(matched_vars(&m, "report.pdf").unwrap().get("ext"), Some("pdf"));
        assert!(matched_vars(&m, "reportXpdf").is_none());
    }

    #[test]
    fn multiple_groups_in_one_token() {
        let m = build("{major}.{minor}");
        let vars = matched_vars(&m, "1.2").unwrap();
        assert_eq!(vars.get("major"), Some("1"));
        assert_eq!(vars.get("minor"), Some("2"));
    }

    #[test]
    fn sub_pattern_whitespace_is_trimmed() {
        let m = build("{id: [0-9]+ }");
        assert_eq!(matched_vars(&m, "7").unwrap().get("id"), Some("7"));
    }

    #[test]
    fn unclosed_brace_is_literal() {
        let m = build("a{b");
        assert!(matched_vars(&m, "a{b").is_some());
        assert!(matched_vars(&m, "ab").is_none());
    }

    #[test]
    fn empty_capture_name_is_rejected() {
        assert!(matches!(
            SegmentMatcher::build("{}"),
            Err(RouterError::EmptyCaptureName { .. })
        ));
        assert!(matches!(
            SegmentMatcher::build("x{:[0-9]+}"),
            Err(RouterError::EmptyCaptureName { .. })
        ));
    }

    #[test]
    fn invalid_sub_pattern_is_rejected() {
        assert!(matches!(
            SegmentMatcher::build("{id:[}"),
            Err(RouterError::InvalidCaptureRegex { .. })
        ));
    }

    #[test]
    fn cache_memoizes_by_token_text() {
        let mut cache = SegmentCache::new();
        let a = cache.get_or_build("{id}").unwrap();
        let b = cache.get_or_build("{id}").unwrap();
        let c = cache.get_or_build("{other}").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
