/// Reasons a pattern is rejected at registration time.
///
/// Lookup never produces an error; an unmatched path is an ordinary
/// `None` result.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("pattern must start with '/': {pattern:?}")]
    MissingLeadingSlash { pattern: Box<str> },

    #[error("pattern exceeds the segment limit: {pattern:?}")]
    TooManySegments { pattern: Box<str> },

    #[error("capture name can not be empty: {pattern:?}")]
    EmptyCaptureName { pattern: Box<str> },

    #[error("invalid capture regex in {pattern:?}: {source}")]
    InvalidCaptureRegex {
        pattern: Box<str>,
        source: regex::Error,
    },
}
