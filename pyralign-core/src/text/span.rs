//! Character-exact spans

/// A contiguous substring of a summary
///
/// `start` and `end` are character offsets into the summary the span was
/// matched against, with `summary[start..end] == text` once the span leaves
/// the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The covered text
    pub text: String,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
