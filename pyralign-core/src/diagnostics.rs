//! Recoverable diagnostics collected while building
//!
//! Human-annotated corpora contain noise that cannot be corrected, so a single
//! bad part, contributor or SCU is dropped and recorded here while the rest of
//! the document is still built.

use std::fmt;

/// What was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticKind {
    /// A part whose text could not be located
    DroppedPart,
    /// A contributor left without parts, spanning several summaries, or
    /// containing an unlocatable part
    DroppedContributor,
    /// An SCU left without contributors or with duplicate summary indices
    DroppedScu,
    /// An annotated SCU reference that is reserved or unknown to the pyramid
    SkippedScu,
}

impl DiagnosticKind {
    /// Short name
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::DroppedPart => "dropped part",
            DiagnosticKind::DroppedContributor => "dropped contributor",
            DiagnosticKind::DroppedScu => "dropped SCU",
            DiagnosticKind::SkippedScu => "skipped SCU",
        }
    }
}

/// One recoverable event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Event kind
    pub kind: DiagnosticKind,
    /// SCU the event belongs to
    pub scu_id: Option<u32>,
    /// Human-readable detail
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scu_id {
            Some(id) => write!(f, "{} (SCU {id}): {}", self.kind.as_str(), self.message),
            None => write!(f, "{}: {}", self.kind.as_str(), self.message),
        }
    }
}

/// Ordered diagnostic collection threaded through a build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event
    pub fn push(&mut self, kind: DiagnosticKind, scu_id: Option<u32>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            kind,
            scu_id,
            message: message.into(),
        });
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of events of one kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Iterate in recording order
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A built value together with the diagnostics gathered while building it
#[derive(Debug, Clone)]
pub struct Built<T> {
    /// The built value
    pub value: T,
    /// Recoverable events, in document order
    pub diagnostics: Diagnostics,
}

impl<T> Built<T> {
    /// Split into value and diagnostics
    pub fn into_parts(self) -> (T, Diagnostics) {
        (self.value, self.diagnostics)
    }
}
