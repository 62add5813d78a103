//! Fatal error types
//!
//! These cover input documents that cannot be turned into a pyramid or an
//! annotation at all. Localized annotation noise is reported through
//! [`crate::diagnostics::Diagnostics`] instead.

use thiserror::Error;

/// Unrecoverable pyramid and annotation errors
#[derive(Debug, Error)]
pub enum PyramidError {
    /// The document is not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// No `startDocumentRegEx` in the document and no default supplied
    #[error("no document separator pattern in the document and no default supplied")]
    MissingSeparator,

    /// The separator pattern does not compile
    #[error("invalid document separator pattern '{pattern}': {source}")]
    InvalidSeparator {
        /// The offending pattern
        pattern: String,
        /// Compilation error
        source: regex::Error,
    },

    /// The separator pattern never matches the document text
    #[error("document separator pattern '{pattern}' does not match the document text")]
    SeparatorNotFound {
        /// The pattern that was tried
        pattern: String,
    },

    /// A summary carved out of the document is empty
    #[error("summary {index} is empty after boundary extraction")]
    EmptySummary {
        /// Position of the summary in document order
        index: usize,
    },

    /// A required attribute is absent
    #[error("<{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
    },

    /// An attribute does not parse as the expected type
    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
        /// Raw attribute value
        value: String,
    },

    /// A part offset lies before the first summary of the document
    #[error("part offset {offset} lies before the first summary")]
    OffsetBeforeFirstSummary {
        /// Document-absolute character offset
        offset: usize,
    },

    /// Pyramid parts that contradict each other
    #[error("inconsistent pyramid: {0}")]
    InvalidPyramid(String),

    /// A summary index is not valid for the pyramid
    #[error("summary index {index} out of range for a pyramid with {len} summaries")]
    SummaryIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of summaries
        len: usize,
    },

    /// A summarizer type name is not recognized
    #[error("unknown summarizer type '{0}'")]
    UnknownSummarizerType(String),
}

/// Result type for pyramid operations
pub type Result<T> = std::result::Result<T, PyramidError>;
