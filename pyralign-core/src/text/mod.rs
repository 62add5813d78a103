//! Text primitives for span alignment
//!
//! - [`IndexedText`]: character-offset slicing over UTF-8 text
//! - [`OffsetMap`]: stripped-to-original offset reconciliation
//! - [`SpanMatcher`]: exact and whitespace-insensitive span lookup

pub mod indexed;
pub mod matcher;
pub mod normalize;
pub mod offset_map;
pub mod span;

pub use indexed::IndexedText;
pub use matcher::{match_span, SpanMatcher};
pub use normalize::normalize_whitespace;
pub use offset_map::{strip_spaces, OffsetMap};
pub use span::Span;
