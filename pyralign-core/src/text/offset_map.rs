//! Offset reconciliation between a text and its whitespace-stripped copy
//!
//! `OffsetMap` is built by a single left-to-right scan. Entry `j` holds the
//! character index, in the original text, of the `j`-th non-space character.
//! Searches run over the stripped copy and their offsets are mapped back
//! through the table.

/// Whether a character is dropped when stripping
#[inline]
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace()
}

/// Remove every space character from `text`
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|&ch| !is_space(ch)).collect()
}

/// Stripped copy of a text plus the stripped-to-original index table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMap {
    stripped: String,
    /// Byte offset of each stripped character inside `stripped`
    stripped_byte_starts: Vec<usize>,
    /// Character index in the original text of each stripped character
    origins: Vec<usize>,
}

impl OffsetMap {
    /// Build the map for `text`
    pub fn new(text: &str) -> Self {
        let mut stripped = String::with_capacity(text.len());
        let mut stripped_byte_starts = Vec::with_capacity(text.len());
        let mut origins = Vec::with_capacity(text.len());

        for (char_index, ch) in text.chars().enumerate() {
            if is_space(ch) {
                continue;
            }
            stripped_byte_starts.push(stripped.len());
            origins.push(char_index);
            stripped.push(ch);
        }

        Self {
            stripped,
            stripped_byte_starts,
            origins,
        }
    }

    /// The text with all space characters removed
    pub fn stripped(&self) -> &str {
        &self.stripped
    }

    /// Number of non-space characters
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Whether the original text was empty or all spaces
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Original character index of the `stripped_index`-th non-space character
    pub fn original_index(&self, stripped_index: usize) -> Option<usize> {
        self.origins.get(stripped_index).copied()
    }

    /// Stripped character index of the character starting at `byte_offset`
    /// inside [`OffsetMap::stripped`]
    pub fn stripped_index(&self, byte_offset: usize) -> Option<usize> {
        self.stripped_byte_starts.binary_search(&byte_offset).ok()
    }

    /// The raw table
    pub fn as_slice(&self) -> &[usize] {
        &self.origins
    }
}
