//! Character-indexed view over a UTF-8 string
//!
//! Annotation tools record offsets in characters, not bytes. This view keeps
//! the byte offset of every character so that character ranges can be sliced
//! in O(1) and byte positions reported by searches can be translated back.

/// Borrowed text with a character-to-byte offset table
#[derive(Debug, Clone)]
pub struct IndexedText<'a> {
    text: &'a str,
    /// Byte offset of each character, followed by `text.len()` as a sentinel
    char_starts: Vec<usize>,
}

impl<'a> IndexedText<'a> {
    /// Index the given text
    pub fn new(text: &'a str) -> Self {
        let mut char_starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_starts.push(text.len());
        Self { text, char_starts }
    }

    /// The underlying text
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Number of characters
    pub fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Byte offset of the character at `char_index`
    ///
    /// `char_index == char_len()` maps to the end of the text.
    pub fn byte_offset(&self, char_index: usize) -> Option<usize> {
        self.char_starts.get(char_index).copied()
    }

    /// Character index of the character starting at `byte_offset`
    ///
    /// Returns `None` when the byte offset is not on a character boundary.
    pub fn char_index(&self, byte_offset: usize) -> Option<usize> {
        self.char_starts.binary_search(&byte_offset).ok()
    }

    /// Slice by character range `[start, end)`
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        if start > end {
            return None;
        }
        let from = self.byte_offset(start)?;
        let to = self.byte_offset(end)?;
        Some(&self.text[from..to])
    }

    /// Whether `needle` occurs at character offset `start`
    pub fn matches_at(&self, needle: &str, start: usize) -> bool {
        self.byte_offset(start)
            .and_then(|from| self.text.get(from..))
            .is_some_and(|rest| rest.starts_with(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets() {
        let text = IndexedText::new("hello");
        assert_eq!(text.char_len(), 5);
        assert_eq!(text.byte_offset(0), Some(0));
        assert_eq!(text.byte_offset(5), Some(5));
        assert_eq!(text.byte_offset(6), None);
        assert_eq!(text.slice(1, 4), Some("ell"));
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = IndexedText::new("café au lait");
        assert_eq!(text.char_len(), 12);
        assert_eq!(text.slice(0, 4), Some("café"));
        assert_eq!(text.slice(5, 7), Some("au"));
        // 'é' is two bytes, so 'a' of "au" starts at byte 6
        assert_eq!(text.char_index(6), Some(5));
        assert_eq!(text.char_index(4), None);
    }

    #[test]
    fn test_slice_rejects_inverted_and_out_of_range() {
        let text = IndexedText::new("abc");
        assert_eq!(text.slice(2, 1), None);
        assert_eq!(text.slice(1, 9), None);
        assert_eq!(text.slice(3, 3), Some(""));
    }

    #[test]
    fn test_matches_at() {
        let text = IndexedText::new("The cat sat.");
        assert!(text.matches_at("cat", 4));
        assert!(!text.matches_at("cat", 5));
        assert!(!text.matches_at("cat", 40));
    }

    #[test]
    fn test_empty_text() {
        let text = IndexedText::new("");
        assert_eq!(text.char_len(), 0);
        assert_eq!(text.slice(0, 0), Some(""));
        assert_eq!(text.char_index(0), Some(0));
    }
}
