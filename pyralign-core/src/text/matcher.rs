//! Span matching under transcription drift
//!
//! Annotation tools record a span's text together with an approximate start
//! offset. Between annotation time and re-processing the summary text may have
//! gained or lost whitespace, so the recorded offset can be stale and the
//! recorded text can differ from the live text in spacing. The matcher tries,
//! in order:
//!
//! 1. the recorded text at the recorded offset ([`SpanMatcher::exact_at`]),
//! 2. every verbatim occurrence, nearest to the recorded offset
//!    ([`SpanMatcher::closest_exact`]),
//! 3. a whitespace-insensitive search over the space-stripped haystack,
//!    nearest to the recorded offset ([`SpanMatcher::soft_match`]).
//!
//! Candidates at equal distance resolve to the earliest occurrence.

use super::indexed::IndexedText;
use super::offset_map::{strip_spaces, OffsetMap};
use super::span::Span;
use std::cell::OnceCell;
use std::iter;

/// Span matcher bound to one haystack
///
/// The stripped offset map is built on first use of soft matching and reused
/// for every later lookup against the same haystack.
#[derive(Debug)]
pub struct SpanMatcher<'a> {
    haystack: IndexedText<'a>,
    offsets: OnceCell<OffsetMap>,
}

impl<'a> SpanMatcher<'a> {
    /// Create a matcher over `haystack`
    pub fn new(haystack: &'a str) -> Self {
        Self {
            haystack: IndexedText::new(haystack),
            offsets: OnceCell::new(),
        }
    }

    /// The haystack this matcher searches
    pub fn haystack(&self) -> &'a str {
        self.haystack.as_str()
    }

    /// Accept `text` if it occurs verbatim at character offset `start`
    pub fn exact_at(&self, text: &str, start: usize) -> Option<Span> {
        if !self.haystack.matches_at(text, start) {
            return None;
        }
        let end = start + text.chars().count();
        Some(self.finalize(start, end, text))
    }

    /// Verbatim occurrence of `text` whose start is nearest to `approx_start`
    pub fn closest_exact(&self, text: &str, approx_start: usize) -> Option<Span> {
        if text.is_empty() {
            return None;
        }
        let starts = occurrences(self.haystack(), text)
            .filter_map(|byte| self.haystack.char_index(byte));
        let start = closest(starts, approx_start)?;
        let end = start + text.chars().count();
        Some(self.finalize(start, end, text))
    }

    /// Whitespace-insensitive occurrence of `text` nearest to `approx_start`
    ///
    /// The returned span's text is the haystack's own substring, which may
    /// differ from `text` in whitespace.
    pub fn soft_match(&self, text: &str, approx_start: usize) -> Option<Span> {
        let needle = strip_spaces(text);
        if needle.is_empty() {
            return None;
        }
        let needle_len = needle.chars().count();
        let map = self.offset_map();

        let (j, start) = occurrences(map.stripped(), &needle)
            .filter_map(|byte| map.stripped_index(byte))
            .filter_map(|j| map.original_index(j).map(|start| (j, start)))
            .min_by_key(|&(_, start)| start.abs_diff(approx_start))?;

        let last = map.original_index(j + needle_len - 1)?;
        let end = last + 1;
        let matched = self.haystack.slice(start, end)?;
        assert_eq!(
            strip_spaces(matched),
            needle,
            "offset map produced a span whose stripped text differs from the needle"
        );
        Some(self.finalize(start, end, matched))
    }

    /// Exact match at `start`, falling back to [`SpanMatcher::soft_match`]
    pub fn locate(&self, text: &str, start: usize) -> Option<Span> {
        self.exact_at(text, start)
            .or_else(|| self.soft_match(text, start))
    }

    /// Nearest verbatim match, falling back to [`SpanMatcher::soft_match`]
    pub fn locate_nearest(&self, text: &str, approx_start: usize) -> Option<Span> {
        self.closest_exact(text, approx_start)
            .or_else(|| self.soft_match(text, approx_start))
    }

    fn offset_map(&self) -> &OffsetMap {
        self.offsets.get_or_init(|| OffsetMap::new(self.haystack()))
    }

    /// Build the accepted span, asserting `haystack[start..end] == text`
    ///
    /// A failure here is a bug in offset bookkeeping, not bad input.
    fn finalize(&self, start: usize, end: usize, text: &str) -> Span {
        let covered = self.haystack.slice(start, end);
        assert_eq!(
            covered,
            Some(text),
            "span [{start}, {end}) does not cover its text"
        );
        Span::new(text, start, end)
    }
}

/// Byte offset of every occurrence of a non-empty `needle`, overlapping
/// occurrences included
///
/// `needle` is searched as a literal, so pattern metacharacters in
/// annotated text carry no meaning.
fn occurrences<'h>(haystack: &'h str, needle: &'h str) -> impl Iterator<Item = usize> + 'h {
    let mut from = 0;
    iter::from_fn(move || {
        let found = from + haystack.get(from..)?.find(needle)?;
        from = found + haystack[found..].chars().next().map_or(1, char::len_utf8);
        Some(found)
    })
}

/// First candidate with minimum distance to `target`
fn closest(candidates: impl Iterator<Item = usize>, target: usize) -> Option<usize> {
    candidates.min_by_key(|&candidate| candidate.abs_diff(target))
}

/// Locate `text` in `haystack` near `approx_start`
///
/// Convenience wrapper over [`SpanMatcher::locate`] for one-off lookups.
pub fn match_span(haystack: &str, text: &str, approx_start: usize) -> Option<Span> {
    SpanMatcher::new(haystack).locate(text, approx_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_at_accepts_correct_offset() {
        let matcher = SpanMatcher::new("The cat sat.");
        let span = matcher.exact_at("cat", 4).unwrap();
        assert_eq!(span, Span::new("cat", 4, 7));
        assert!(matcher.exact_at("cat", 3).is_none());
    }

    #[test]
    fn test_closest_picks_nearest_occurrence() {
        let matcher = SpanMatcher::new("The cat sat. The cat sat.");
        assert_eq!(matcher.closest_exact("cat sat", 20).unwrap().start, 17);
        assert_eq!(matcher.closest_exact("cat sat", 0).unwrap().start, 4);
    }

    #[test]
    fn test_closest_tie_prefers_first() {
        let candidates = [2usize, 6].into_iter();
        assert_eq!(closest(candidates, 4), Some(2));
    }

    #[test]
    fn test_soft_match_tie_prefers_first() {
        // "ab" appears (stripped) at original offsets 0 and 6; 3 is equidistant
        let matcher = SpanMatcher::new("a b   ab");
        let span = matcher.soft_match("ab", 3).unwrap();
        assert_eq!(span.start, 0);
        assert_eq!(span.text, "a b");
    }

    #[test]
    fn test_soft_match_escapes_pattern_characters() {
        let matcher = SpanMatcher::new("costs $1.50 (approx.)");
        let span = matcher.soft_match("$1.50 (approx.)", 0).unwrap();
        assert_eq!(span.text, "$1.50 (approx.)");
        assert!(matcher.soft_match("$1x50", 0).is_none());
    }

    #[test]
    fn test_occurrences_include_overlaps() {
        assert_eq!(occurrences("ha ha ha", "ha ha").collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(occurrences("aaaa", "aa").collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(occurrences("éé é", "é").collect::<Vec<_>>(), vec![0, 2, 5]);
        assert_eq!(occurrences("abc", "x").count(), 0);
    }

    #[test]
    fn test_closest_considers_overlapping_occurrences() {
        let matcher = SpanMatcher::new("ha ha ha");
        assert_eq!(matcher.closest_exact("ha ha", 3).unwrap(), Span::new("ha ha", 3, 8));
        assert_eq!(matcher.closest_exact("ha ha", 0).unwrap().start, 0);
    }

    #[test]
    fn test_soft_match_considers_overlapping_occurrences() {
        let matcher = SpanMatcher::new("very very very");
        let span = matcher.soft_match("veryvery", 5).unwrap();
        assert_eq!(span, Span::new("very very", 5, 14));
    }

    #[test]
    fn test_soft_match_rejects_blank_needle() {
        let matcher = SpanMatcher::new("anything");
        assert!(matcher.soft_match("   ", 0).is_none());
        assert!(matcher.soft_match("", 0).is_none());
    }

    #[test]
    fn test_locate_prefers_exact() {
        let matcher = SpanMatcher::new("one two one two");
        let span = matcher.locate("one", 8).unwrap();
        assert_eq!(span, Span::new("one", 8, 11));
    }

    #[test]
    fn test_match_span_across_newline() {
        let span = match_span("first line\nsecond", "line second", 6).unwrap();
        assert_eq!(span.text, "line\nsecond");
        assert_eq!((span.start, span.end), (6, 17));
    }
}
