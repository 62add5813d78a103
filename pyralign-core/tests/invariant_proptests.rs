//! Property tests for offset reconciliation and span matching

use proptest::prelude::*;
use pyralign_core::text::{normalize_whitespace, strip_spaces, IndexedText, OffsetMap, SpanMatcher};

/// Words interleaved with irregular runs of whitespace
fn spaced_text() -> impl Strategy<Value = (Vec<String>, String)> {
    prop::collection::vec(("[a-zé.*]{1,5}", "[ \t\n]{1,3}"), 1..10).prop_map(|pairs| {
        let words: Vec<String> = pairs.iter().map(|(word, _)| word.clone()).collect();
        let text: String = pairs
            .into_iter()
            .flat_map(|(word, gap)| [word, gap])
            .collect();
        (words, text)
    })
}

proptest! {
    #[test]
    fn offset_map_points_at_matching_characters(text in "[ a\tbé\n語]{0,40}") {
        let map = OffsetMap::new(&text);
        let chars: Vec<char> = text.chars().collect();

        prop_assert_eq!(map.stripped(), strip_spaces(&text));
        prop_assert_eq!(map.len(), map.stripped().chars().count());
        for (j, ch) in map.stripped().chars().enumerate() {
            let i = map.original_index(j).unwrap();
            prop_assert_eq!(chars[i], ch);
        }
        prop_assert!(map.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn located_span_covers_its_text(
        (words, text) in spaced_text(),
        from in 0usize..10,
        len in 1usize..4,
        approx in 0usize..80,
    ) {
        let from = from % words.len();
        let to = (from + len).min(words.len());
        let needle = words[from..to].join(" ");

        let matcher = SpanMatcher::new(&text);
        let span = matcher.locate(&needle, approx);
        prop_assert!(span.is_some());
        let span = span.unwrap();

        let covered = IndexedText::new(&text).slice(span.start, span.end);
        prop_assert_eq!(covered, Some(span.text.as_str()));
        prop_assert_eq!(strip_spaces(&span.text), strip_spaces(&needle));
    }

    #[test]
    fn nearest_match_is_stable_on_its_own_output(
        (words, text) in spaced_text(),
        pick in 0usize..10,
        approx in 0usize..80,
    ) {
        let word = &words[pick % words.len()];
        let matcher = SpanMatcher::new(&text);

        let first = matcher.locate_nearest(word, approx).unwrap();
        let second = matcher.locate_nearest(&first.text, first.start).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalizing_is_idempotent(text in "[ a\tb\n語]{0,30}") {
        let once = normalize_whitespace(&text);
        prop_assert_eq!(normalize_whitespace(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }
}
