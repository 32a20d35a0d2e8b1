//! Extended grapheme cluster boundaries over UTF-16 text
//!
//! Offsets are code unit indices. Surrogate pairs are never split; lone
//! surrogates count as code points of their own.

mod rules;

use std::ops::Range;

use crate::unicode::utf16::is_trailing_half;
use crate::unicode::{tables, PropertyTables};

/// Grapheme boundary finder bound to a set of property tables
#[derive(Debug, Clone, Copy)]
pub struct GraphemeBreaker<'t> {
    tables: &'t PropertyTables,
}

impl Default for GraphemeBreaker<'static> {
    fn default() -> Self {
        Self::new(tables())
    }
}

impl<'t> GraphemeBreaker<'t> {
    pub fn new(tables: &'t PropertyTables) -> Self {
        Self { tables }
    }

    /// First boundary after `index`, or `text.len()` if there is none
    pub fn next_break(&self, text: &[u16], index: usize) -> usize {
        let len = text.len();
        if index + 1 >= len {
            return len;
        }

        (index + 1..len)
            .filter(|&i| !is_trailing_half(text, i))
            .find(|&i| self.should_break(text, i))
            .unwrap_or(len)
    }

    /// Last boundary before `index`, or 0 if there is none
    pub fn previous_break(&self, text: &[u16], index: usize) -> usize {
        let len = text.len();
        if index > len {
            return len;
        }
        if index <= 1 {
            return 0;
        }

        (1..index)
            .rev()
            .filter(|&i| !is_trailing_half(text, i))
            .find(|&i| self.should_break(text, i))
            .unwrap_or(0)
    }

    /// Whether a cluster boundary falls between `index - 1` and `index`.
    ///
    /// The start and end of the text are always boundaries.
    pub fn should_break(&self, text: &[u16], index: usize) -> bool {
        if index == 0 || index >= text.len() {
            return true;
        }
        if is_trailing_half(text, index) {
            return false;
        }
        rules::should_break(self.tables, text, index)
    }

    /// Iterate over cluster ranges
    pub fn graphemes<'a>(&self, text: &'a [u16]) -> Graphemes<'a, 't> {
        Graphemes {
            breaker: *self,
            text,
            offset: 0,
        }
    }
}

/// Iterator over the code unit ranges of grapheme clusters
#[derive(Debug, Clone)]
pub struct Graphemes<'a, 't> {
    breaker: GraphemeBreaker<'t>,
    text: &'a [u16],
    offset: usize,
}

impl Iterator for Graphemes<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.text.len() {
            return None;
        }
        let start = self.offset;
        self.offset = self.breaker.next_break(self.text, start);
        Some(start..self.offset)
    }
}

/// [`GraphemeBreaker::next_break`] with the shared tables
pub fn next_grapheme_break(text: &[u16], index: usize) -> usize {
    GraphemeBreaker::default().next_break(text, index)
}

/// [`GraphemeBreaker::previous_break`] with the shared tables
pub fn previous_grapheme_break(text: &[u16], index: usize) -> usize {
    GraphemeBreaker::default().previous_break(text, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    fn boundaries(text: &str) -> Vec<usize> {
        let text = utf16(text);
        let mut result = vec![0];
        let mut offset = 0;
        while offset < text.len() {
            offset = next_grapheme_break(&text, offset);
            result.push(offset);
        }
        result
    }

    #[test]
    fn degenerate_bounds() {
        let text = utf16("ab");
        assert_eq!(next_grapheme_break(&[], 0), 0);
        assert_eq!(next_grapheme_break(&text, 1), 2);
        assert_eq!(next_grapheme_break(&text, 7), 2);
        assert_eq!(previous_grapheme_break(&text, 9), 2);
        assert_eq!(previous_grapheme_break(&text, 1), 0);
        assert_eq!(previous_grapheme_break(&[], 0), 0);
    }

    #[test]
    fn crlf_is_one_cluster() {
        assert_eq!(boundaries("a\r\nb"), [0, 1, 3, 4]);
        assert_eq!(boundaries("\n\r"), [0, 1, 2]);
    }

    #[test]
    fn emoji_modifier_and_zwj_sequences() {
        // baby + light skin tone
        assert_eq!(boundaries("\u{1F476}\u{1F3FB}"), [0, 4]);
        // man ZWJ woman ZWJ girl
        assert_eq!(boundaries("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}"), [0, 8]);
        // ZWJ after a letter does not glue the next pictograph
        assert_eq!(boundaries("a\u{200D}\u{1F6D1}"), [0, 2, 4]);
    }

    #[test]
    fn regional_indicators_pair_up() {
        let flags = "\u{1F1FA}\u{1F1F8}\u{1F1EB}\u{1F1F7}\u{1F1E9}";
        assert_eq!(boundaries(flags), [0, 4, 8, 10]);
        let text = utf16(flags);
        assert_eq!(previous_grapheme_break(&text, 10), 8);
        assert_eq!(previous_grapheme_break(&text, 8), 4);
        assert_eq!(previous_grapheme_break(&text, 6), 4);
    }

    #[test]
    fn hangul_syllables_compose() {
        // L V T, LV T, L L V
        assert_eq!(boundaries("\u{1100}\u{1161}\u{11A8}"), [0, 3]);
        assert_eq!(boundaries("\u{AC00}\u{11A8}\u{1100}\u{1100}\u{1161}"), [0, 2, 5]);
    }

    #[test]
    fn indic_conjuncts_hold_together() {
        // KA VIRAMA TA
        assert_eq!(boundaries("\u{0915}\u{094D}\u{0924}"), [0, 3]);
        // KA VIRAMA ZWJ TA
        assert_eq!(boundaries("\u{0915}\u{094D}\u{200D}\u{0924}"), [0, 4]);
        // no consonant before the linker
        assert_eq!(boundaries("a\u{094D}\u{0924}"), [0, 2, 3]);
    }

    #[test]
    fn lone_surrogates_are_their_own_clusters() {
        let text = vec![0x61, 0xD800, 0x0308, 0xDC00];
        let breaker = GraphemeBreaker::default();
        let ranges: Vec<Range<usize>> = breaker.graphemes(&text).collect();
        assert_eq!(ranges, [0..1, 1..2, 2..3, 3..4]);
    }

    #[test]
    fn never_splits_surrogate_pairs() {
        let text = utf16("\u{10000}\u{10001}");
        let breaker = GraphemeBreaker::default();
        assert!(!breaker.should_break(&text, 1));
        assert!(breaker.should_break(&text, 2));
        assert_eq!(breaker.previous_break(&text, 3), 2);
        assert_eq!(breaker.next_break(&text, 1), 2);
    }
}
