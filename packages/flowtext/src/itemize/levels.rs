//! Bidi embedding level runs

use std::ops::Range;

use unicode_bidi::{bidi_class, BidiClass, Level};

use super::{RunBoundary, ValueRuns};

/// Resolves paragraphs and embedding levels for UTF-16 text
pub trait BidiEngine {
    /// Length of the paragraph starting at `offset`, including its separator
    fn paragraph_len(&self, text: &[u16], offset: usize) -> usize;

    /// Resolved level for each code unit of `text[range]`
    fn paragraph_levels(&self, text: &[u16], range: Range<usize>, base_level: u8) -> Vec<u8>;
}

/// [`BidiEngine`] backed by the `unicode-bidi` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeBidiEngine;

impl BidiEngine for UnicodeBidiEngine {
    fn paragraph_len(&self, text: &[u16], offset: usize) -> usize {
        for (i, &unit) in text.iter().enumerate().skip(offset) {
            let Some(ch) = char::from_u32(u32::from(unit)) else {
                continue;
            };
            if bidi_class(ch) != BidiClass::B {
                continue;
            }
            if unit == u16::from(b'\r') && text.get(i + 1) == Some(&u16::from(b'\n')) {
                return i + 2 - offset;
            }
            return i + 1 - offset;
        }
        text.len().saturating_sub(offset)
    }

    fn paragraph_levels(&self, text: &[u16], range: Range<usize>, base_level: u8) -> Vec<u8> {
        let level = Level::new(base_level).unwrap_or_else(|_| {
            log::warn!("invalid base level {base_level}, using left-to-right");
            Level::ltr()
        });
        let info = unicode_bidi::utf16::BidiInfo::new(&text[range], Some(level));
        info.levels.iter().map(|level| level.number()).collect()
    }
}

/// Level runs over an already resolved level array
pub struct LevelRuns<'a> {
    runs: ValueRuns<std::iter::Copied<std::slice::Iter<'a, u8>>, u8>,
}

impl<'a> LevelRuns<'a> {
    pub fn new(levels: &'a [u8]) -> Self {
        Self {
            runs: ValueRuns::new(levels.iter().copied(), 0),
        }
    }
}

impl Iterator for LevelRuns<'_> {
    type Item = RunBoundary<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runs.next()
    }
}

/// Per-unit levels, resolved one paragraph at a time
pub struct ParagraphLevels<'a, E> {
    text: &'a [u16],
    engine: &'a E,
    base_level: u8,
    offset: usize,
    current: std::vec::IntoIter<u8>,
}

impl<E: BidiEngine> Iterator for ParagraphLevels<'_, E> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if let Some(level) = self.current.next() {
            return Some(level);
        }

        let remaining = self.text.len() - self.offset;
        if remaining == 0 {
            return None;
        }

        let len = self
            .engine
            .paragraph_len(self.text, self.offset)
            .clamp(1, remaining);
        let range = self.offset..self.offset + len;
        log::trace!("resolving bidi levels for paragraph {range:?}");
        let mut levels = self
            .engine
            .paragraph_levels(self.text, range.clone(), self.base_level);
        if levels.len() != len {
            log::warn!(
                "bidi engine returned {} levels for paragraph {range:?}",
                levels.len()
            );
            levels.resize(len, self.base_level);
        }

        self.offset += len;
        self.current = levels.into_iter();
        self.current.next()
    }
}

/// Level runs of UTF-16 text, resolved lazily paragraph by paragraph
pub struct BidiLevelRuns<'a, E> {
    runs: ValueRuns<ParagraphLevels<'a, E>, u8>,
}

impl<'a, E: BidiEngine> BidiLevelRuns<'a, E> {
    pub fn new(text: &'a [u16], engine: &'a E, base_level: u8) -> Self {
        let levels = ParagraphLevels {
            text,
            engine,
            base_level,
            offset: 0,
            current: Vec::new().into_iter(),
        };
        Self {
            runs: ValueRuns::new(levels, base_level),
        }
    }
}

impl<E: BidiEngine> Iterator for BidiLevelRuns<'_, E> {
    type Item = RunBoundary<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runs.next()
    }
}
