//! Emoji presentation runs
//!
//! Code points are mapped to [`EmojiCategory`] and tokenized by a
//! longest-match scanner. A token is either an emoji presentation sequence, a
//! text presentation sequence or a single code point of plain text.

use super::RunBoundary;
use crate::unicode::utf16::code_points;
use crate::unicode::{EmojiFlags, PropertyTables};

const KEYCAP: u32 = 0x20E3;
const CIRCLE_BACKSLASH: u32 = 0x20E0;
const ZWJ: u32 = 0x200D;
const VS15: u32 = 0xFE0E;
const VS16: u32 = 0xFE0F;
const TAG_BASE: u32 = 0x1F3F4;
const CANCEL_TAG: u32 = 0xE007F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmojiCategory {
    TextPresentation,
    EmojiPresentation,
    ModifierBase,
    Modifier,
    RegionalIndicator,
    KeycapBase,
    CombiningEnclosingKeycap,
    CombiningEnclosingCircleBackslash,
    Zwj,
    Vs15,
    Vs16,
    TagBase,
    TagSequence,
    TagTerm,
    Other,
}

impl EmojiCategory {
    pub fn classify(cp: u32, flags: EmojiFlags) -> Self {
        match cp {
            KEYCAP => return Self::CombiningEnclosingKeycap,
            CIRCLE_BACKSLASH => return Self::CombiningEnclosingCircleBackslash,
            ZWJ => return Self::Zwj,
            VS15 => return Self::Vs15,
            VS16 => return Self::Vs16,
            TAG_BASE => return Self::TagBase,
            0xE0030..=0xE0039 | 0xE0061..=0xE007A => return Self::TagSequence,
            CANCEL_TAG => return Self::TagTerm,
            _ => {}
        }

        if flags.contains(EmojiFlags::MODIFIER_BASE) {
            Self::ModifierBase
        } else if flags.contains(EmojiFlags::MODIFIER) {
            Self::Modifier
        } else if (0x1F1E6..=0x1F1FF).contains(&cp) {
            Self::RegionalIndicator
        } else if matches!(cp, 0x30..=0x39 | 0x23 | 0x2A) {
            Self::KeycapBase
        } else if flags.contains(EmojiFlags::PRESENTATION) {
            Self::EmojiPresentation
        } else if flags.contains(EmojiFlags::EMOJI) {
            Self::TextPresentation
        } else {
            Self::Other
        }
    }

    fn is_any_emoji(self) -> bool {
        matches!(
            self,
            Self::TextPresentation
                | Self::EmojiPresentation
                | Self::KeycapBase
                | Self::ModifierBase
                | Self::TagBase
        )
    }
}

/// Token starting at `start`: its end and whether it is presented as emoji.
///
/// `start` must be less than `categories.len()`.
pub fn scan_emoji(categories: &[EmojiCategory], start: usize) -> (usize, bool) {
    let scanner = Scanner { categories };
    let text = scanner.text_presentation(start);
    let emoji = scanner.emoji_presentation(start);

    match (emoji, text) {
        (Some(emoji), Some(text)) if emoji > text => (start + emoji, true),
        (_, Some(text)) => (start + text, false),
        (Some(emoji), None) => (start + emoji, true),
        (None, None) => (start + 1, false),
    }
}

/// Matchers return the length of the longest match at a position
struct Scanner<'a> {
    categories: &'a [EmojiCategory],
}

impl Scanner<'_> {
    fn at(&self, index: usize) -> Option<EmojiCategory> {
        self.categories.get(index).copied()
    }

    fn is(&self, index: usize, category: EmojiCategory) -> bool {
        self.at(index) == Some(category)
    }

    fn any_emoji(&self, index: usize) -> bool {
        self.at(index).is_some_and(EmojiCategory::is_any_emoji)
    }

    /// `any_emoji VS15`
    fn text_presentation(&self, i: usize) -> Option<usize> {
        (self.any_emoji(i) && self.is(i + 1, EmojiCategory::Vs15)).then_some(2)
    }

    fn emoji_presentation(&self, i: usize) -> Option<usize> {
        use EmojiCategory::*;

        let single = matches!(self.at(i), Some(EmojiPresentation | TagBase | ModifierBase))
            .then_some(1);
        let candidates = [
            single,
            self.presentation_sequence(i),
            self.modifier_sequence(i),
            (self.is(i, RegionalIndicator) && self.is(i + 1, RegionalIndicator)).then_some(2),
            self.tag_sequence(i),
            self.keycap_sequence(i),
            self.zwj_sequence(i),
            self.circle_backslash_sequence(i),
        ];
        candidates.into_iter().flatten().max()
    }

    /// `any_emoji VS16`
    fn presentation_sequence(&self, i: usize) -> Option<usize> {
        (self.any_emoji(i) && self.is(i + 1, EmojiCategory::Vs16)).then_some(2)
    }

    /// `modifier_base modifier`
    fn modifier_sequence(&self, i: usize) -> Option<usize> {
        (self.is(i, EmojiCategory::ModifierBase) && self.is(i + 1, EmojiCategory::Modifier))
            .then_some(2)
    }

    /// `tag_base tag_sequence+ tag_term`
    fn tag_sequence(&self, i: usize) -> Option<usize> {
        if !self.is(i, EmojiCategory::TagBase) {
            return None;
        }
        let mut end = i + 1;
        while self.is(end, EmojiCategory::TagSequence) {
            end += 1;
        }
        (end > i + 1 && self.is(end, EmojiCategory::TagTerm)).then_some(end + 1 - i)
    }

    /// `keycap_base VS16? keycap`
    fn keycap_sequence(&self, i: usize) -> Option<usize> {
        if !self.is(i, EmojiCategory::KeycapBase) {
            return None;
        }
        let mut end = i + 1;
        if self.is(end, EmojiCategory::Vs16) {
            end += 1;
        }
        self.is(end, EmojiCategory::CombiningEnclosingKeycap)
            .then_some(end + 1 - i)
    }

    /// `any_emoji VS16? circle_backslash`
    fn circle_backslash_sequence(&self, i: usize) -> Option<usize> {
        if !self.any_emoji(i) {
            return None;
        }
        let mut end = i + 1;
        if self.is(end, EmojiCategory::Vs16) {
            end += 1;
        }
        self.is(end, EmojiCategory::CombiningEnclosingCircleBackslash)
            .then_some(end + 1 - i)
    }

    /// `element (ZWJ element)+`
    fn zwj_sequence(&self, i: usize) -> Option<usize> {
        let mut end = i + self.zwj_element(i)?;
        let mut joined = 0;
        while self.is(end, EmojiCategory::Zwj) {
            let Some(len) = self.zwj_element(end + 1) else {
                break;
            };
            end += 1 + len;
            joined += 1;
        }
        (joined > 0).then_some(end - i)
    }

    /// Presentation sequence, modifier sequence or a bare emoji
    fn zwj_element(&self, i: usize) -> Option<usize> {
        self.presentation_sequence(i)
            .or_else(|| self.modifier_sequence(i))
            .or_else(|| self.any_emoji(i).then_some(1))
    }
}

/// Emoji presentation boundaries of UTF-16 text
#[derive(Debug, Clone)]
pub struct EmojiRuns {
    categories: Vec<EmojiCategory>,
    offsets: Vec<usize>,
    len: usize,
    index: usize,
    last: Option<bool>,
    done: bool,
}

impl EmojiRuns {
    pub fn new(text: &[u16], tables: &PropertyTables) -> Self {
        let (offsets, categories) = code_points(text)
            .map(|(offset, cp)| (offset, EmojiCategory::classify(cp, tables.emoji_flags(cp))))
            .unzip();
        Self {
            categories,
            offsets,
            len: text.len(),
            index: 0,
            last: None,
            done: false,
        }
    }
}

impl Iterator for EmojiRuns {
    type Item = RunBoundary<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while self.index < self.categories.len() {
            let start = self.index;
            let (end, is_emoji) = scan_emoji(&self.categories, start);
            self.index = end;
            if self.last != Some(is_emoji) {
                self.last = Some(is_emoji);
                return Some(RunBoundary::new(self.offsets[start], is_emoji));
            }
        }
        self.done = true;
        Some(RunBoundary::new(self.len, self.last.unwrap_or(false)))
    }
}
