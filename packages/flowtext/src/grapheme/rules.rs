//! UAX #29 extended grapheme cluster rules
//!
//! The pair rules look at the classes on either side of a position. GB9c,
//! GB11 and GB12/13 need more context and run small automata that walk left
//! from the position one code point at a time.

use crate::unicode::utf16::{code_point_at, previous_start};
use crate::unicode::{EmojiFlags, GraphemeClass, IndicConjunctBreak, PropertyTables};

/// Whether there is a cluster boundary between `index - 1` and `index`.
///
/// `index` must be in `1..text.len()`.
pub(crate) fn should_break(tables: &PropertyTables, text: &[u16], index: usize) -> bool {
    use GraphemeClass::*;

    let (Some(before), Some(after)) = (code_point_at(text, index - 1), code_point_at(text, index))
    else {
        return true;
    };
    let previous = tables.grapheme_class(before);
    let current = tables.grapheme_class(after);

    // GB3
    if previous == CR && current == LF {
        return false;
    }

    // GB4, GB5
    if previous.is_control() || current.is_control() {
        return true;
    }

    // GB6
    if previous == L && matches!(current, L | V | LV | LVT) {
        return false;
    }

    // GB7
    if matches!(previous, LV | V) && matches!(current, V | T) {
        return false;
    }

    // GB8
    if matches!(previous, LVT | T) && current == T {
        return false;
    }

    // GB9, GB9a
    if matches!(current, Extend | ZWJ | SpacingMark) {
        return false;
    }

    // GB9b
    if previous == Prepend {
        return false;
    }

    // GB9c
    if indic_conjunct(tables, text, index) {
        return false;
    }

    // GB11
    if emoji_zwj_sequence(tables, text, index) {
        return false;
    }

    // GB12, GB13
    if regional_indicator_pair(tables, text, index) {
        return false;
    }

    // GB999
    true
}

/// Walks left from `index` feeding each code point to `step` until it
/// returns `Done` or the text starts. Returns the final state.
fn scan_back(text: &[u16], index: usize, mut step: impl FnMut(u32) -> Step) -> bool {
    let mut position = Some(index);
    while let Some(at) = position {
        let Some(cp) = code_point_at(text, at) else {
            return false;
        };
        match step(cp) {
            Step::Continue => position = previous_start(text, at),
            Step::Done(matched) => return matched,
        }
    }
    false
}

enum Step {
    Continue,
    Done(bool),
}

/// GB9c: `\p{InCB=Consonant} [\p{InCB=Extend}\p{InCB=Linker}]* \p{InCB=Linker}
/// [\p{InCB=Extend}\p{InCB=Linker}]* × \p{InCB=Consonant}`
fn indic_conjunct(tables: &PropertyTables, text: &[u16], index: usize) -> bool {
    let mut state = 0;
    scan_back(text, index, |cp| {
        let class = tables.indic_conjunct_break(cp);
        state = match (state, class) {
            (0, IndicConjunctBreak::Consonant) => 1,
            (1, IndicConjunctBreak::Extend) => 1,
            (1 | 2, IndicConjunctBreak::Linker) => 2,
            (2, IndicConjunctBreak::Extend) => 2,
            (2, IndicConjunctBreak::Consonant) => return Step::Done(true),
            _ => return Step::Done(false),
        };
        Step::Continue
    })
}

/// GB11: `\p{ExtPict} Extend* ZWJ × \p{ExtPict}`
fn emoji_zwj_sequence(tables: &PropertyTables, text: &[u16], index: usize) -> bool {
    let mut state = 0;
    scan_back(text, index, |cp| {
        let pictographic = tables
            .emoji_flags(cp)
            .contains(EmojiFlags::EXTENDED_PICTOGRAPHIC);
        let class = tables.grapheme_class(cp);
        state = match state {
            0 if pictographic => 1,
            1 if class == GraphemeClass::ZWJ => 2,
            2 if class == GraphemeClass::Extend => 2,
            2 if pictographic => return Step::Done(true),
            _ => return Step::Done(false),
        };
        Step::Continue
    })
}

/// GB12, GB13: regional indicators pair up from the start of their run
fn regional_indicator_pair(tables: &PropertyTables, text: &[u16], index: usize) -> bool {
    let mut count = 0usize;
    scan_back(text, index, |cp| {
        if tables.grapheme_class(cp) != GraphemeClass::RegionalIndicator {
            return Step::Done(false);
        }
        count += 1;
        Step::Continue
    });
    // an odd number of indicators before `index` means it closes a pair
    count >= 2 && count % 2 == 0
}
