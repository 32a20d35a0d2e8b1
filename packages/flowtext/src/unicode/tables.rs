//! Process-wide property tables
//!
//! Each Unicode property the segmenters consult is compacted into a
//! [`DenseTrie`]. The tables are generated from the ICU4X compiled data on
//! first use, or loaded from blobs exported by [`PropertyTables::to_blobs`].

use std::ops::{Range, RangeInclusive};

use icu_properties::props::{
    Emoji, EmojiModifier, EmojiModifierBase, EmojiPresentation, ExtendedPictographic,
    GraphemeClusterBreak, IndicConjunctBreak as IcuIndicConjunctBreak, LineBreak,
};
use icu_properties::{CodePointMapData, CodePointSetData};
use once_cell::sync::Lazy;
use unicode_script::{Script, UnicodeScript};

use super::properties::{EmojiFlags, GraphemeClass, IndicConjunctBreak, LineBreakClass};
use crate::error::{SegmentError, SegmentResult};
use crate::trie::dense::MAX_CODE_POINT;
use crate::trie::{DenseTrie, DenseTrieBuilder};

const SURROGATES: Range<u32> = 0xD800..0xE000;

static TABLES: Lazy<PropertyTables> = Lazy::new(PropertyTables::from_unicode_data);

/// Shared tables generated from the bundled Unicode data
pub fn tables() -> &'static PropertyTables {
    &TABLES
}

/// Serialized property tries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBlobs {
    pub grapheme_break: Vec<u8>,
    pub emoji: Vec<u8>,
    pub indic_conjunct_break: Vec<u8>,
    pub line_break: Vec<u8>,
}

/// Codepoint tries for every property the segmenters use
#[derive(Debug, Clone)]
pub struct PropertyTables {
    grapheme_break: DenseTrie,
    emoji: DenseTrie,
    indic_conjunct_break: DenseTrie,
    line_break: DenseTrie,
    script: DenseTrie,
    scripts: Vec<Script>,
}

impl PropertyTables {
    /// Generate all tables from the ICU4X compiled data
    pub fn from_unicode_data() -> Self {
        let mut grapheme_break = map_builder(
            GraphemeClass::Other as u32,
            CodePointMapData::<GraphemeClusterBreak>::new()
                .iter_ranges()
                .map(|entry| (entry.range, GraphemeClass::from_icu(entry.value) as u32)),
        );
        // unpaired surrogates always form their own cluster
        if let Err(err) = grapheme_break.set_range(
            SURROGATES.start,
            SURROGATES.end - 1,
            GraphemeClass::Control as u32,
        ) {
            log::warn!("skipping surrogate range: {err}");
        }
        let grapheme_break = grapheme_break.build();

        let indic_conjunct_break = map_trie(
            IndicConjunctBreak::None as u32,
            CodePointMapData::<IcuIndicConjunctBreak>::new()
                .iter_ranges()
                .map(|entry| (entry.range, IndicConjunctBreak::from_icu(entry.value) as u32)),
        );

        let line_break = map_trie(
            LineBreakClass::XX as u32,
            CodePointMapData::<LineBreak>::new()
                .iter_ranges()
                .map(|entry| (entry.range, LineBreakClass::from_icu(entry.value) as u32)),
        );

        let mut emoji = DenseTrieBuilder::new(0, 0);
        let sets = [
            (EmojiFlags::EMOJI, CodePointSetData::new::<Emoji>()),
            (EmojiFlags::PRESENTATION, CodePointSetData::new::<EmojiPresentation>()),
            (EmojiFlags::MODIFIER, CodePointSetData::new::<EmojiModifier>()),
            (EmojiFlags::MODIFIER_BASE, CodePointSetData::new::<EmojiModifierBase>()),
            (EmojiFlags::EXTENDED_PICTOGRAPHIC, CodePointSetData::new::<ExtendedPictographic>()),
        ];
        for (flag, set) in sets {
            for range in set.iter_ranges() {
                let result =
                    emoji.update_range(*range.start(), *range.end(), |bits| bits | flag.bits());
                if let Err(err) = result {
                    log::warn!("skipping emoji range: {err}");
                }
            }
        }

        let (script, scripts) = script_trie();

        log::debug!(
            "generated property tables: {} scripts, {} words",
            scripts.len(),
            grapheme_break.data_len()
                + indic_conjunct_break.data_len()
                + line_break.data_len()
                + script.data_len()
        );

        Self {
            grapheme_break,
            emoji: emoji.build(),
            indic_conjunct_break,
            line_break,
            script,
            scripts,
        }
    }

    /// Load the property tries from serialized blobs. Script data always
    /// comes from the bundled tables.
    pub fn from_blobs(blobs: &PropertyBlobs) -> SegmentResult<Self> {
        let load = |table: &'static str, bytes: &[u8]| {
            DenseTrie::from_bytes(bytes).map_err(|source| SegmentError::Table { table, source })
        };
        let (script, scripts) = script_trie();

        Ok(Self {
            grapheme_break: load("grapheme_break", &blobs.grapheme_break)?,
            emoji: load("emoji", &blobs.emoji)?,
            indic_conjunct_break: load("indic_conjunct_break", &blobs.indic_conjunct_break)?,
            line_break: load("line_break", &blobs.line_break)?,
            script,
            scripts,
        })
    }

    pub fn to_blobs(&self) -> PropertyBlobs {
        PropertyBlobs {
            grapheme_break: self.grapheme_break.to_bytes(),
            emoji: self.emoji.to_bytes(),
            indic_conjunct_break: self.indic_conjunct_break.to_bytes(),
            line_break: self.line_break.to_bytes(),
        }
    }

    #[inline]
    pub fn grapheme_class(&self, cp: u32) -> GraphemeClass {
        GraphemeClass::from_u32(self.grapheme_break.get(cp))
    }

    #[inline]
    pub fn emoji_flags(&self, cp: u32) -> EmojiFlags {
        EmojiFlags::from_bits_truncate(self.emoji.get(cp))
    }

    #[inline]
    pub fn indic_conjunct_break(&self, cp: u32) -> IndicConjunctBreak {
        IndicConjunctBreak::from_u32(self.indic_conjunct_break.get(cp))
    }

    #[inline]
    pub fn line_break_class(&self, cp: u32) -> LineBreakClass {
        LineBreakClass::from_u32(self.line_break.get(cp))
    }

    #[inline]
    pub fn script(&self, cp: u32) -> Script {
        self.scripts
            .get(self.script.get(cp) as usize)
            .copied()
            .unwrap_or(Script::Unknown)
    }

    pub fn grapheme_break_trie(&self) -> &DenseTrie {
        &self.grapheme_break
    }

    pub fn emoji_trie(&self) -> &DenseTrie {
        &self.emoji
    }
}

fn map_trie(default: u32, ranges: impl Iterator<Item = (RangeInclusive<u32>, u32)>) -> DenseTrie {
    map_builder(default, ranges).build()
}

fn map_builder(
    default: u32,
    ranges: impl Iterator<Item = (RangeInclusive<u32>, u32)>,
) -> DenseTrieBuilder {
    let mut builder = DenseTrieBuilder::new(default, default);
    for (range, value) in ranges {
        if value == default {
            continue;
        }
        if let Err(err) = builder.set_range(*range.start(), *range.end(), value) {
            log::warn!("skipping property range: {err}");
        }
    }
    builder
}

/// Script trie mapping to indices into the returned script list
fn script_trie() -> (DenseTrie, Vec<Script>) {
    let mut scripts = vec![Script::Unknown];
    let mut builder = DenseTrieBuilder::new(0, 0);

    let mut flush = |start: u32, end: u32, script: Script| {
        if script == Script::Unknown {
            return;
        }
        let index = match scripts.iter().position(|&known| known == script) {
            Some(index) => index,
            None => {
                scripts.push(script);
                scripts.len() - 1
            }
        };
        if let Err(err) = builder.set_range(start, end, index as u32) {
            log::warn!("skipping script range: {err}");
        }
    };

    let mut run_start = 0;
    let mut run_script = Script::Unknown;
    for cp in 0..=MAX_CODE_POINT {
        let script = char::from_u32(cp).map_or(Script::Unknown, |ch| ch.script());
        if script != run_script {
            if cp > 0 {
                flush(run_start, cp - 1, run_script);
            }
            run_start = cp;
            run_script = script;
        }
    }
    flush(run_start, MAX_CODE_POINT, run_script);

    (builder.build(), scripts)
}
