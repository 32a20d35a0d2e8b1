//! Unicode segmentation for text layout
//!
//! This crate provides the text segmentation layer used ahead of shaping:
//! - Compact codepoint property tries and a serialized string-key trie
//! - Extended grapheme cluster boundaries over UTF-16 text
//! - Line break opportunities
//! - Bidi level, emoji presentation, script and hard line break runs
//! - Itemization of text into runs that can be shaped in one pass

pub mod config;
pub mod error;
pub mod grapheme;
pub mod itemize;
pub mod line_break;
pub mod trie;
pub mod unicode;

pub use config::{ItemizeOptions, KeyTrieOptions, LineBreakOptions};
pub use error::{KeyTrieError, SegmentError, SegmentResult, TrieError};
pub use grapheme::{next_grapheme_break, previous_grapheme_break, GraphemeBreaker, Graphemes};
pub use itemize::{
    itemize, BidiEngine, BidiLevelRuns, EmojiRuns, ItemizedRun, Itemizer, LevelRuns,
    NewlineBreaks, RunBoundary, ScriptRuns, ShapingAttrs, UnicodeBidiEngine,
};
pub use line_break::{line_breaks, Break, LineBreaker};
pub use trie::{decode_entities, entity_trie, DenseTrie, DenseTrieBuilder, KeyTrie, KeyTrieBuilder};
pub use unicode::{tables, PropertyTables};
