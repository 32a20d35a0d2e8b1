//! Configuration for key trie encoding, line breaking and run itemization

use serde::{Deserialize, Serialize};

/// Options controlling how a key trie is serialized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyTrieOptions {
    /// Largest accepted ratio of jump-table slots to actual branches.
    /// Nodes above this ratio fall back to a sorted dictionary.
    pub max_jump_table_overhead: f64,
}

impl Default for KeyTrieOptions {
    fn default() -> Self {
        Self {
            max_jump_table_overhead: 2.0,
        }
    }
}

/// Options for the combined run itemizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemizeOptions {
    /// Paragraph embedding level handed to the bidi engine (0 = LTR, 1 = RTL)
    pub base_level: u8,
    /// Whether a line feed always ends the current run
    pub split_at_newlines: bool,
}

impl Default for ItemizeOptions {
    fn default() -> Self {
        Self {
            base_level: 0,
            split_at_newlines: true,
        }
    }
}

/// Options for the line break iterator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineBreakOptions {
    /// Report only required breaks and the end of the text
    pub hard_breaks_only: bool,
}
