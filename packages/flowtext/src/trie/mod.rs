//! Compact lookup tables
//!
//! Two representations are provided:
//! - [`DenseTrie`]: code point to class value, constant-time lookup
//! - [`KeyTrie`]: multi-unit string keys to short string values, encoded into
//!   16-bit words with per-node branch encodings

pub mod dense;
pub mod dense_builder;
pub mod key;

pub use dense::DenseTrie;
pub use dense_builder::DenseTrieBuilder;
pub use key::{
    decode_entities, determine_branch, encode, entity_trie, KeyMatch, KeyTrie, KeyTrieBuilder,
};
