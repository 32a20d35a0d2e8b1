//! Compressed key trie
//!
//! Node header layout:
//!
//! ```text
//!  15 14 | 13 ........ 7 | 6 ....... 0
//!  value |  branch count | char/offset
//! ```

pub mod builder;
pub mod decode;
pub mod encode;
pub mod entities;

pub use builder::{KeyTrieBuilder, NodeId};
pub use decode::{determine_branch, KeyMatch, KeyTrie, BRANCH_LENGTH, JUMP_TABLE, VALUE_LENGTH};
pub use encode::encode;
pub use self::entities::{
    build_entity_trie, builtin_entities, decode_entities, decode_entities_with, entity_trie,
};
