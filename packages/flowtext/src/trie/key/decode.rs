//! Runtime traversal of encoded key tries

use crate::error::KeyTrieError;

/// Bits 15..14: value length indicator
pub const VALUE_LENGTH: u16 = 0xC000;
/// Bits 13..7: branch count or jump table length
pub const BRANCH_LENGTH: u16 = 0x3F80;
/// Bits 6..0: single branch character or jump table offset
pub const JUMP_TABLE: u16 = 0x007F;

pub(crate) const VALUE_SHIFT: u32 = 14;
pub(crate) const BRANCH_SHIFT: u32 = 7;
/// Largest value stored inline in a leaf header
pub(crate) const INLINE_VALUE: u16 = 0x3FFF;

/// Find the node reached from the node with header `current` by unit `ch`.
///
/// `node_idx` is the first word after the header and any value words. Returns
/// `None` when there is no such branch or the array is too short.
pub fn determine_branch(tree: &[u16], current: u16, node_idx: usize, ch: u16) -> Option<usize> {
    let branch_count = usize::from((current & BRANCH_LENGTH) >> BRANCH_SHIFT);
    let jump_offset = current & JUMP_TABLE;

    if branch_count == 0 {
        return (jump_offset != 0 && ch == jump_offset).then_some(node_idx);
    }

    if jump_offset != 0 {
        let slot = usize::from(ch.checked_sub(jump_offset)?);
        if slot >= branch_count {
            return None;
        }
        let destination = *tree.get(node_idx + slot)?;
        return usize::from(destination).checked_sub(1);
    }

    let keys = tree.get(node_idx..node_idx + branch_count)?;
    let position = keys.binary_search(&ch).ok()?;
    tree.get(node_idx + branch_count + position)
        .map(|&destination| usize::from(destination))
}

/// Result of a longest-match walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMatch {
    /// Code units consumed by the matched key
    pub len: usize,
    /// Offset of the node holding the value
    pub node: usize,
}

/// Encoded key trie, read-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTrie {
    words: Vec<u16>,
}

impl KeyTrie {
    pub fn from_words(words: Vec<u16>) -> Result<Self, KeyTrieError> {
        if words.is_empty() {
            return Err(KeyTrieError::Malformed("missing root node".into()));
        }
        Ok(Self { words })
    }

    /// Trie with no keys
    pub fn empty() -> Self {
        Self { words: vec![0] }
    }

    /// Load from little-endian 16-bit words
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyTrieError> {
        if bytes.len() % 2 != 0 {
            return Err(KeyTrieError::Malformed(format!(
                "odd byte length {}",
                bytes.len()
            )));
        }
        Self::from_words(
            bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect(),
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Follow one code unit from `node`
    pub fn step(&self, node: usize, unit: u16) -> Option<usize> {
        let header = *self.words.get(node)?;
        let value_length = usize::from((header & VALUE_LENGTH) >> VALUE_SHIFT);
        let branches = node + 1 + value_length.saturating_sub(1);
        determine_branch(&self.words, header, branches, unit)
    }

    /// Offset of the node reached by `key`, whether or not it holds a value
    pub fn find_units(&self, key: &[u16]) -> Option<usize> {
        key.iter().try_fold(0, |node, &unit| self.step(node, unit))
    }

    pub fn find(&self, key: &str) -> Option<usize> {
        let units: Vec<u16> = key.encode_utf16().collect();
        self.find_units(&units)
    }

    /// Value stored at `node`
    pub fn value_at(&self, node: usize) -> Option<Vec<u16>> {
        let header = *self.words.get(node)?;
        match (header & VALUE_LENGTH) >> VALUE_SHIFT {
            0 => None,
            1 => Some(vec![header & INLINE_VALUE]),
            length => self
                .words
                .get(node + 1..node + usize::from(length))
                .map(<[u16]>::to_vec),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = self.value_at(self.find(key)?)?;
        Some(String::from_utf16_lossy(&value))
    }

    /// Longest prefix of `input` that is a key with a value
    pub fn longest_match(&self, input: &[u16]) -> Option<KeyMatch> {
        let mut node = 0;
        let mut best = None;
        for (index, &unit) in input.iter().enumerate() {
            match self.step(node, unit) {
                Some(next) => node = next,
                None => break,
            }
            if self.value_at(node).is_some() {
                best = Some(KeyMatch {
                    len: index + 1,
                    node,
                });
            }
        }
        best
    }
}
