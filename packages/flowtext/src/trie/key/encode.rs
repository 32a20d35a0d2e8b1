//! Serialization of key tries into 16-bit words
//!
//! Each node picks the smallest fitting branch encoding: a single inline
//! character, a jump table indexed by `unit - min`, or a sorted dictionary
//! searched with binary search.

use ahash::AHashMap;

use super::builder::{KeyTrieBuilder, Node, NodeId};
use super::decode::{BRANCH_SHIFT, INLINE_VALUE, JUMP_TABLE, VALUE_SHIFT};
use super::KeyTrie;
use crate::config::KeyTrieOptions;
use crate::error::KeyTrieError;

const MAX_BRANCHES: usize = (0x3F80 >> BRANCH_SHIFT) as usize;
const MAX_VALUE_UNITS: usize = 2;

/// Encode the trie rooted at [`KeyTrieBuilder::ROOT`].
///
/// Run [`KeyTrieBuilder::merge_duplicates`] first to share identical subtrees.
/// Any field that does not fit its bit width fails the whole encoding.
pub fn encode(builder: &KeyTrieBuilder, options: &KeyTrieOptions) -> Result<KeyTrie, KeyTrieError> {
    let mut encoder = Encoder {
        builder,
        options,
        words: Vec::new(),
        offsets: AHashMap::new(),
    };
    encoder.encode_node(KeyTrieBuilder::ROOT)?;

    let words = encoder
        .words
        .iter()
        .map(|&word| {
            u16::try_from(word).map_err(|_| KeyTrieError::Capacity {
                field: "word",
                value: word as usize,
                limit: u16::MAX as usize,
            })
        })
        .collect::<Result<Vec<u16>, _>>()?;

    log::debug!(
        "encoded key trie: {} nodes in {} words",
        encoder.offsets.len(),
        words.len()
    );
    KeyTrie::from_words(words)
}

struct Encoder<'a> {
    builder: &'a KeyTrieBuilder,
    options: &'a KeyTrieOptions,
    words: Vec<u32>,
    offsets: AHashMap<NodeId, usize>,
}

impl<'a> Encoder<'a> {
    fn encode_node(&mut self, id: NodeId) -> Result<usize, KeyTrieError> {
        if let Some(&offset) = self.offsets.get(&id) {
            return Ok(offset);
        }

        let start = self.words.len();
        self.offsets.insert(id, start);

        let builder = self.builder;
        let node = builder.node(id);
        self.words.push(0);
        let header = self.encode_value(node)?;
        self.words[start] = header;

        let branches: Vec<(u16, NodeId)> =
            node.next.iter().map(|(&unit, &child)| (unit, child)).collect();

        match branches.as_slice() {
            [] => {}
            &[(unit, child)]
                if (1..=JUMP_TABLE).contains(&unit) && !self.offsets.contains_key(&child) =>
            {
                self.words[start] |= u32::from(unit);
                self.encode_node(child)?;
            }
            _ => self.encode_branches(start, &branches)?,
        }

        Ok(start)
    }

    fn encode_value(&mut self, node: &Node) -> Result<u32, KeyTrieError> {
        let Some(value) = &node.value else {
            return Ok(0);
        };

        if let [unit] = value.as_slice() {
            if node.next.is_empty() && *unit <= INLINE_VALUE {
                return Ok((1 << VALUE_SHIFT) | u32::from(*unit));
            }
        }

        if value.len() > MAX_VALUE_UNITS {
            return Err(KeyTrieError::Capacity {
                field: "value length",
                value: value.len(),
                limit: MAX_VALUE_UNITS,
            });
        }

        self.words.extend(value.iter().map(|&unit| u32::from(unit)));
        Ok(((value.len() as u32) + 1) << VALUE_SHIFT)
    }

    /// `branches` are sorted by unit
    fn encode_branches(
        &mut self,
        start: usize,
        branches: &[(u16, NodeId)],
    ) -> Result<(), KeyTrieError> {
        let first = usize::from(branches[0].0);
        let last = usize::from(branches[branches.len() - 1].0);
        let table_length = last - first + 1;
        let overhead = table_length as f64 / branches.len() as f64;

        if overhead <= self.options.max_jump_table_overhead
            && (1..=usize::from(JUMP_TABLE)).contains(&first)
            && table_length <= MAX_BRANCHES
        {
            self.words[start] |= ((table_length << BRANCH_SHIFT) | first) as u32;
            let table = self.words.len();
            self.words.resize(table + table_length, 0);
            for &(unit, child) in branches {
                let offset = self.encode_node(child)?;
                self.words[table + usize::from(unit) - first] = checked_offset(offset + 1)?;
            }
            return Ok(());
        }

        if branches.len() > MAX_BRANCHES {
            return Err(KeyTrieError::Capacity {
                field: "branch count",
                value: branches.len(),
                limit: MAX_BRANCHES,
            });
        }

        self.words[start] |= (branches.len() << BRANCH_SHIFT) as u32;
        self.words
            .extend(branches.iter().map(|&(unit, _)| u32::from(unit)));
        let destinations = self.words.len();
        self.words.resize(destinations + branches.len(), 0);
        for (index, &(_, child)) in branches.iter().enumerate() {
            let offset = self.encode_node(child)?;
            self.words[destinations + index] = checked_offset(offset)?;
        }
        Ok(())
    }
}

fn checked_offset(offset: usize) -> Result<u32, KeyTrieError> {
    if offset > usize::from(u16::MAX) {
        return Err(KeyTrieError::Capacity {
            field: "node offset",
            value: offset,
            limit: usize::from(u16::MAX),
        });
    }
    Ok(offset as u32)
}
