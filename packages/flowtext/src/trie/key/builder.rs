//! Construction and subtree merging for key tries

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Deserialize;

use crate::error::KeyTrieError;

/// Stable identity of a node in the builder arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    pub(crate) value: Option<Vec<u16>>,
    pub(crate) next: BTreeMap<u16, NodeId>,
}

/// Trie over UTF-16 keys, built in memory and then encoded
#[derive(Debug, Clone)]
pub struct KeyTrieBuilder {
    nodes: Vec<Node>,
}

/// One record of a WHATWG `entities.json` table
#[derive(Debug, Deserialize)]
struct EntityRecord {
    characters: String,
}

impl Default for KeyTrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTrieBuilder {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Build a trie from `(key, value)` pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self, KeyTrieError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut builder = Self::new();
        for (key, value) in pairs {
            builder.insert(key.as_ref(), value.as_ref())?;
        }
        Ok(builder)
    }

    /// Build a trie from the WHATWG `entities.json` format, where keys carry a
    /// leading `&` and records hold a `characters` string
    pub fn from_entities_json(json: &str) -> Result<Self, KeyTrieError> {
        let records: BTreeMap<String, EntityRecord> = serde_json::from_str(json)?;
        Self::from_pairs(records.iter().map(|(name, record)| {
            (
                name.strip_prefix('&').unwrap_or(name),
                record.characters.as_str(),
            )
        }))
    }

    /// Map `key` to `value`, replacing any earlier value for the same key
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), KeyTrieError> {
        let units: Vec<u16> = key.encode_utf16().collect();
        self.insert_units(&units, value.encode_utf16().collect())
    }

    pub fn insert_units(&mut self, key: &[u16], value: Vec<u16>) -> Result<(), KeyTrieError> {
        if key.is_empty() {
            return Err(KeyTrieError::EmptyKey);
        }
        if value.is_empty() {
            return Err(KeyTrieError::EmptyValue);
        }

        let mut current = Self::ROOT;
        for &unit in key {
            current = match self.nodes[current.0].next.get(&unit) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len());
                    self.nodes.push(Node::default());
                    self.nodes[current.0].next.insert(unit, child);
                    child
                }
            };
        }
        self.nodes[current.0].value = Some(value);
        Ok(())
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes reachable from the root
    pub fn reachable_nodes(&self) -> usize {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![Self::ROOT];
        let mut count = 0;
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            count += 1;
            stack.extend(self.nodes[id.0].next.values().copied());
        }
        count
    }

    /// Replace structurally identical subtrees with a single shared node.
    ///
    /// Nodes are visited breadth-first from the root; every child equal to an
    /// already visited node is redirected to that node.
    pub fn merge_duplicates(&mut self) {
        let before = self.reachable_nodes();
        let mut visited = vec![Self::ROOT];
        let mut candidates: AHashMap<Signature, Vec<NodeId>> = AHashMap::new();
        candidates
            .entry(self.signature(Self::ROOT))
            .or_default()
            .push(Self::ROOT);

        let mut index = 0;
        while index < visited.len() {
            let parent = visited[index];
            index += 1;

            let edges: Vec<(u16, NodeId)> = self.nodes[parent.0]
                .next
                .iter()
                .map(|(&unit, &child)| (unit, child))
                .collect();

            for (unit, child) in edges {
                let signature = self.signature(child);
                let existing = candidates.get(&signature).and_then(|bucket| {
                    bucket
                        .iter()
                        .copied()
                        .find(|&node| self.structurally_equal(node, child))
                });

                match existing {
                    Some(node) => {
                        self.nodes[parent.0].next.insert(unit, node);
                    }
                    None => {
                        visited.push(child);
                        candidates.entry(signature).or_default().push(child);
                    }
                }
            }
        }

        log::debug!(
            "merged key trie: {} nodes reduced to {}",
            before,
            visited.len()
        );
    }

    fn signature(&self, id: NodeId) -> Signature {
        let node = &self.nodes[id.0];
        Signature {
            value: node.value.clone(),
            units: node.next.keys().copied().collect(),
        }
    }

    fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        let (left, right) = (&self.nodes[a.0], &self.nodes[b.0]);
        left.value == right.value
            && left.next.len() == right.next.len()
            && left
                .next
                .iter()
                .zip(&right.next)
                .all(|((left_unit, &left_child), (right_unit, &right_child))| {
                    left_unit == right_unit && self.structurally_equal(left_child, right_child)
                })
    }
}

/// Shallow shape of a node used to bucket merge candidates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Signature {
    value: Option<Vec<u16>>,
    units: Vec<u16>,
}
