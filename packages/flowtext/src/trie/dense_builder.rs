//! Builder for dense codepoint tries
//!
//! Values are collected in a flat array covering all of Unicode and then
//! compacted: identical 32-value data blocks and identical 64-entry
//! supplementary index blocks are stored once.

use ahash::AHashMap;

use super::dense::{
    DenseTrie, DATA_BLOCK_LENGTH, DATA_GRANULARITY, INDEX_1_OFFSET, INDEX_2_BLOCK_LENGTH,
    INDEX_2_BMP_LENGTH, INDEX_SHIFT, MAX_CODE_POINT, SHIFT_1,
};
use crate::error::TrieError;

const CODE_POINT_COUNT: usize = MAX_CODE_POINT as usize + 1;
const SUPPLEMENTARY_START: usize = 0x10000;
const INDEX_1_BLOCK: usize = 1 << SHIFT_1;

/// Mutable collection of code point values that compacts into a [`DenseTrie`]
#[derive(Debug, Clone)]
pub struct DenseTrieBuilder {
    values: Vec<u32>,
    error_value: u32,
}

impl DenseTrieBuilder {
    /// Every code point starts out mapped to `initial_value`
    pub fn new(initial_value: u32, error_value: u32) -> Self {
        Self {
            values: vec![initial_value; CODE_POINT_COUNT],
            error_value,
        }
    }

    pub fn set(&mut self, cp: u32, value: u32) -> Result<(), TrieError> {
        let slot = self
            .values
            .get_mut(cp as usize)
            .ok_or(TrieError::InvalidCodePoint(cp))?;
        *slot = value;
        Ok(())
    }

    /// Assign `value` to the inclusive range `start..=end`
    pub fn set_range(&mut self, start: u32, end: u32, value: u32) -> Result<(), TrieError> {
        if start > end || end > MAX_CODE_POINT {
            return Err(TrieError::InvalidRange { start, end });
        }
        self.values[start as usize..=end as usize].fill(value);
        Ok(())
    }

    /// Replace each value in `start..=end` with `update(value)`
    pub fn update_range(
        &mut self,
        start: u32,
        end: u32,
        update: impl Fn(u32) -> u32,
    ) -> Result<(), TrieError> {
        if start > end || end > MAX_CODE_POINT {
            return Err(TrieError::InvalidRange { start, end });
        }
        for value in &mut self.values[start as usize..=end as usize] {
            *value = update(*value);
        }
        Ok(())
    }

    pub fn get(&self, cp: u32) -> u32 {
        self.values
            .get(cp as usize)
            .copied()
            .unwrap_or(self.error_value)
    }

    /// Lowest multiple of 0x800, not below 0x10000, from which every code
    /// point carries the value of U+10FFFF
    fn high_start(&self) -> usize {
        let high_value = self.values[MAX_CODE_POINT as usize];
        let mut high_start = CODE_POINT_COUNT;
        while high_start > SUPPLEMENTARY_START
            && self.values[high_start - INDEX_1_BLOCK..high_start]
                .iter()
                .all(|&value| value == high_value)
        {
            high_start -= INDEX_1_BLOCK;
        }
        high_start
    }

    /// Compact the collected values into an immutable trie
    pub fn build(&self) -> DenseTrie {
        let high_start = self.high_start();
        let high_value = self.values[MAX_CODE_POINT as usize];

        let mut blocks = BlockStore::<DATA_BLOCK_LENGTH>::default();
        let bmp_blocks: Vec<usize> = self.values[..SUPPLEMENTARY_START]
            .chunks_exact(DATA_BLOCK_LENGTH)
            .map(|chunk| blocks.intern(chunk))
            .collect();

        let mut index_2_blocks = BlockStore::<INDEX_2_BLOCK_LENGTH>::default();
        let index_1: Vec<usize> = self.values[SUPPLEMENTARY_START..high_start]
            .chunks_exact(INDEX_1_BLOCK)
            .map(|range| {
                let mut index_2 = [0u32; INDEX_2_BLOCK_LENGTH];
                for (slot, chunk) in index_2
                    .iter_mut()
                    .zip(range.chunks_exact(DATA_BLOCK_LENGTH))
                {
                    *slot = blocks.intern(chunk) as u32;
                }
                index_2_blocks.intern(&index_2)
            })
            .collect();

        let index_2_start = INDEX_1_OFFSET + index_1.len();
        let index_length = index_2_start + index_2_blocks.len() * INDEX_2_BLOCK_LENGTH;
        let data_start = index_length.div_ceil(DATA_GRANULARITY) * DATA_GRANULARITY;
        let data_length = data_start + blocks.len() * DATA_BLOCK_LENGTH + DATA_GRANULARITY;

        let block_entry = |id: usize| ((data_start + id * DATA_BLOCK_LENGTH) >> INDEX_SHIFT) as u32;

        let mut data = vec![0u32; data_length];
        for (slot, &id) in data[..INDEX_2_BMP_LENGTH].iter_mut().zip(&bmp_blocks) {
            *slot = block_entry(id);
        }
        for (slot, &id) in data[INDEX_1_OFFSET..index_2_start]
            .iter_mut()
            .zip(&index_1)
        {
            *slot = (index_2_start + id * INDEX_2_BLOCK_LENGTH) as u32;
        }
        for (id, block) in index_2_blocks.blocks.iter().enumerate() {
            let start = index_2_start + id * INDEX_2_BLOCK_LENGTH;
            for (slot, &data_id) in data[start..start + INDEX_2_BLOCK_LENGTH]
                .iter_mut()
                .zip(block)
            {
                *slot = block_entry(data_id as usize);
            }
        }
        for (id, block) in blocks.blocks.iter().enumerate() {
            let start = data_start + id * DATA_BLOCK_LENGTH;
            data[start..start + DATA_BLOCK_LENGTH].copy_from_slice(block);
        }
        data[data_length - DATA_GRANULARITY..].fill(high_value);

        log::debug!(
            "built dense trie: high_start={:#x}, {} data blocks, {} index blocks, {} words",
            high_start,
            blocks.len(),
            index_2_blocks.len(),
            data_length
        );

        DenseTrie::from_parts(high_start as u32, self.error_value, data)
    }
}

/// Deduplicating store of fixed-size blocks
struct BlockStore<const N: usize> {
    blocks: Vec<[u32; N]>,
    ids: AHashMap<[u32; N], usize>,
}

impl<const N: usize> Default for BlockStore<N> {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            ids: AHashMap::new(),
        }
    }
}

impl<const N: usize> BlockStore<N> {
    fn intern(&mut self, values: &[u32]) -> usize {
        let mut block = [0u32; N];
        block.copy_from_slice(values);
        if let Some(&id) = self.ids.get(&block) {
            return id;
        }
        let id = self.blocks.len();
        self.blocks.push(block);
        self.ids.insert(block, id);
        id
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }
}
