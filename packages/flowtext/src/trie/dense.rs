//! Two-level dense codepoint trie
//!
//! Maps every Unicode scalar value to a 32-bit class value in constant time.
//! The layout is a BMP index addressed directly by `cp >> 5`, an index-1
//! table for supplementary code points below `high_start`, 64-entry index-2
//! blocks, 32-entry data blocks and a trailing granule holding the value
//! shared by every code point at or above `high_start`.

use crate::error::TrieError;

/// Shift to get the index-1 slot of a supplementary code point
pub(crate) const SHIFT_1: u32 = 11;
/// Shift to get the index-2 slot of a code point
pub(crate) const SHIFT_2: u32 = 5;
/// Index entries store data offsets shifted right by this amount
pub(crate) const INDEX_SHIFT: u32 = 2;
/// Number of index-2 entries covering the BMP
pub(crate) const INDEX_2_BMP_LENGTH: usize = 0x10000 >> SHIFT_2;
/// Start of the index-1 table
pub(crate) const INDEX_1_OFFSET: usize = INDEX_2_BMP_LENGTH;
/// Index-1 entries that would cover the BMP and are left out
pub(crate) const OMITTED_BMP_INDEX_1_LENGTH: usize = 0x10000 >> SHIFT_1;
/// Entries in one index-2 block
pub(crate) const INDEX_2_BLOCK_LENGTH: usize = 1 << (SHIFT_1 - SHIFT_2);
pub(crate) const INDEX_2_MASK: u32 = INDEX_2_BLOCK_LENGTH as u32 - 1;
/// Values in one data block
pub(crate) const DATA_BLOCK_LENGTH: usize = 1 << SHIFT_2;
pub(crate) const DATA_MASK: u32 = DATA_BLOCK_LENGTH as u32 - 1;
/// Data blocks start on multiples of this many words
pub(crate) const DATA_GRANULARITY: usize = 1 << INDEX_SHIFT;
/// Words in front of the data array in a serialized blob
const HEADER_LENGTH: usize = 2;

pub(crate) const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Immutable dense lookup table from code point to class value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseTrie {
    high_start: u32,
    error_value: u32,
    data: Vec<u32>,
}

impl DenseTrie {
    /// Create a trie from its parts, validating every index entry so that
    /// later lookups cannot leave the data array.
    pub fn new(high_start: u32, error_value: u32, data: Vec<u32>) -> Result<Self, TrieError> {
        if high_start < 0x10000
            || high_start > MAX_CODE_POINT + 1
            || high_start & ((1 << SHIFT_1) - 1) != 0
        {
            return Err(TrieError::InvalidHighStart(high_start));
        }

        let index_1_length = (high_start >> SHIFT_1) as usize - OMITTED_BMP_INDEX_1_LENGTH;
        let minimum = INDEX_1_OFFSET + index_1_length + DATA_GRANULARITY;
        if data.len() < minimum {
            return Err(TrieError::Truncated {
                expected: minimum + HEADER_LENGTH,
                found: data.len() + HEADER_LENGTH,
            });
        }

        let data_block_fits =
            |entry: u32| ((entry as usize) << INDEX_SHIFT) + DATA_BLOCK_LENGTH <= data.len();

        for (position, &entry) in data[..INDEX_2_BMP_LENGTH].iter().enumerate() {
            if !data_block_fits(entry) {
                return Err(TrieError::IndexOutOfBounds { position });
            }
        }

        for slot in 0..index_1_length {
            let position = INDEX_1_OFFSET + slot;
            let block = data[position] as usize;
            if block + INDEX_2_BLOCK_LENGTH > data.len() {
                return Err(TrieError::IndexOutOfBounds { position });
            }
            for (offset, &entry) in data[block..block + INDEX_2_BLOCK_LENGTH].iter().enumerate() {
                if !data_block_fits(entry) {
                    return Err(TrieError::IndexOutOfBounds {
                        position: block + offset,
                    });
                }
            }
        }

        Ok(Self {
            high_start,
            error_value,
            data,
        })
    }

    /// Assemble a trie whose layout is already known to be consistent
    pub(crate) fn from_parts(high_start: u32, error_value: u32, data: Vec<u32>) -> Self {
        debug_assert!(Self::new(high_start, error_value, data.clone()).is_ok());
        Self {
            high_start,
            error_value,
            data,
        }
    }

    /// Load a trie from `[high_start, error_value, data...]` words
    pub fn from_words(words: &[u32]) -> Result<Self, TrieError> {
        if words.len() < HEADER_LENGTH {
            return Err(TrieError::Truncated {
                expected: HEADER_LENGTH,
                found: words.len(),
            });
        }
        Self::new(words[0], words[1], words[HEADER_LENGTH..].to_vec())
    }

    /// Load a trie from a little-endian blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TrieError> {
        if bytes.len() % 4 != 0 {
            return Err(TrieError::Misaligned(bytes.len()));
        }
        let words: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Self::from_words(&words)
    }

    pub fn to_words(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(self.data.len() + HEADER_LENGTH);
        words.push(self.high_start);
        words.push(self.error_value);
        words.extend_from_slice(&self.data);
        words
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_words()
            .into_iter()
            .flat_map(u32::to_le_bytes)
            .collect()
    }

    /// Look up the value for a code point.
    ///
    /// Code points above U+10FFFF return the error value.
    #[inline]
    pub fn get(&self, cp: u32) -> u32 {
        if cp > MAX_CODE_POINT {
            return self.error_value;
        }

        if cp <= 0xFFFF {
            let block = self.data[(cp >> SHIFT_2) as usize];
            return self.data[((block << INDEX_SHIFT) + (cp & DATA_MASK)) as usize];
        }

        if cp < self.high_start {
            let index_2 = self.data
                [INDEX_1_OFFSET - OMITTED_BMP_INDEX_1_LENGTH + (cp >> SHIFT_1) as usize];
            let block = self.data[(index_2 + ((cp >> SHIFT_2) & INDEX_2_MASK)) as usize];
            return self.data[((block << INDEX_SHIFT) + (cp & DATA_MASK)) as usize];
        }

        self.data[self.data.len() - DATA_GRANULARITY]
    }

    #[inline]
    pub fn get_char(&self, ch: char) -> u32 {
        self.get(ch as u32)
    }

    /// First code point of the uniform tail
    pub fn high_start(&self) -> u32 {
        self.high_start
    }

    pub fn error_value(&self) -> u32 {
        self.error_value
    }

    /// Size of the data array in words
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::DenseTrieBuilder;

    fn sample() -> DenseTrie {
        let mut builder = DenseTrieBuilder::new(0, 99);
        builder.set_range(0x41, 0x5A, 1).unwrap();
        builder.set(0x1F600, 7).unwrap();
        builder.build()
    }

    #[test]
    fn out_of_range_returns_error_value() {
        let trie = sample();
        assert_eq!(trie.get(0x110000), 99);
        assert_eq!(trie.get(u32::MAX), 99);
    }

    #[test]
    fn words_round_trip_through_bytes() {
        let trie = sample();
        let loaded = DenseTrie::from_bytes(&trie.to_bytes()).unwrap();
        assert_eq!(loaded, trie);
        assert_eq!(loaded.get('A' as u32), 1);
        assert_eq!(loaded.get(0x1F600), 7);
    }

    #[test]
    fn rejects_truncated_and_misaligned_blobs() {
        let bytes = sample().to_bytes();
        assert_eq!(
            DenseTrie::from_bytes(&bytes[..bytes.len() - 1]),
            Err(TrieError::Misaligned(bytes.len() - 1))
        );
        assert!(matches!(
            DenseTrie::from_words(&[0x10000]),
            Err(TrieError::Truncated { .. })
        ));
        assert!(matches!(
            DenseTrie::from_bytes(&bytes[..4096]),
            Err(TrieError::Truncated { .. })
        ));
    }

    #[test]
    fn rejects_corrupt_index_entries() {
        let mut words = sample().to_words();
        words[2] = u32::MAX >> 4;
        assert_eq!(
            DenseTrie::from_words(&words),
            Err(TrieError::IndexOutOfBounds { position: 0 })
        );

        let mut words = sample().to_words();
        words[0] = 0x10001;
        assert_eq!(
            DenseTrie::from_words(&words),
            Err(TrieError::InvalidHighStart(0x10001))
        );
    }
}
