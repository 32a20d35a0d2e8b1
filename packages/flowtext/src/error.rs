//! Error handling for table construction and loading

/// Errors raised while building or loading a codepoint trie
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    #[error("Trie blob truncated: expected at least {expected} words, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("Trie blob length {0} is not a multiple of the word size")]
    Misaligned(usize),

    #[error("Invalid high start {0:#x}")]
    InvalidHighStart(u32),

    #[error("Index entry at word {position} points outside the data array")]
    IndexOutOfBounds { position: usize },

    #[error("Invalid code point {0:#x}")]
    InvalidCodePoint(u32),

    #[error("Invalid code point range {start:#x}..={end:#x}")]
    InvalidRange { start: u32, end: u32 },
}

/// Errors raised while building, encoding or loading a key trie
#[derive(Debug, thiserror::Error)]
pub enum KeyTrieError {
    #[error("Keys must contain at least one code unit")]
    EmptyKey,

    #[error("Values must contain at least one code unit")]
    EmptyValue,

    #[error("{field} value {value} exceeds the encodable limit {limit}")]
    Capacity {
        field: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("Encoded key trie is malformed: {0}")]
    Malformed(String),

    #[error("Invalid entity table: {0}")]
    EntityTable(#[from] serde_json::Error),
}

/// Top-level error for the segmentation crate
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("Codepoint trie error: {0}")]
    Trie(#[from] TrieError),

    #[error("Key trie error: {0}")]
    KeyTrie(#[from] KeyTrieError),

    #[error("Property table {table} failed to load: {source}")]
    Table {
        table: &'static str,
        #[source]
        source: TrieError,
    },
}

/// Result type for segmentation table operations
pub type SegmentResult<T> = Result<T, SegmentError>;
