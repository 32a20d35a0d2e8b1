//! Unicode character properties and UTF-16 helpers

pub mod properties;
pub mod tables;
pub mod utf16;

pub use properties::{EmojiFlags, GraphemeClass, IndicConjunctBreak, LineBreakClass};
pub use tables::{tables, PropertyBlobs, PropertyTables};
