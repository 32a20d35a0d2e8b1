//! Line break opportunities over UTF-16 text
//!
//! A pair-table implementation of the Unicode line breaking algorithm. Every
//! break is reported at the code unit offset of the first character on the
//! new line. The end of the text is always reported, as a non-required
//! break.

mod pairs;

pub use pairs::{pair_break, PairBreak};

use crate::config::LineBreakOptions;
use crate::unicode::utf16::{code_point_at, code_point_len};
use crate::unicode::{tables, LineBreakClass, PropertyTables};

/// A position where a line may or must end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Break {
    pub position: usize,
    /// Set for breaks after a hard line break character
    pub required: bool,
}

impl Break {
    fn allowed(position: usize) -> Self {
        Self {
            position,
            required: false,
        }
    }

    fn required(position: usize) -> Self {
        Self {
            position,
            required: true,
        }
    }
}

/// Iterator over the break opportunities of a text
#[derive(Debug, Clone)]
pub struct LineBreaker<'t> {
    text: &'t [u16],
    tables: &'t PropertyTables,
    options: LineBreakOptions,
    pos: usize,
    last_pos: usize,
    /// Class before any pending spaces; `None` until the first character
    current: Option<LineBreakClass>,
    upcoming: LineBreakClass,
    after_zwj: bool,
    after_hebrew_letter: bool,
    regional_indicators: u32,
}

/// Break opportunities of `text` using the shared tables
pub fn line_breaks(text: &[u16]) -> LineBreaker<'_> {
    LineBreaker::new(text, tables(), LineBreakOptions::default())
}

impl<'t> LineBreaker<'t> {
    pub fn new(text: &'t [u16], tables: &'t PropertyTables, options: LineBreakOptions) -> Self {
        Self {
            text,
            tables,
            options,
            pos: 0,
            last_pos: 0,
            current: None,
            upcoming: LineBreakClass::XX,
            after_zwj: false,
            after_hebrew_letter: false,
            regional_indicators: 0,
        }
    }

    fn read_class(&mut self) -> LineBreakClass {
        let cp = code_point_at(self.text, self.pos)
            .unwrap_or(u32::from(char::REPLACEMENT_CHARACTER));
        self.pos += code_point_len(self.text, self.pos);
        self.tables.line_break_class(cp).resolve()
    }

    /// Classes settled without the pair table: spaces and hard breaks
    fn simple_break(&mut self) -> Option<bool> {
        use LineBreakClass::*;

        match self.upcoming {
            SP => Some(false),
            BK | LF | NL => {
                self.current = Some(BK);
                Some(false)
            }
            CR => {
                self.current = Some(CR);
                Some(false)
            }
            _ => None,
        }
    }

    fn pair_table_break(&mut self, current: LineBreakClass, last: LineBreakClass) -> bool {
        use LineBreakClass::*;

        let after_space = last == SP;
        let mut should_break = match pair_break(current, self.upcoming) {
            PairBreak::Direct => true,
            PairBreak::Indirect => after_space,
            // the mark joins `current`, which stays the class before it
            PairBreak::CombiningIndirect | PairBreak::CombiningProhibited if !after_space => {
                return false;
            }
            PairBreak::CombiningIndirect => true,
            PairBreak::CombiningProhibited | PairBreak::Prohibited => false,
        };

        // LB8a
        if self.after_zwj {
            should_break = false;
        }

        // LB21a
        if self.after_hebrew_letter && matches!(current, HY | BA) {
            should_break = false;
            self.after_hebrew_letter = false;
        } else {
            self.after_hebrew_letter = current == HL;
        }

        // LB30a
        if current == RI {
            self.regional_indicators += 1;
            if self.regional_indicators == 2 && self.upcoming == RI {
                should_break = true;
                self.regional_indicators = 0;
            }
        } else {
            self.regional_indicators = 0;
        }

        self.current = Some(self.upcoming);
        should_break
    }
}

/// Class that starts a line: line feeds act as mandatory breaks and leading
/// spaces glue to what follows
fn line_start(class: LineBreakClass) -> LineBreakClass {
    match class {
        LineBreakClass::LF | LineBreakClass::NL => LineBreakClass::BK,
        LineBreakClass::SP => LineBreakClass::WJ,
        other => other,
    }
}

impl Iterator for LineBreaker<'_> {
    type Item = Break;

    fn next(&mut self) -> Option<Break> {
        let len = self.text.len();

        if self.current.is_none() {
            if len == 0 {
                return None;
            }
            let first = self.read_class();
            self.current = Some(line_start(first));
            self.upcoming = first;
            self.after_zwj = first == LineBreakClass::ZWJ;
            self.regional_indicators = 0;
        }

        while self.pos < len {
            self.last_pos = self.pos;
            let last = self.upcoming;
            self.upcoming = self.read_class();
            let current = self.current.unwrap_or(LineBreakClass::XX);

            if current == LineBreakClass::BK
                || (current == LineBreakClass::CR && self.upcoming != LineBreakClass::LF)
            {
                self.current = Some(line_start(self.upcoming));
                return Some(Break::required(self.last_pos));
            }

            let should_break = match self.simple_break() {
                Some(should_break) => should_break,
                None => self.pair_table_break(current, last),
            };

            self.after_zwj = self.upcoming == LineBreakClass::ZWJ;

            if should_break && !self.options.hard_breaks_only {
                return Some(Break::allowed(self.last_pos));
            }
        }

        if self.last_pos < len {
            self.last_pos = len;
            log::trace!("line breaks reached end of text at {len}");
            return Some(Break::allowed(len));
        }
        None
    }
}
