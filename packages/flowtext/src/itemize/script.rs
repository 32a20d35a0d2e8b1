//! Script runs
//!
//! Common and Inherited code points take the script of the run they appear
//! in. Paired brackets are matched on a stack so a closing bracket resolves
//! to the script of its opening bracket.

use unicode_script::Script;

use super::RunBoundary;
use crate::unicode::utf16::{code_point_at, code_point_len};
use crate::unicode::PropertyTables;

/// Bracket pairs, opening bracket at even indices
const PAIRED_BRACKETS: &[u32] = &[
    0x0028, 0x0029, 0x003C, 0x003E, 0x005B, 0x005D, 0x007B, 0x007D, 0x00AB, 0x00BB, 0x0F3A,
    0x0F3B, 0x0F3C, 0x0F3D, 0x169B, 0x169C, 0x2018, 0x2019, 0x201C, 0x201D, 0x2039, 0x203A,
    0x2045, 0x2046, 0x207D, 0x207E, 0x208D, 0x208E, 0x27E6, 0x27E7, 0x27E8, 0x27E9, 0x27EA,
    0x27EB, 0x27EC, 0x27ED, 0x27EE, 0x27EF, 0x2983, 0x2984, 0x2985, 0x2986, 0x2987, 0x2988,
    0x2989, 0x298A, 0x298B, 0x298C, 0x298D, 0x298E, 0x298F, 0x2990, 0x2991, 0x2992, 0x2993,
    0x2994, 0x2995, 0x2996, 0x2997, 0x2998, 0x29FC, 0x29FD, 0x2E02, 0x2E03, 0x2E04, 0x2E05,
    0x2E09, 0x2E0A, 0x2E0C, 0x2E0D, 0x2E1C, 0x2E1D, 0x2E20, 0x2E21, 0x2E22, 0x2E23, 0x2E24,
    0x2E25, 0x2E26, 0x2E27, 0x2E28, 0x2E29, 0x3008, 0x3009, 0x300A, 0x300B, 0x300C, 0x300D,
    0x300E, 0x300F, 0x3010, 0x3011, 0x3014, 0x3015, 0x3016, 0x3017, 0x3018, 0x3019, 0x301A,
    0x301B, 0xFE59, 0xFE5A, 0xFE5B, 0xFE5C, 0xFE5D, 0xFE5E, 0xFF08, 0xFF09, 0xFF3B, 0xFF3D,
    0xFF5B, 0xFF5D, 0xFF5F, 0xFF60, 0xFF62, 0xFF63,
];

fn pair_index(cp: u32) -> Option<usize> {
    PAIRED_BRACKETS.binary_search(&cp).ok()
}

fn is_real(script: Script) -> bool {
    !matches!(script, Script::Common | Script::Inherited)
}

#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    pair: usize,
    script: Script,
}

/// Script boundaries of UTF-16 text
#[derive(Debug, Clone)]
pub struct ScriptRuns<'a> {
    text: &'a [u16],
    tables: &'a PropertyTables,
    offset: usize,
    brackets: Vec<OpenBracket>,
    /// Brackets below this index already carry a real script
    resolved: usize,
    last: Option<Script>,
    done: bool,
}

impl<'a> ScriptRuns<'a> {
    pub fn new(text: &'a [u16], tables: &'a PropertyTables) -> Self {
        Self {
            text,
            tables,
            offset: 0,
            brackets: Vec::new(),
            resolved: 0,
            last: None,
            done: false,
        }
    }

    fn pop_bracket(&mut self) {
        self.brackets.pop();
        self.resolved = self.resolved.min(self.brackets.len());
    }

    /// Start and script of the next run
    fn next_run(&mut self) -> Option<(usize, Script)> {
        let len = self.text.len();
        let start = self.offset;
        if start >= len {
            return None;
        }

        let mut running = Script::Common;
        while self.offset < len {
            let cp = code_point_at(self.text, self.offset)?;
            let mut script = self.tables.script(cp);

            let pair = if script == Script::Common {
                pair_index(cp)
            } else {
                None
            };
            let closing = pair.is_some_and(|pair| pair % 2 == 1);
            match pair {
                Some(pair) if !closing => self.brackets.push(OpenBracket {
                    pair,
                    script: running,
                }),
                Some(pair) => {
                    let open = pair & !1;
                    while self
                        .brackets
                        .last()
                        .is_some_and(|bracket| bracket.pair != open)
                    {
                        self.pop_bracket();
                    }
                    if let Some(bracket) = self.brackets.last() {
                        script = bracket.script;
                    }
                }
                None => {}
            }

            if is_real(running) && is_real(script) && script != running {
                self.resolved = self.brackets.len();
                return Some((start, running));
            }

            if !is_real(running) && is_real(script) {
                running = script;
                for bracket in &mut self.brackets[self.resolved..] {
                    bracket.script = script;
                }
                self.resolved = self.brackets.len();
            }
            if closing && !self.brackets.is_empty() {
                self.pop_bracket();
            }

            self.offset += code_point_len(self.text, self.offset);
        }

        Some((start, running))
    }
}

impl Iterator for ScriptRuns<'_> {
    type Item = RunBoundary<Script>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some((start, script)) = self.next_run() {
            if self.last != Some(script) {
                self.last = Some(script);
                return Some(RunBoundary::new(start, script));
            }
        }
        self.done = true;
        Some(RunBoundary::new(
            self.text.len(),
            self.last.unwrap_or(Script::Common),
        ))
    }
}
