//! Run itemization
//!
//! Each itemizer yields [`RunBoundary`] events: one at the start of every
//! maximal run carrying the run's value, then a terminal event at the text
//! length repeating the last value. Empty text yields only the terminal event.
//! [`Itemizer`] merges the level, emoji and script streams and hard line
//! breaks into shaping runs.

pub mod emoji;
pub mod levels;
pub mod newline;
pub mod script;

use std::ops::Range;

use unicode_script::Script;

pub use emoji::{scan_emoji, EmojiCategory, EmojiRuns};
pub use levels::{BidiEngine, BidiLevelRuns, LevelRuns, UnicodeBidiEngine};
pub use newline::NewlineBreaks;
pub use script::ScriptRuns;

use crate::config::ItemizeOptions;
use crate::unicode::{tables, PropertyTables};

/// Start of a run, or the end of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBoundary<T> {
    pub offset: usize,
    pub value: T,
}

impl<T> RunBoundary<T> {
    pub fn new(offset: usize, value: T) -> Self {
        Self { offset, value }
    }
}

/// Emits a boundary whenever the per-unit value changes
#[derive(Debug, Clone)]
pub struct ValueRuns<I, T> {
    values: I,
    offset: usize,
    last: Option<T>,
    initial: T,
    done: bool,
}

impl<I, T> ValueRuns<I, T>
where
    I: Iterator<Item = T>,
    T: Copy + PartialEq,
{
    /// `initial` is reported for empty input
    pub fn new(values: I, initial: T) -> Self {
        Self {
            values,
            offset: 0,
            last: None,
            initial,
            done: false,
        }
    }
}

impl<I, T> Iterator for ValueRuns<I, T>
where
    I: Iterator<Item = T>,
    T: Copy + PartialEq,
{
    type Item = RunBoundary<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for value in self.values.by_ref() {
            let at = self.offset;
            self.offset += 1;
            if self.last != Some(value) {
                self.last = Some(value);
                return Some(RunBoundary::new(at, value));
            }
        }
        self.done = true;
        Some(RunBoundary::new(
            self.offset,
            self.last.unwrap_or(self.initial),
        ))
    }
}

/// A range sharing one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<T> {
    pub range: Range<usize>,
    pub value: T,
}

/// Turns a boundary stream into the runs between consecutive boundaries
#[derive(Debug, Clone)]
pub struct Runs<I, T> {
    boundaries: I,
    pending: Option<RunBoundary<T>>,
}

impl<I, T> Runs<I, T>
where
    I: Iterator<Item = RunBoundary<T>>,
{
    pub fn new(boundaries: I) -> Self {
        Self {
            boundaries,
            pending: None,
        }
    }
}

impl<I, T> Iterator for Runs<I, T>
where
    I: Iterator<Item = RunBoundary<T>>,
{
    type Item = Run<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = match self.pending.take() {
            Some(boundary) => boundary,
            None => self.boundaries.next()?,
        };
        let end = self.boundaries.next()?;
        let run = Run {
            range: start.offset..end.offset,
            value: start.value,
        };
        self.pending = Some(end);
        Some(run)
    }
}

/// Attributes shared by every code unit of a shaping run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapingAttrs {
    pub level: u8,
    pub is_emoji: bool,
    pub script: Script,
}

/// A range of text that can be shaped in one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemizedRun {
    pub range: Range<usize>,
    pub attrs: ShapingAttrs,
}

/// Current run of one boundary stream
struct Cursor<I, T> {
    runs: Runs<I, T>,
    current: Option<Run<T>>,
}

impl<I, T> Cursor<I, T>
where
    I: Iterator<Item = RunBoundary<T>>,
    T: Copy,
{
    fn new(boundaries: I) -> Self {
        Self {
            runs: Runs::new(boundaries),
            current: None,
        }
    }

    /// Run covering `offset`
    fn at(&mut self, offset: usize) -> Option<&Run<T>> {
        while self
            .current
            .as_ref()
            .is_none_or(|run| run.range.end <= offset)
        {
            self.current = Some(self.runs.next()?);
        }
        self.current.as_ref()
    }
}

/// Merges level, emoji and script runs and hard line breaks
pub struct Itemizer<'a, E: BidiEngine> {
    text: &'a [u16],
    options: ItemizeOptions,
    levels: Cursor<BidiLevelRuns<'a, E>, u8>,
    emoji: Cursor<EmojiRuns, bool>,
    scripts: Cursor<ScriptRuns<'a>, Script>,
    newlines: NewlineBreaks<'a>,
    next_newline: usize,
    offset: usize,
}

impl<'a, E: BidiEngine> Itemizer<'a, E> {
    pub fn new(
        text: &'a [u16],
        tables: &'a PropertyTables,
        engine: &'a E,
        options: ItemizeOptions,
    ) -> Self {
        Self {
            text,
            options,
            levels: Cursor::new(BidiLevelRuns::new(text, engine, options.base_level)),
            emoji: Cursor::new(EmojiRuns::new(text, tables)),
            scripts: Cursor::new(ScriptRuns::new(text, tables)),
            newlines: NewlineBreaks::new(text),
            next_newline: 0,
            offset: 0,
        }
    }

    /// First hard line break after the current offset
    fn newline_boundary(&mut self) -> usize {
        let len = self.text.len();
        if !self.options.split_at_newlines {
            return len;
        }
        while self.next_newline <= self.offset {
            match self.newlines.next() {
                Some(boundary) => self.next_newline = boundary,
                None => return len,
            }
        }
        self.next_newline
    }
}

impl<E: BidiEngine> Iterator for Itemizer<'_, E> {
    type Item = ItemizedRun;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.offset;
        let len = self.text.len();
        if start >= len {
            return None;
        }

        let mut end = self.newline_boundary().min(len);
        let mut attrs = ShapingAttrs {
            level: self.options.base_level,
            is_emoji: false,
            script: Script::Common,
        };

        if let Some(run) = self.levels.at(start) {
            end = end.min(run.range.end);
            attrs.level = run.value;
        }
        if let Some(run) = self.emoji.at(start) {
            end = end.min(run.range.end);
            attrs.is_emoji = run.value;
        }
        if let Some(run) = self.scripts.at(start) {
            end = end.min(run.range.end);
            attrs.script = run.value;
        }

        self.offset = end;
        Some(ItemizedRun {
            range: start..end,
            attrs,
        })
    }
}

/// Itemize with the shared tables, the `unicode-bidi` engine and default
/// options
pub fn itemize(text: &[u16]) -> Vec<ItemizedRun> {
    let engine = UnicodeBidiEngine;
    Itemizer::new(text, tables(), &engine, ItemizeOptions::default()).collect()
}
