//! Cursor, span and result types shared by every combinator.

use serde::Serialize;

use super::value::Value;

/// Immutable view of the input and a cursor into it.
///
/// Positions are byte offsets that always fall on a `char` boundary of
/// `input`. Combinators never mutate a state; they build a new one at the
/// position they want to resume from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ParseState<'a> {
    /// A state anchored at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// A state at `pos`, clamped to the end of `input` and moved back to
    /// the start of the character it falls in.
    pub fn at(input: &'a str, pos: usize) -> Self {
        let mut pos = pos.min(input.len());
        while !input.is_char_boundary(pos) {
            pos -= 1;
        }
        Self { input, pos }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The unparsed tail of the input.
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Same input, another cursor.
    pub fn with_pos(&self, pos: usize) -> Self {
        Self::at(self.input, pos)
    }

    /// Text between this state's cursor and `end`.
    pub(crate) fn slice_to(&self, end: usize) -> &'a str {
        self.input.get(self.pos..end).unwrap_or("")
    }
}

/// The span consumed by a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    pub pos: usize,
    pub length: usize,
}

impl Location {
    pub fn new(pos: usize, length: usize) -> Self {
        Self { pos, length }
    }

    pub fn end(&self) -> usize {
        self.pos + self.length
    }

    pub fn is_zero_width(&self) -> bool {
        self.length == 0
    }
}

/// A successful match: where it was found, where parsing resumes, and what
/// it produced. `pos` always equals `loc.end()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub loc: Location,
    pub pos: usize,
    pub value: Value,
}

impl ParseResult {
    /// A result spanning `start..end`.
    pub fn span(start: usize, end: usize, value: Value) -> Self {
        debug_assert!(end >= start, "negative advance {start}..{end}");
        Self {
            loc: Location::new(start, end - start),
            pos: end,
            value,
        }
    }

    /// A zero-width result at `pos` carrying no value.
    pub fn empty(pos: usize) -> Self {
        Self::span(pos, pos, Value::Empty)
    }

    /// Whether the match consumed all of `input`.
    pub fn is_complete(&self, input: &str) -> bool {
        self.pos == input.len()
    }
}

/// `Some` when the parser matched, `None` when it did not.
pub type Outcome = Option<ParseResult>;
