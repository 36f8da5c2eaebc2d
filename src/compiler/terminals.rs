//! Interning of literal and pattern terminals.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    Literal,
    Pattern,
}

/// Symbolic name of an interned terminal: `L{n}` or `R{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalId {
    pub kind: TerminalKind,
    pub index: usize,
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TerminalKind::Literal => write!(f, "L{}", self.index),
            TerminalKind::Pattern => write!(f, "R{}", self.index),
        }
    }
}

/// One ordered, deduplicated list of terminal texts.
#[derive(Debug, Default)]
struct Table {
    entries: Vec<String>,
    index: HashMap<String, usize>,
}

impl Table {
    fn intern(&mut self, text: &str) -> (usize, bool) {
        if let Some(&i) = self.index.get(text) {
            return (i, false);
        }
        let i = self.entries.len();
        self.entries.push(text.to_string());
        self.index.insert(text.to_string(), i);
        (i, true)
    }
}

/// The two terminal tables of one compilation run. Entries are numbered in
/// first-seen order and identical text always maps to the same id.
#[derive(Debug, Default)]
pub struct TerminalTable {
    literals: Table,
    patterns: Table,
}

impl TerminalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning its id and whether it was new.
    pub fn intern(&mut self, kind: TerminalKind, text: &str) -> (TerminalId, bool) {
        let table = match kind {
            TerminalKind::Literal => &mut self.literals,
            TerminalKind::Pattern => &mut self.patterns,
        };
        let (index, fresh) = table.intern(text);
        (TerminalId { kind, index }, fresh)
    }

    pub fn lookup(&self, kind: TerminalKind, text: &str) -> Option<TerminalId> {
        let table = match kind {
            TerminalKind::Literal => &self.literals,
            TerminalKind::Pattern => &self.patterns,
        };
        table.index.get(text).map(|&index| TerminalId { kind, index })
    }

    pub fn literals(&self) -> &[String] {
        &self.literals.entries
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns.entries
    }
}
