//! Leaf matchers: exact text and anchored patterns.

use regex_automata::{meta, Anchored, Input};
use std::fmt;

use super::state::ParseState;
use crate::diagnostics::MachineError;

/// Length of `text` if the input at the cursor starts with it.
pub(crate) fn match_literal(text: &str, state: &ParseState<'_>) -> Option<usize> {
    state.remaining().starts_with(text).then_some(text.len())
}

/// A regular expression that only ever matches starting at the cursor.
///
/// The anchor applies to the whole pattern, so `a|b` matches either letter at
/// the cursor and nothing further along. Assertions such as `\b` and `$` are
/// evaluated against the full input, not just the tail after the cursor.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: meta::Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, MachineError> {
        let regex = meta::Regex::new(source).map_err(|err| MachineError::InvalidPattern {
            pattern: source.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length of the prefix matched at the cursor, which may be zero.
    pub(crate) fn match_len(&self, state: &ParseState<'_>) -> Option<usize> {
        let input = Input::new(state.input())
            .range(state.pos()..)
            .anchored(Anchored::Yes);
        self.regex.find(input).map(|m| m.end() - state.pos())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len_at(pattern: &str, input: &str, pos: usize) -> Option<usize> {
        Pattern::new(pattern)
            .unwrap()
            .match_len(&ParseState::at(input, pos))
    }

    #[test]
    fn literal_matches_only_at_cursor() {
        assert_eq!(match_literal("cd", &ParseState::at("abcd", 2)), Some(2));
        assert_eq!(match_literal("cd", &ParseState::at("abcd", 1)), None);
        assert_eq!(match_literal("abcde", &ParseState::new("abcd")), None);
    }

    #[test]
    fn pattern_is_anchored_at_cursor() {
        assert_eq!(len_at("b?c+", "bbbbcdab", 3), Some(2));
        assert_eq!(len_at("c+", "bbbbcdab", 0), None);
    }

    #[test]
    fn every_alternative_is_anchored() {
        assert_eq!(len_at("x|b", "abc", 0), None);
        assert_eq!(len_at("x|b", "abc", 1), Some(1));
    }

    #[test]
    fn pattern_may_match_empty_prefix() {
        assert_eq!(len_at("z*", "abc", 0), Some(0));
    }

    #[test]
    fn assertions_see_text_before_cursor() {
        assert_eq!(len_at(r"\bc", "abc", 2), None);
        assert_eq!(len_at(r"\Bc", "abc", 2), Some(1));
        assert_eq!(len_at("$", "abc", 3), Some(0));
    }

    #[test]
    fn invalid_pattern_is_a_construction_error() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, MachineError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }
}
