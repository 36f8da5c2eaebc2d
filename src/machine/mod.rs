//! The combinator runtime.
//!
//! A [`Parser`] is a shared handle to a [`Combinator`] tree. Evaluating it is
//! a pure function of a [`ParseState`]: the same state always produces the
//! same [`Outcome`], nothing is cached and nothing is mutated. That is what
//! lets one compiled grammar serve any number of threads at once.
//!
//! Generated parsers reach this module as `M` and only use the constructor
//! functions below, [`Lazy`] and [`Parser::parse`].
//!
//! ```rust
//! use hera::machine::{self as M, ParseState, Value};
//!
//! let greeting = M::sequence([M::literal("hello"), M::pattern(r"\s+").unwrap(), M::literal("world")]);
//! let result = greeting.parse(&ParseState::new("hello   world")).unwrap();
//! assert_eq!(result.pos, 13);
//! assert_eq!(result.value.as_list().map(|items| items.len()), Some(3));
//! ```

use std::fmt;
use std::sync::Arc;

pub mod state;
pub mod terminal;
pub mod value;

pub use once_cell::sync::Lazy;
pub use state::{Location, Outcome, ParseResult, ParseState};
pub use terminal::Pattern;
pub use value::{Mapping, Value};

use crate::diagnostics::MachineError;

/// A rule function, as written by hand or emitted by the compiler.
pub type RuleFn = fn(&ParseState<'_>) -> Outcome;

/// A value rewrite applied after a successful match. Must not fail.
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

// ============================================================================
// PARSER REPRESENTATION
// ============================================================================

/// Every kind of parser the runtime knows how to evaluate.
pub enum Combinator {
    Literal(String),
    Pattern(Pattern),
    Sequence(Vec<Parser>),
    Choice(Vec<Parser>),
    Option(Parser),
    Assert(Parser),
    Negate(Parser),
    /// `max == 0` means unbounded.
    Quantified {
        parser: Parser,
        min: usize,
        max: usize,
    },
    Text(Parser),
    Transform {
        parser: Parser,
        f: TransformFn,
    },
    Rule(RuleFn),
}

/// Cheaply clonable handle to a combinator tree.
#[derive(Clone)]
pub struct Parser(Arc<Combinator>);

impl Parser {
    pub fn new(combinator: Combinator) -> Self {
        Parser(Arc::new(combinator))
    }

    pub fn combinator(&self) -> &Combinator {
        &self.0
    }

    /// Runs the parser at `state`'s cursor.
    pub fn parse(&self, state: &ParseState<'_>) -> Outcome {
        let start = state.pos();

        match self.combinator() {
            Combinator::Literal(text) => {
                let len = terminal::match_literal(text, state)?;
                Some(ParseResult::span(start, start + len, Value::text(text.as_str())))
            }

            Combinator::Pattern(pattern) => {
                let len = pattern.match_len(state)?;
                let end = start + len;
                Some(ParseResult::span(start, end, Value::text(state.slice_to(end))))
            }

            Combinator::Sequence(parsers) => {
                let mut pos = start;
                let mut values = Vec::with_capacity(parsers.len());
                for parser in parsers {
                    let result = parser.parse(&state.with_pos(pos))?;
                    pos = result.pos;
                    values.push(result.value);
                }
                Some(ParseResult::span(start, pos, Value::List(values)))
            }

            Combinator::Choice(parsers) => parsers.iter().find_map(|parser| parser.parse(state)),

            Combinator::Option(parser) => parser
                .parse(state)
                .or_else(|| Some(ParseResult::empty(start))),

            Combinator::Assert(parser) => parser.parse(state).map(|_| ParseResult::empty(start)),

            Combinator::Negate(parser) => match parser.parse(state) {
                Some(_) => None,
                None => Some(ParseResult::empty(start)),
            },

            Combinator::Quantified { parser, min, max } => {
                let mut pos = start;
                let mut values = Vec::new();
                while *max == 0 || values.len() < *max {
                    let Some(result) = parser.parse(&state.with_pos(pos)) else {
                        break;
                    };
                    // A zero-width success would repeat forever.
                    if result.pos == pos {
                        break;
                    }
                    pos = result.pos;
                    values.push(result.value);
                }
                (values.len() >= *min).then(|| ParseResult::span(start, pos, Value::List(values)))
            }

            Combinator::Text(parser) => {
                let mut result = parser.parse(state)?;
                result.value = Value::text(state.slice_to(result.pos));
                Some(result)
            }

            Combinator::Transform { parser, f } => {
                let mut result = parser.parse(state)?;
                let value = std::mem::take(&mut result.value);
                result.value = f(value);
                Some(result)
            }

            Combinator::Rule(rule) => rule(state),
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.combinator(), f)
    }
}

impl fmt::Debug for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Combinator::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.source()).finish(),
            Combinator::Sequence(parsers) => f.debug_tuple("Sequence").field(parsers).finish(),
            Combinator::Choice(parsers) => f.debug_tuple("Choice").field(parsers).finish(),
            Combinator::Option(parser) => f.debug_tuple("Option").field(parser).finish(),
            Combinator::Assert(parser) => f.debug_tuple("Assert").field(parser).finish(),
            Combinator::Negate(parser) => f.debug_tuple("Negate").field(parser).finish(),
            Combinator::Quantified { parser, min, max } => f
                .debug_struct("Quantified")
                .field("parser", parser)
                .field("min", min)
                .field("max", max)
                .finish(),
            Combinator::Text(parser) => f.debug_tuple("Text").field(parser).finish(),
            Combinator::Transform { parser, .. } => f.debug_tuple("Transform").field(parser).finish(),
            Combinator::Rule(rule) => f.debug_tuple("Rule").field(&(*rule as *const ())).finish(),
        }
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Matches `text` exactly.
pub fn literal(text: impl Into<String>) -> Parser {
    Parser::new(Combinator::Literal(text.into()))
}

/// Matches `source` anchored at the cursor. Fails to build on invalid syntax.
pub fn pattern(source: &str) -> Result<Parser, MachineError> {
    Ok(Parser::new(Combinator::Pattern(Pattern::new(source)?)))
}

pub fn sequence(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::new(Combinator::Sequence(parsers.into_iter().collect()))
}

/// Ordered choice: the first alternative that matches wins.
pub fn choice(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::new(Combinator::Choice(parsers.into_iter().collect()))
}

pub fn option(parser: Parser) -> Parser {
    Parser::new(Combinator::Option(parser))
}

/// Positive lookahead.
pub fn assert(parser: Parser) -> Parser {
    Parser::new(Combinator::Assert(parser))
}

/// Negative lookahead.
pub fn negate(parser: Parser) -> Parser {
    Parser::new(Combinator::Negate(parser))
}

/// Between `min` and `max` repetitions; `max == 0` is unbounded.
pub fn quantified(parser: Parser, min: usize, max: usize) -> Parser {
    Parser::new(Combinator::Quantified { parser, min, max })
}

/// Zero or more.
pub fn repetition(parser: Parser) -> Parser {
    quantified(parser, 0, 0)
}

pub fn one_or_more(parser: Parser) -> Parser {
    quantified(parser, 1, 0)
}

/// Replaces the matched value with the matched text.
pub fn text(parser: Parser) -> Parser {
    Parser::new(Combinator::Text(parser))
}

pub fn transform<F>(parser: Parser, f: F) -> Parser
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Parser::new(Combinator::Transform {
        parser,
        f: Arc::new(f),
    })
}

/// Reshapes the matched value with a structural handler.
pub fn map(parser: Parser, mapping: Mapping) -> Parser {
    transform(parser, move |value| mapping.apply(&value))
}

/// Defers to a rule function; lets rules refer to each other recursively.
pub fn rule(rule: RuleFn) -> Parser {
    Parser::new(Combinator::Rule(rule))
}

// ============================================================================
// ENTRY POINT CHECKS
// ============================================================================

/// Why a whole-input parse was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    NoMatch,
    Incomplete { consumed: usize },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::NoMatch => write!(f, "input did not match"),
            ParseFailure::Incomplete { consumed } => {
                write!(f, "unconsumed input after byte {}", consumed)
            }
        }
    }
}

/// Accepts an outcome only if it consumed all of `input`.
pub fn validate(input: &str, outcome: Outcome) -> Result<Value, ParseFailure> {
    match outcome {
        Some(result) if result.is_complete(input) => Ok(result.value),
        Some(result) => Err(ParseFailure::Incomplete {
            consumed: result.pos,
        }),
        None => Err(ParseFailure::NoMatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(parser: &Parser, input: &str) -> Outcome {
        parser.parse(&ParseState::new(input))
    }

    fn lit(text: &str) -> Parser {
        literal(text)
    }

    #[test]
    fn literal_value_is_matched_text() {
        let result = run(&lit("ab"), "abc").unwrap();
        assert_eq!(result.loc, Location::new(0, 2));
        assert_eq!(result.value, Value::text("ab"));
        assert!(run(&lit("b"), "abc").is_none());
    }

    #[test]
    fn sequence_collects_values_and_fails_as_a_whole() {
        let seq = sequence([lit("a"), lit("b")]);
        let result = run(&seq, "abz").unwrap();
        assert_eq!(result.pos, 2);
        assert_eq!(result.value, Value::List(vec![Value::text("a"), Value::text("b")]));
        assert!(run(&seq, "az").is_none());
    }

    #[test]
    fn empty_sequence_matches_zero_width() {
        let result = run(&sequence(Vec::<Parser>::new()), "x").unwrap();
        assert_eq!(result.loc, Location::new(0, 0));
        assert_eq!(result.value, Value::List(vec![]));
    }

    #[test]
    fn choice_takes_first_success_not_longest() {
        let ch = choice([lit("a"), lit("ab")]);
        assert_eq!(run(&ch, "ab").unwrap().pos, 1);
        assert!(run(&choice(Vec::<Parser>::new()), "ab").is_none());
    }

    #[test]
    fn option_misses_with_zero_width_empty() {
        let result = run(&option(lit("x")), "abc").unwrap();
        assert_eq!(result.pos, 0);
        assert!(result.value.is_empty());
    }

    #[test]
    fn lookaheads_never_consume() {
        let yes = run(&assert(lit("a")), "abc").unwrap();
        assert_eq!((yes.loc.length, yes.pos), (0, 0));
        assert!(run(&assert(lit("b")), "abc").is_none());

        assert!(run(&negate(lit("a")), "abc").is_none());
        let no = run(&negate(lit("b")), "abc").unwrap();
        assert_eq!((no.loc.length, no.pos, no.value), (0, 0, Value::Empty));
    }

    #[test]
    fn quantified_respects_bounds() {
        let two_or_three = quantified(lit("a"), 2, 3);
        assert_eq!(run(&two_or_three, "aaaaa").unwrap().pos, 3);
        assert_eq!(run(&two_or_three, "aab").unwrap().pos, 2);
        assert!(run(&two_or_three, "ab").is_none());
    }

    #[test]
    fn repetition_stops_on_zero_width_success() {
        let star = repetition(option(lit("a")));
        let result = run(&star, "aab").unwrap();
        assert_eq!(result.pos, 2);
        assert_eq!(result.value, Value::List(vec![Value::text("a"), Value::text("a")]));

        let never_advances = repetition(assert(lit("b")));
        let result = run(&never_advances, "b").unwrap();
        assert_eq!(result.pos, 0);
        assert_eq!(result.value, Value::List(vec![]));
    }

    #[test]
    fn one_or_more_requires_an_advancing_match() {
        assert!(run(&one_or_more(lit("b")), "abc").is_none());
        assert!(run(&one_or_more(option(lit("b"))), "abc").is_none());
        assert_eq!(run(&one_or_more(lit("a")), "aab").unwrap().pos, 2);
    }

    #[test]
    fn text_flattens_structure() {
        let parser = text(sequence([lit("a"), repetition(lit("b"))]));
        let result = run(&parser, "abbc").unwrap();
        assert_eq!(result.value, Value::text("abb"));
    }

    #[test]
    fn transform_replaces_value_only() {
        let parser = transform(lit("ab"), |v| Value::List(vec![v]));
        let result = run(&parser, "ab").unwrap();
        assert_eq!(result.loc, Location::new(0, 2));
        assert_eq!(result.value, Value::List(vec![Value::text("ab")]));
    }

    #[test]
    fn map_applies_structural_handler() {
        let parser = map(sequence([lit("a"), lit("b")]), Mapping::list([Mapping::var(2), Mapping::var(1)]));
        let result = run(&parser, "ab").unwrap();
        assert_eq!(result.value, Value::List(vec![Value::text("b"), Value::text("a")]));
    }

    fn digits(state: &ParseState<'_>) -> Outcome {
        static DIGITS: Lazy<Parser> = Lazy::new(|| one_or_more(choice([lit("0"), lit("1")])));
        DIGITS.parse(state)
    }

    fn nested(state: &ParseState<'_>) -> Outcome {
        static NESTED: Lazy<Parser> =
            Lazy::new(|| choice([sequence([lit("("), rule(nested), lit(")")]), rule(digits)]));
        NESTED.parse(state)
    }

    #[test]
    fn rules_may_recurse() {
        assert_eq!(run(&rule(nested), "((101))").unwrap().pos, 7);
        assert!(run(&rule(nested), "((1)").is_none());
    }

    #[test]
    fn validate_requires_complete_input() {
        assert_eq!(validate("ab", run(&lit("ab"), "ab")), Ok(Value::text("ab")));
        assert_eq!(
            validate("abc", run(&lit("ab"), "abc")),
            Err(ParseFailure::Incomplete { consumed: 2 })
        );
        assert_eq!(validate("x", run(&lit("ab"), "x")), Err(ParseFailure::NoMatch));
    }

    #[test]
    fn parsers_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
