//! Hera error types.
//!
//! Two families of failure exist and they never mix:
//!
//! - [`MachineError`] is raised while *building* a parser (an invalid pattern).
//!   It is independent of any input and happens once.
//! - [`CompileError`] is raised by the grammar compiler. A compilation run that
//!   returns one has produced no source text at all.
//!
//! Failing to match input is not an error: combinators report it as `None`.
//!
//! Both types derive `miette::Diagnostic` so the CLI can render them with codes
//! and help text.

use miette::Diagnostic;
use thiserror::Error;

use crate::grammar::NodePath;

/// Construction-time failure of a runtime combinator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MachineError {
    #[error("invalid pattern {pattern:?}: {message}")]
    #[diagnostic(
        code(hera::machine::pattern),
        help("patterns use the syntax of the `regex` crate and are anchored at the cursor")
    )]
    InvalidPattern { pattern: String, message: String },
}

/// Failure of a whole compilation run.
#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error("malformed grammar encoding: {message}")]
    #[diagnostic(
        code(hera::compile::decode),
        help("the grammar must be a JSON object mapping rule names to AST nodes")
    )]
    Decode {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("rule `{name}` is defined more than once")]
    #[diagnostic(code(hera::compile::duplicate_rule))]
    DuplicateRule { name: String },

    #[error("no start rule found in encoded grammar")]
    #[diagnostic(
        code(hera::compile::no_start_rule),
        help("the first key of the top-level object names the start rule")
    )]
    NoStartRule,

    #[error("start rule `{name}` is not defined")]
    #[diagnostic(code(hera::compile::unknown_start_rule))]
    UnknownStartRule { name: String },

    #[error("invalid rule name `{name}`: {reason}")]
    #[diagnostic(code(hera::compile::rule_name))]
    InvalidRuleName { name: String, reason: String },

    #[error("invalid {option} `{value}`: {reason}")]
    #[diagnostic(
        code(hera::compile::invalid_option),
        help("the entry point is a Rust function name and the runtime a `::`-separated module path")
    )]
    InvalidOption {
        option: &'static str,
        value: String,
        reason: String,
    },

    #[error("malformed node at {path}: {message}")]
    #[diagnostic(
        code(hera::compile::malformed_node),
        help("nodes are either a rule name or an array [op, operand, handler?]")
    )]
    MalformedNode { path: NodePath, message: String },

    #[error("unknown operator `{op}` at {path}")]
    #[diagnostic(
        code(hera::compile::unknown_operator),
        help("known operators are S / L R ? + * $ & !")
    )]
    UnknownOperator { path: NodePath, op: String },

    #[error("rule `{name}` referenced at {path} is not defined")]
    #[diagnostic(code(hera::compile::undefined_rule))]
    UndefinedRule { path: NodePath, name: String },

    #[error("invalid pattern at {path}")]
    #[diagnostic(code(hera::compile::invalid_pattern))]
    InvalidPattern {
        path: NodePath,
        #[source]
        source: MachineError,
    },

    #[error("unsupported handler at {path}: {message}")]
    #[diagnostic(
        code(hera::compile::handler),
        help("structural handlers are strings, numbers, booleans, null, arrays and {{\"v\": n}} variables")
    )]
    UnsupportedHandler { path: NodePath, message: String },
}

impl CompileError {
    /// The node path the error points at, when it points at one.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            CompileError::MalformedNode { path, .. }
            | CompileError::UnknownOperator { path, .. }
            | CompileError::UndefinedRule { path, .. }
            | CompileError::InvalidPattern { path, .. }
            | CompileError::UnsupportedHandler { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        CompileError::Decode {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
