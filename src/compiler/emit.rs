//! Rust source text for compiled grammars.
//!
//! Layout of a generated file:
//!
//! ```text
//! banner + #![allow(..)]
//! use <runtime> as M;
//! pub fn parse(input: &str) -> M::Outcome        entry point
//! static L0.. / static R0..                       terminal table
//! pub fn Rule(state: &M::ParseState<'_>) -> ..    one per rule, name order
//! ```

use std::borrow::Cow;
use std::fmt::Write;

use super::terminals::{TerminalId, TerminalTable};
use super::CompileOptions;
use crate::machine::Mapping;

const BANNER: &str = "// Generated by hera. Do not edit.";
const ALLOW: &str = "#![allow(non_snake_case, non_upper_case_globals, dead_code)]";
const PATTERN_CHECKED: &str = "pattern checked by hera";

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Compiled form of one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// A terminal constant such as `L0`.
    Terminal(TerminalId),
    /// A rule function, already a valid Rust identifier.
    Rule(String),
    /// An expression building a new `M::Parser`.
    Composite(String),
}

impl Emitted {
    /// The expression as a `M::Parser` argument to another combinator.
    pub fn operand(&self) -> Cow<'_, str> {
        match self {
            Emitted::Terminal(id) => Cow::Owned(format!("{}.clone()", id)),
            Emitted::Rule(ident) => Cow::Owned(format!("M::rule({})", ident)),
            Emitted::Composite(code) => Cow::Borrowed(code),
        }
    }
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// `name` as a Rust identifier, raw when it collides with a keyword.
pub fn rust_ident(name: &str) -> Cow<'_, str> {
    if is_keyword(name) {
        Cow::Owned(format!("r#{}", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Rust expression constructing `mapping`.
pub fn mapping(mapping: &Mapping) -> String {
    match mapping {
        Mapping::Empty => "M::Mapping::Empty".to_string(),
        Mapping::Variable(n) => format!("M::Mapping::var({})", n),
        Mapping::Text(text) => format!("M::Mapping::text({:?})", text),
        Mapping::List(items) => {
            let items: Vec<String> = items.iter().map(self::mapping).collect();
            format!("M::Mapping::List(vec![{}])", items.join(", "))
        }
    }
}

/// Joins combinator operands into an argument list.
pub fn operands(items: &[Emitted]) -> String {
    items
        .iter()
        .map(|item| item.operand().into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One rule function.
pub fn rule_function(name: &str, body: &Emitted) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "pub fn {}(state: &M::ParseState<'_>) -> M::Outcome {{",
        rust_ident(name)
    );
    match body {
        Emitted::Terminal(id) => {
            let _ = writeln!(out, "    {}.parse(state)", id);
        }
        Emitted::Rule(ident) => {
            let _ = writeln!(out, "    {}(state)", ident);
        }
        Emitted::Composite(code) => {
            let _ = writeln!(
                out,
                "    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| {});",
                code
            );
            let _ = writeln!(out, "    RULE.parse(state)");
        }
    }
    out.push_str("}\n");
    out
}

/// The complete generated file.
pub fn source(
    options: &CompileOptions,
    start_rule: &str,
    terminals: &TerminalTable,
    functions: &[String],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "{}", ALLOW);
    let _ = writeln!(out);
    let _ = writeln!(out, "use {} as M;", options.runtime_path);
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Parses `input` from its start with rule `{}`.", start_rule);
    let _ = writeln!(out, "pub fn {}(input: &str) -> M::Outcome {{", rust_ident(&options.entry_point));
    let _ = writeln!(out, "    {}(&M::ParseState::new(input))", rust_ident(start_rule));
    let _ = writeln!(out, "}}");

    if !terminals.literals().is_empty() {
        let _ = writeln!(out);
        for (i, text) in terminals.literals().iter().enumerate() {
            let _ = writeln!(
                out,
                "static L{}: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal({:?}));",
                i, text
            );
        }
    }

    if !terminals.patterns().is_empty() {
        let _ = writeln!(out);
        for (i, text) in terminals.patterns().iter().enumerate() {
            let _ = writeln!(
                out,
                "static R{}: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern({:?}).expect({:?}));",
                i, text, PATTERN_CHECKED
            );
        }
    }

    for function in functions {
        let _ = writeln!(out);
        out.push_str(function);
    }
    out
}
