//! The grammar compiler: rule sets in, Rust parser source out.
//!
//! Every rule becomes a function built from `machine` combinators. Literal and
//! pattern terminals are interned into two tables for the whole run, so the
//! same text anywhere in the grammar is one `L{n}` or `R{n}` constant.
//!
//! Rules are visited in name order and each rule's tree depth first, which
//! fixes the numbering of terminals for a given rule set.
//!
//! Nothing is emitted unless the whole rule set compiles.
//!
//! ```rust
//! use hera::compiler::compile;
//! use hera::grammar::{Expr, RuleSet};
//!
//! let rules = RuleSet::new().with_rule("R", Expr::Optional(Box::new(Expr::literal("x"))));
//! let source = compile(&rules, "R").unwrap();
//! assert!(source.contains("M::option(L0.clone())"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

pub mod emit;
pub mod terminals;

use crate::diagnostics::CompileError;
use crate::grammar::{decode_rules, find_start_rule, Expr, NodePath, RuleSet};
use crate::machine;
use emit::Emitted;
use terminals::{TerminalId, TerminalKind, TerminalTable};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").expect("identifier regex is valid"));
static TERMINAL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[LR][0-9]+$").expect("terminal name regex is valid"));

/// Names generated code already uses for itself, including the parameters
/// of rule functions and of the entry point.
const RESERVED: &[&str] = &["M", "RULE", "state", "input"];
/// Keywords that cannot be raw identifiers.
const UNUSABLE: &[&str] = &["_", "self", "Self", "super", "crate"];

/// How generated source refers to the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Path of the runtime module, imported as `M`.
    pub runtime_path: String,
    /// Name of the generated whole-input entry function.
    pub entry_point: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            runtime_path: "hera::machine".to_string(),
            entry_point: "parse".to_string(),
        }
    }
}

/// Compiles `rules` with default options.
pub fn compile(rules: &RuleSet, start_rule: &str) -> Result<String, CompileError> {
    Compiler::default().compile(rules, start_rule)
}

/// Compiles a JSON-encoded rule set with default options.
pub fn compile_encoded(bytes: &[u8]) -> Result<String, CompileError> {
    Compiler::default().compile_encoded(bytes)
}

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles `rules`, with `start_rule` behind the entry point.
    pub fn compile(&self, rules: &RuleSet, start_rule: &str) -> Result<String, CompileError> {
        self.check_options()?;
        for name in rules.names() {
            self.check_rule_name(name)?;
        }
        if !rules.contains(start_rule) {
            return Err(CompileError::UnknownStartRule {
                name: start_rule.to_string(),
            });
        }

        let mut run = CompileRun {
            rules,
            terminals: TerminalTable::new(),
        };
        let mut functions = Vec::with_capacity(rules.len());
        for (name, expr) in rules.iter() {
            debug!(rule = name, "compiling rule");
            let body = run.compile_expr(expr, &NodePath::rule(name))?;
            functions.push(emit::rule_function(name, &body));
        }

        debug!(
            rules = rules.len(),
            literals = run.terminals.literals().len(),
            patterns = run.terminals.patterns().len(),
            start_rule,
            "compiled grammar"
        );
        Ok(emit::source(&self.options, start_rule, &run.terminals, &functions))
    }

    /// Compiles an encoded rule set whose first rule is the start rule.
    pub fn compile_encoded(&self, bytes: &[u8]) -> Result<String, CompileError> {
        let start_rule = find_start_rule(bytes).ok_or(CompileError::NoStartRule)?;
        self.compile_encoded_from(bytes, &start_rule)
    }

    /// Compiles an encoded rule set with an explicit start rule.
    pub fn compile_encoded_from(&self, bytes: &[u8], start_rule: &str) -> Result<String, CompileError> {
        let rules = decode_rules(bytes)?;
        self.compile(&rules, start_rule)
    }

    fn check_options(&self) -> Result<(), CompileError> {
        let entry = &self.options.entry_point;
        let reason = if !IDENTIFIER.is_match(entry) {
            Some("must match [_a-zA-Z][_a-zA-Z0-9]*")
        } else if UNUSABLE.contains(&entry.as_str()) {
            Some("cannot be used as a Rust function name")
        } else if RESERVED.contains(&entry.as_str()) || TERMINAL_NAME.is_match(entry) {
            Some("reserved for generated code")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(CompileError::InvalidOption {
                option: "entry point",
                value: entry.clone(),
                reason: reason.to_string(),
            });
        }

        let runtime = &self.options.runtime_path;
        let bad_segment = runtime.split("::").find(|segment| {
            !IDENTIFIER.is_match(segment) || *segment == "_" || emit::is_keyword(segment)
        });
        if let Some(segment) = bad_segment {
            return Err(CompileError::InvalidOption {
                option: "runtime path",
                value: runtime.clone(),
                reason: format!("`{}` is not a path segment", segment),
            });
        }
        Ok(())
    }

    fn check_rule_name(&self, name: &str) -> Result<(), CompileError> {
        let reason = if !IDENTIFIER.is_match(name) {
            "rule names must match [_a-zA-Z][_a-zA-Z0-9]*"
        } else if UNUSABLE.contains(&name) {
            "cannot be used as a Rust function name"
        } else if RESERVED.contains(&name)
            || name == self.options.entry_point
            || TERMINAL_NAME.is_match(name)
        {
            "reserved for generated code"
        } else {
            return Ok(());
        };
        Err(CompileError::InvalidRuleName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// State of one compilation run.
struct CompileRun<'r> {
    rules: &'r RuleSet,
    terminals: TerminalTable,
}

impl CompileRun<'_> {
    fn compile_expr(&mut self, expr: &Expr, path: &NodePath) -> Result<Emitted, CompileError> {
        let emitted = match expr {
            Expr::Rule(name) => {
                if !self.rules.contains(name) {
                    return Err(CompileError::UndefinedRule {
                        path: path.clone(),
                        name: name.clone(),
                    });
                }
                Emitted::Rule(emit::rust_ident(name).into_owned())
            }
            Expr::Sequence(items) => {
                Emitted::Composite(format!("M::sequence([{}])", self.compile_list(items, path)?))
            }
            Expr::Choice(items) => {
                Emitted::Composite(format!("M::choice([{}])", self.compile_list(items, path)?))
            }
            Expr::Literal(text) => Emitted::Terminal(self.intern(TerminalKind::Literal, text, path)?),
            Expr::Pattern(text) => Emitted::Terminal(self.intern(TerminalKind::Pattern, text, path)?),
            Expr::Optional(inner) => self.wrap(inner, path, |p| format!("M::option({})", p))?,
            Expr::OneOrMore(inner) => self.wrap(inner, path, |p| format!("M::quantified({}, 1, 0)", p))?,
            Expr::ZeroOrMore(inner) => self.wrap(inner, path, |p| format!("M::quantified({}, 0, 0)", p))?,
            Expr::Text(inner) => self.wrap(inner, path, |p| format!("M::text({})", p))?,
            Expr::Assert(inner) => self.wrap(inner, path, |p| format!("M::assert({})", p))?,
            Expr::Negate(inner) => self.wrap(inner, path, |p| format!("M::negate({})", p))?,
            Expr::Handled { expr, mapping } => {
                let inner = self.compile_expr(expr, path)?;
                Emitted::Composite(format!(
                    "M::map({}, {})",
                    inner.operand(),
                    emit::mapping(mapping)
                ))
            }
        };
        Ok(emitted)
    }

    fn compile_list(&mut self, items: &[Expr], path: &NodePath) -> Result<String, CompileError> {
        let operands_path = path.child(1);
        let compiled = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.compile_expr(item, &operands_path.child(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(emit::operands(&compiled))
    }

    fn wrap(
        &mut self,
        inner: &Expr,
        path: &NodePath,
        build: impl FnOnce(&str) -> String,
    ) -> Result<Emitted, CompileError> {
        let inner = self.compile_expr(inner, &path.child(1))?;
        Ok(Emitted::Composite(build(&inner.operand())))
    }

    fn intern(&mut self, kind: TerminalKind, text: &str, path: &NodePath) -> Result<TerminalId, CompileError> {
        if kind == TerminalKind::Pattern && self.terminals.lookup(kind, text).is_none() {
            machine::pattern(text).map_err(|source| CompileError::InvalidPattern {
                path: path.child(1),
                source,
            })?;
        }
        let (id, fresh) = self.terminals.intern(kind, text);
        if fresh {
            trace!(%id, text, "interned terminal");
        }
        Ok(id)
    }
}
