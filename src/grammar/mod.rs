//! The grammar AST consumed by the compiler.
//!
//! A grammar is a [`RuleSet`]: rule names mapped to one [`Expr`] each. Rules
//! refer to each other only by name. Iteration is always in name order, which
//! makes everything derived from a rule set (terminal numbering, emitted
//! source) reproducible.

use std::collections::BTreeMap;
use std::fmt;

use crate::machine::Mapping;

pub mod decode;

pub use decode::{decode_rules, find_start_rule};

// ============================================================================
// OPERATORS
// ============================================================================

/// The closed set of operator tags used by the encoded AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Sequence,
    Choice,
    Literal,
    Pattern,
    Optional,
    OneOrMore,
    ZeroOrMore,
    Text,
    Assert,
    Negate,
}

impl Op {
    pub const ALL: [Op; 10] = [
        Op::Sequence,
        Op::Choice,
        Op::Literal,
        Op::Pattern,
        Op::Optional,
        Op::OneOrMore,
        Op::ZeroOrMore,
        Op::Text,
        Op::Assert,
        Op::Negate,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Op::Sequence => "S",
            Op::Choice => "/",
            Op::Literal => "L",
            Op::Pattern => "R",
            Op::Optional => "?",
            Op::OneOrMore => "+",
            Op::ZeroOrMore => "*",
            Op::Text => "$",
            Op::Assert => "&",
            Op::Negate => "!",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.tag() == tag)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

/// One node of a rule's expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Reference to another rule by name.
    Rule(String),
    Sequence(Vec<Expr>),
    Choice(Vec<Expr>),
    Literal(String),
    Pattern(String),
    Optional(Box<Expr>),
    OneOrMore(Box<Expr>),
    ZeroOrMore(Box<Expr>),
    Text(Box<Expr>),
    Assert(Box<Expr>),
    Negate(Box<Expr>),
    /// A node whose value is reshaped by a structural handler.
    Handled { expr: Box<Expr>, mapping: Mapping },
}

impl Expr {
    pub fn rule(name: impl Into<String>) -> Self {
        Expr::Rule(name.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn pattern(text: impl Into<String>) -> Self {
        Expr::Pattern(text.into())
    }

    pub fn sequence(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Sequence(items.into_iter().collect())
    }

    pub fn choice(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Choice(items.into_iter().collect())
    }

    /// Wraps `inner` with a unary operator; `None` if `op` takes no single
    /// operand.
    pub fn unary(op: Op, inner: Expr) -> Option<Self> {
        let inner = Box::new(inner);
        let expr = match op {
            Op::Optional => Expr::Optional(inner),
            Op::OneOrMore => Expr::OneOrMore(inner),
            Op::ZeroOrMore => Expr::ZeroOrMore(inner),
            Op::Text => Expr::Text(inner),
            Op::Assert => Expr::Assert(inner),
            Op::Negate => Expr::Negate(inner),
            Op::Sequence | Op::Choice | Op::Literal | Op::Pattern => return None,
        };
        Some(expr)
    }

    pub fn handled(self, mapping: Mapping) -> Self {
        Expr::Handled {
            expr: Box::new(self),
            mapping,
        }
    }

    /// The operator of a tagged node; `None` for a rule reference.
    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Rule(_) => None,
            Expr::Sequence(_) => Some(Op::Sequence),
            Expr::Choice(_) => Some(Op::Choice),
            Expr::Literal(_) => Some(Op::Literal),
            Expr::Pattern(_) => Some(Op::Pattern),
            Expr::Optional(_) => Some(Op::Optional),
            Expr::OneOrMore(_) => Some(Op::OneOrMore),
            Expr::ZeroOrMore(_) => Some(Op::ZeroOrMore),
            Expr::Text(_) => Some(Op::Text),
            Expr::Assert(_) => Some(Op::Assert),
            Expr::Negate(_) => Some(Op::Negate),
            Expr::Handled { expr, .. } => expr.op(),
        }
    }
}

// ============================================================================
// RULE SETS
// ============================================================================

/// Rule name to expression, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: BTreeMap<String, Expr>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, returning the expression it replaced.
    pub fn insert(&mut self, name: impl Into<String>, expr: Expr) -> Option<Expr> {
        self.rules.insert(name.into(), expr)
    }

    /// Builder form of [`RuleSet::insert`].
    pub fn with_rule(mut self, name: impl Into<String>, expr: Expr) -> Self {
        self.insert(name, expr);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.rules.iter().map(|(name, expr)| (name.as_str(), expr))
    }
}

impl<N: Into<String>> FromIterator<(N, Expr)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (N, Expr)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(name, expr)| (name.into(), expr)).collect(),
        }
    }
}

// ============================================================================
// NODE PATHS
// ============================================================================

/// Location of a node inside an encoded rule set, shown as a JSON pointer:
/// `/Top/1/0` is element 0 of element 1 of rule `Top`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    rule: String,
    steps: Vec<usize>,
}

impl NodePath {
    pub fn rule(name: impl Into<String>) -> Self {
        Self {
            rule: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn child(&self, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(index);
        Self {
            rule: self.rule.clone(),
            steps,
        }
    }

    pub fn rule_name(&self) -> &str {
        &self.rule
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.rule.replace('~', "~0").replace('/', "~1"))?;
        for step in &self.steps {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for op in Op::ALL {
            assert_eq!(Op::from_tag(op.tag()), Some(op));
        }
        assert_eq!(Op::from_tag("%"), None);
    }

    #[test]
    fn rules_iterate_in_name_order() {
        let rules: RuleSet = [("b", Expr::literal("x")), ("a", Expr::literal("y"))]
            .into_iter()
            .collect();
        assert_eq!(rules.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn handled_nodes_report_inner_operator() {
        let expr = Expr::literal("x").handled(Mapping::var(0));
        assert_eq!(expr.op(), Some(Op::Literal));
        assert_eq!(Expr::rule("Other").op(), None);
    }

    #[test]
    fn node_path_renders_as_json_pointer() {
        assert_eq!(NodePath::rule("Top").to_string(), "/Top");
        assert_eq!(NodePath::rule("a/b").child(1).child(2).to_string(), "/a~1b/1/2");
    }
}
