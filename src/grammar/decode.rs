//! Reading rule sets from their JSON encoding.
//!
//! ```text
//! { "Top": ["S", [["+", ["L", "b"]], ["R", "b?c+"], "Other"]], "Other": ["L", "x"] }
//! ```
//!
//! A node is either a rule name (a string) or `[op, operand, handler?]`.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value as Json;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

use super::{Expr, NodePath, Op, RuleSet};
use crate::diagnostics::CompileError;
use crate::machine::Mapping;

static FIRST_RULE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{\s*"([_a-zA-Z][_a-zA-Z0-9]*)""#).expect("rule name scanner is a valid regex")
});

/// The first rule name written in an encoded grammar.
///
/// This is a scan of the text, not a parse: it returns the first identifier
/// that opens an object, which for a well-formed encoding is the first key of
/// the top-level object.
pub fn find_start_rule(bytes: &[u8]) -> Option<String> {
    let caps = FIRST_RULE_NAME.captures(bytes)?;
    let name = caps.get(1)?;
    std::str::from_utf8(name.as_bytes()).ok().map(str::to_string)
}

/// Decodes a JSON-encoded rule set.
pub fn decode_rules(bytes: &[u8]) -> Result<RuleSet, CompileError> {
    let RawRules(entries) = serde_json::from_slice::<RawRules>(bytes)?;

    let mut seen = HashSet::new();
    let mut rules = RuleSet::new();
    for (name, node) in entries {
        if !seen.insert(name.clone()) {
            return Err(CompileError::DuplicateRule { name });
        }
        let expr = decode_expr(&node, &NodePath::rule(name.as_str()))?;
        rules.insert(name, expr);
    }
    Ok(rules)
}

/// The top-level object in source order, duplicates included.
struct RawRules(Vec<(String, Json)>);

impl<'de> Deserialize<'de> for RawRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawRulesVisitor;

        impl<'de> Visitor<'de> for RawRulesVisitor {
            type Value = RawRules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping rule names to AST nodes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawRules, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Json>()? {
                    entries.push(entry);
                }
                Ok(RawRules(entries))
            }
        }

        deserializer.deserialize_map(RawRulesVisitor)
    }
}

// ============================================================================
// NODES
// ============================================================================

/// Decodes one node; `path` names it in errors.
pub fn decode_expr(node: &Json, path: &NodePath) -> Result<Expr, CompileError> {
    match node {
        Json::String(name) => Ok(Expr::Rule(name.clone())),
        Json::Array(items) => decode_node(items, path),
        other => Err(malformed(
            path,
            format!("expected a rule name or an operator node, found {}", kind(other)),
        )),
    }
}

fn decode_node(items: &[Json], path: &NodePath) -> Result<Expr, CompileError> {
    let Some((head, operands)) = items.split_first() else {
        return Err(malformed(path, "empty node"));
    };
    let Json::String(tag) = head else {
        return Err(malformed(
            &path.child(0),
            format!("operator tag must be a string, found {}", kind(head)),
        ));
    };
    let op = Op::from_tag(tag).ok_or_else(|| CompileError::UnknownOperator {
        path: path.child(0),
        op: tag.clone(),
    })?;

    let (operand, handler) = match operands {
        [operand] => (operand, None),
        [operand, handler] => (operand, Some(handler)),
        [] => return Err(malformed(path, format!("`{}` is missing its operand", op))),
        _ => {
            return Err(malformed(
                path,
                format!("`{}` takes one operand and an optional handler, found {} elements", op, items.len()),
            ))
        }
    };
    let operand_path = path.child(1);

    let expr = match op {
        Op::Sequence | Op::Choice => {
            let Json::Array(children) = operand else {
                return Err(malformed(
                    &operand_path,
                    format!("`{}` expects an array of nodes, found {}", op, kind(operand)),
                ));
            };
            let children = children
                .iter()
                .enumerate()
                .map(|(i, child)| decode_expr(child, &operand_path.child(i)))
                .collect::<Result<Vec<_>, _>>()?;
            if op == Op::Sequence {
                Expr::Sequence(children)
            } else {
                Expr::Choice(children)
            }
        }
        Op::Literal | Op::Pattern => {
            let Json::String(text) = operand else {
                return Err(malformed(
                    &operand_path,
                    format!("`{}` expects a string, found {}", op, kind(operand)),
                ));
            };
            if op == Op::Literal {
                Expr::Literal(text.clone())
            } else {
                Expr::Pattern(text.clone())
            }
        }
        Op::Optional | Op::OneOrMore | Op::ZeroOrMore | Op::Text | Op::Assert | Op::Negate => {
            let inner = decode_expr(operand, &operand_path)?;
            Expr::unary(op, inner)
                .ok_or_else(|| malformed(path, format!("`{}` is not a unary operator", op)))?
        }
    };

    match handler {
        Some(handler) => Ok(match decode_handler(handler, &path.child(2))? {
            Some(mapping) => expr.handled(mapping),
            None => expr,
        }),
        None => Ok(expr),
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

fn decode_handler(handler: &Json, path: &NodePath) -> Result<Option<Mapping>, CompileError> {
    match handler {
        Json::Null => Ok(None),
        Json::Object(fields) if fields.contains_key("f") => {
            warn!(%path, "ignoring code handler; only structural handlers compile");
            Ok(None)
        }
        other => decode_mapping(other, path).map(Some),
    }
}

fn decode_mapping(handler: &Json, path: &NodePath) -> Result<Mapping, CompileError> {
    match handler {
        Json::Null => Ok(Mapping::Empty),
        Json::String(text) => Ok(Mapping::Text(text.clone())),
        Json::Number(n) => Ok(Mapping::Text(n.to_string())),
        Json::Bool(b) => Ok(Mapping::Text(b.to_string())),
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_mapping(item, &path.child(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Mapping::List),
        Json::Object(fields) => match (fields.len(), fields.get("v")) {
            (1, Some(var)) => match var.as_u64() {
                Some(n @ 0..=9) => Ok(Mapping::Variable(n as usize)),
                _ => Err(CompileError::UnsupportedHandler {
                    path: path.clone(),
                    message: format!("variable index must be 0 through 9, found {}", var),
                }),
            },
            _ => Err(CompileError::UnsupportedHandler {
                path: path.clone(),
                message: "object handlers other than {\"v\": n} are not supported".into(),
            }),
        },
    }
}

fn malformed(path: &NodePath, message: impl Into<String>) -> CompileError {
    CompileError::MalformedNode {
        path: path.clone(),
        message: message.into(),
    }
}

fn kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_one(node: Json) -> Result<Expr, CompileError> {
        decode_expr(&node, &NodePath::rule("R"))
    }

    #[test]
    fn start_rule_is_first_key_in_text() {
        assert_eq!(find_start_rule(br#"{ "Zed": "A", "A": ["L", "a"] }"#).as_deref(), Some("Zed"));
        assert_eq!(find_start_rule(b"[1, 2]"), None);
        assert_eq!(find_start_rule(br#"{"9bad": "x"}"#), None);
    }

    #[test]
    fn decodes_every_operator() {
        let expr = decode_one(json!(["S", [
            ["/", ["A", ["L", "x"]]],
            ["R", "[0-9]+"],
            ["?", "A"], ["+", "A"], ["*", "A"],
            ["$", "A"], ["&", "A"], ["!", "A"]
        ]]))
        .unwrap();
        let a = || Box::new(Expr::rule("A"));
        assert_eq!(
            expr,
            Expr::Sequence(vec![
                Expr::Choice(vec![Expr::rule("A"), Expr::literal("x")]),
                Expr::pattern("[0-9]+"),
                Expr::Optional(a()),
                Expr::OneOrMore(a()),
                Expr::ZeroOrMore(a()),
                Expr::Text(a()),
                Expr::Assert(a()),
                Expr::Negate(a()),
            ])
        );
    }

    #[test]
    fn structural_handlers_become_mappings() {
        let expr = decode_one(json!(["S", ["A", "B"], [{"v": 2}, "lit", 3, true, null]])).unwrap();
        assert_eq!(
            expr,
            Expr::sequence([Expr::rule("A"), Expr::rule("B")]).handled(Mapping::list([
                Mapping::var(2),
                Mapping::text("lit"),
                Mapping::text("3"),
                Mapping::text("true"),
                Mapping::Empty,
            ]))
        );
    }

    #[test]
    fn null_and_code_handlers_are_dropped() {
        assert_eq!(decode_one(json!(["L", "x", null])).unwrap(), Expr::literal("x"));
        let code = json!(["L", "x", {"f": "return 1", "$loc": {"pos": 0, "length": 1}}]);
        assert_eq!(decode_one(code).unwrap(), Expr::literal("x"));
    }

    #[test]
    fn malformed_nodes_name_their_path() {
        let err = decode_one(json!(["S", ["A", ["?"]]])).unwrap_err();
        assert!(matches!(err, CompileError::MalformedNode { .. }));
        assert_eq!(err.path().unwrap().to_string(), "/R/1/1");

        let err = decode_one(json!(["S", ["A", [7, "x"]]])).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "/R/1/1/0");

        let err = decode_one(json!(["L", ["x"]])).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "/R/1");

        assert!(matches!(decode_one(json!(42)), Err(CompileError::MalformedNode { .. })));
        assert!(matches!(decode_one(json!([])), Err(CompileError::MalformedNode { .. })));
        assert!(matches!(
            decode_one(json!(["L", "a", null, null])),
            Err(CompileError::MalformedNode { .. })
        ));
    }

    #[test]
    fn unknown_operator_is_reported() {
        let err = decode_one(json!(["%", "A"])).unwrap_err();
        assert!(matches!(err, CompileError::UnknownOperator { ref op, .. } if op == "%"));
    }

    #[test]
    fn bad_handlers_are_rejected() {
        let err = decode_one(json!(["L", "x", {"v": 12}])).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedHandler { .. }));
        let err = decode_one(json!(["L", "x", [{"o": {}}]])).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "/R/2/0");
    }

    #[test]
    fn duplicate_rules_are_rejected() {
        let err = decode_rules(br#"{"A": ["L", "a"], "A": ["L", "b"]}"#).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateRule { ref name } if name == "A"));
    }

    #[test]
    fn non_object_grammar_is_a_decode_error() {
        assert!(matches!(decode_rules(b"[]"), Err(CompileError::Decode { .. })));
        assert!(matches!(decode_rules(b"{"), Err(CompileError::Decode { .. })));
    }
}
