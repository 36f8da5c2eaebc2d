//! Recognizer for hera grammar files.
//!
//! A grammar file is a list of rules. Each rule is a name on its own line
//! followed by one or more alternatives indented by two spaces, each with an
//! optional `->` handler:
//!
//! ```text
//! Pair
//!   Name Space? "=" Space? Value -> [$1, $5]
//!
//! Name
//!   /[_a-zA-Z][_a-zA-Z0-9]*/
//! ```
//!
//! The functions below are laid out exactly the way `compiler` writes parsers
//! (terminal tables first, then one function per rule in name order), so this
//! module doubles as a worked example of generated code. Everything from the
//! `use` line down to the tests is the output of
//! `hera compile --runtime crate::machine tests/fixtures/hera.json`.

#![allow(non_snake_case, non_upper_case_globals)]

use crate::machine as M;

/// Parses `input` from its start with rule `Grammar`.
pub fn parse(input: &str) -> M::Outcome {
    Grammar(&M::ParseState::new(input))
}

static L0: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("->"));
static L1: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("\\"));
static L2: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("["));
static L3: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("]"));
static L4: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("/"));
static L5: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal(","));
static L6: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("  "));
static L7: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("."));
static L8: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("\""));

static R0: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[^\\]\\\\]+").expect("pattern checked by hera"));
static R1: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("\\][ \\t]*").expect("pattern checked by hera"));
static R2: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[ \\t]*\\)").expect("pattern checked by hera"));
static R3: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[^\"\\\\]+").expect("pattern checked by hera"));
static R4: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("([ \\t]*(#[^\\n\\r]*)?(\\n|\\r\\n|\\r|$))+").expect("pattern checked by hera"));
static R5: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern(".").expect("pattern checked by hera"));
static R6: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[^\\n\\r]*").expect("pattern checked by hera"));
static R7: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[_a-zA-Z][_a-zA-Z0-9]*").expect("pattern checked by hera"));
static R8: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("\\d+(\\.\\d+)?").expect("pattern checked by hera"));
static R9: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("\\[[ \\t]*").expect("pattern checked by hera"));
static R10: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("\\([ \\t]*").expect("pattern checked by hera"));
static R11: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[$&!]").expect("pattern checked by hera"));
static R12: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[?+*]|\\{\\d+(,\\d+)?\\}").expect("pattern checked by hera"));
static R13: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[^/\\\\]+").expect("pattern checked by hera"));
static R14: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[ \\t]+").expect("pattern checked by hera"));
static R15: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[+?*]").expect("pattern checked by hera"));
static R16: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("\\$(\\d)").expect("pattern checked by hera"));

pub fn Arrow(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([L0.clone(), M::quantified(M::rule(Space), 0, 0)]));
    RULE.parse(state)
}

pub fn Backslash(state: &M::ParseState<'_>) -> M::Outcome {
    L1.parse(state)
}

pub fn CharacterClass(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([L2.clone(), M::quantified(M::rule(CharacterClassCharacter), 0, 0), L3.clone(), M::option(M::rule(Quantifier))]));
    RULE.parse(state)
}

pub fn CharacterClassCharacter(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([R0.clone(), M::rule(EscapeSequence)]));
    RULE.parse(state)
}

pub fn CharacterClassExpression(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::quantified(M::rule(CharacterClass), 1, 0));
    RULE.parse(state)
}

pub fn Choice(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::rule(Sequence), M::rule(Handling)]));
    RULE.parse(state)
}

pub fn ChoiceExpression(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::rule(Space), L4.clone(), M::rule(Space), M::rule(Expression)]));
    RULE.parse(state)
}

pub fn CloseBracket(state: &M::ParseState<'_>) -> M::Outcome {
    R1.parse(state)
}

pub fn CloseParenthesis(state: &M::ParseState<'_>) -> M::Outcome {
    R2.parse(state)
}

pub fn CommaThenValue(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::quantified(M::rule(Space), 0, 0), L5.clone(), M::quantified(M::rule(Space), 0, 0), M::rule(StructuralMapping), M::quantified(M::rule(Space), 0, 0)]));
    RULE.parse(state)
}

pub fn DoubleStringCharacter(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([R3.clone(), M::rule(EscapeSequence)]));
    RULE.parse(state)
}

pub fn EOS(state: &M::ParseState<'_>) -> M::Outcome {
    R4.parse(state)
}

pub fn EscapeSequence(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::text(M::sequence([M::rule(Backslash), R5.clone()])));
    RULE.parse(state)
}

pub fn Expression(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::rule(Suffix), M::sequence([M::rule(PrefixOperator), M::rule(Suffix)])]));
    RULE.parse(state)
}

pub fn Grammar(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::quantified(M::rule(EOS), 0, 0), M::quantified(M::rule(Rule), 1, 0)]));
    RULE.parse(state)
}

pub fn Handling(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::sequence([M::rule(EOS)]), M::sequence([M::quantified(M::rule(Space), 0, 0), M::rule(Arrow), M::rule(HandlingExpression)])]));
    RULE.parse(state)
}

pub fn HandlingExpression(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::sequence([M::rule(EOS), M::rule(HandlingExpressionBody)]), M::sequence([M::rule(StructuralMapping), M::rule(EOS)])]));
    RULE.parse(state)
}

pub fn HandlingExpressionBody(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::quantified(M::rule(HandlingExpressionLine), 1, 0));
    RULE.parse(state)
}

pub fn HandlingExpressionLine(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::rule(Indent), M::rule(Indent), R6.clone(), M::rule(EOS)]));
    RULE.parse(state)
}

pub fn Indent(state: &M::ParseState<'_>) -> M::Outcome {
    L6.parse(state)
}

pub fn Literal(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::rule(StringLiteral), M::rule(RegExpLiteral)]));
    RULE.parse(state)
}

pub fn Name(state: &M::ParseState<'_>) -> M::Outcome {
    R7.parse(state)
}

pub fn NumberValue(state: &M::ParseState<'_>) -> M::Outcome {
    R8.parse(state)
}

pub fn OpenBracket(state: &M::ParseState<'_>) -> M::Outcome {
    R9.parse(state)
}

pub fn OpenParenthesis(state: &M::ParseState<'_>) -> M::Outcome {
    R10.parse(state)
}

pub fn PrefixOperator(state: &M::ParseState<'_>) -> M::Outcome {
    R11.parse(state)
}

pub fn Primary(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::rule(Name), M::rule(Literal), M::sequence([M::rule(OpenParenthesis), M::rule(Sequence), M::rule(CloseParenthesis)])]));
    RULE.parse(state)
}

pub fn Quantifier(state: &M::ParseState<'_>) -> M::Outcome {
    R12.parse(state)
}

pub fn RegExpCharacter(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([R13.clone(), M::rule(EscapeSequence)]));
    RULE.parse(state)
}

pub fn RegExpLiteral(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::sequence([L4.clone(), M::negate(M::rule(Space)), M::text(M::quantified(M::rule(RegExpCharacter), 0, 0)), L4.clone()]), M::text(M::rule(CharacterClassExpression)), L7.clone()]));
    RULE.parse(state)
}

pub fn Rule(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::rule(Name), M::rule(EOS), M::rule(RuleBody)]));
    RULE.parse(state)
}

pub fn RuleBody(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::quantified(M::sequence([M::rule(Indent), M::rule(Choice)]), 1, 0));
    RULE.parse(state)
}

pub fn Sequence(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::sequence([M::rule(Expression), M::quantified(M::rule(SequenceExpression), 1, 0)]), M::sequence([M::rule(Expression), M::quantified(M::rule(ChoiceExpression), 1, 0)]), M::rule(Expression)]));
    RULE.parse(state)
}

pub fn SequenceExpression(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::rule(Space), M::rule(Expression)]));
    RULE.parse(state)
}

pub fn Space(state: &M::ParseState<'_>) -> M::Outcome {
    R14.parse(state)
}

pub fn StringLiteral(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::rule(StringValue)]));
    RULE.parse(state)
}

pub fn StringValue(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([L8.clone(), M::text(M::quantified(M::rule(DoubleStringCharacter), 0, 0)), L8.clone()]));
    RULE.parse(state)
}

pub fn StructuralMapping(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::rule(StringValue), M::rule(NumberValue), M::rule(Variable), M::sequence([M::rule(OpenBracket), M::rule(StructuralMapping), M::quantified(M::rule(CommaThenValue), 0, 0), M::rule(CloseBracket)])]));
    RULE.parse(state)
}

pub fn Suffix(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::sequence([M::rule(Primary), M::rule(SuffixOperator)]), M::rule(Primary)]));
    RULE.parse(state)
}

pub fn SuffixOperator(state: &M::ParseState<'_>) -> M::Outcome {
    R15.parse(state)
}

pub fn Variable(state: &M::ParseState<'_>) -> M::Outcome {
    R16.parse(state)
}
