// Generated by hera. Do not edit.
#![allow(non_snake_case, non_upper_case_globals, dead_code)]

use hera::machine as M;

/// Parses `input` from its start with rule `List`.
pub fn parse(input: &str) -> M::Outcome {
    List(&M::ParseState::new(input))
}

static L0: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal(","));
static L1: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("-"));
static L2: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("<"));
static L3: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal(">"));

static R0: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[0-9]+").expect("pattern checked by hera"));
static R1: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("[a-z]+").expect("pattern checked by hera"));

pub fn Item(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::choice([M::rule(Number), M::rule(r#type)]));
    RULE.parse(state)
}

pub fn List(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::map(M::sequence([M::rule(Item), M::quantified(M::map(M::sequence([L0.clone(), M::rule(Item)]), M::Mapping::var(2)), 0, 0)]), M::Mapping::List(vec![M::Mapping::var(1), M::Mapping::var(2)])));
    RULE.parse(state)
}

pub fn Name(state: &M::ParseState<'_>) -> M::Outcome {
    Word(state)
}

pub fn Number(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::text(M::sequence([M::option(L1.clone()), R0.clone()])));
    RULE.parse(state)
}

pub fn Word(state: &M::ParseState<'_>) -> M::Outcome {
    R1.parse(state)
}

pub fn r#type(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::map(M::sequence([L2.clone(), M::rule(Name), L3.clone()]), M::Mapping::List(vec![M::Mapping::text("type"), M::Mapping::var(2)])));
    RULE.parse(state)
}
