// Generated by hera. Do not edit.
#![allow(non_snake_case, non_upper_case_globals, dead_code)]

use hera::machine as M;

/// Parses `input` from its start with rule `Top`.
pub fn parse(input: &str) -> M::Outcome {
    Top(&M::ParseState::new(input))
}

static L0: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("b"));
static L1: M::Lazy<M::Parser> = M::Lazy::new(|| M::literal("cda"));

static R0: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("b?c+").expect("pattern checked by hera"));
static R1: M::Lazy<M::Parser> = M::Lazy::new(|| M::pattern("dab").expect("pattern checked by hera"));

pub fn Top(state: &M::ParseState<'_>) -> M::Outcome {
    static RULE: M::Lazy<M::Parser> = M::Lazy::new(|| M::sequence([M::quantified(L0.clone(), 1, 0), R0.clone(), R1.clone(), L1.clone()]));
    RULE.parse(state)
}
