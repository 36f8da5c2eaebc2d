//! Shared helpers for hera integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use hera::machine::{Outcome, ParseState, Parser};

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).unwrap_or_else(|e| panic!("reading fixture {name}: {e}"))
}

/// Runs `parser` at the start of `input`.
pub fn run(parser: &Parser, input: &str) -> Outcome {
    parser.parse(&ParseState::new(input))
}

/// Runs `parser` at byte `pos` of `input`.
pub fn run_at(parser: &Parser, input: &str, pos: usize) -> Outcome {
    parser.parse(&ParseState::at(input, pos))
}
