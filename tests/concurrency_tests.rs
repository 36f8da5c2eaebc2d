//! One compiled grammar, many threads.

mod common;

#[path = "fixtures/top_parser.rs"]
mod top_parser;

use std::sync::Arc;
use std::thread;

use common::read_fixture;
use hera::bootstrap;
use hera::machine::{self as M, validate};

#[test]
fn generated_parser_is_shared_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let input = format!("{}cdabcda", "b".repeat(i + 1));
                for _ in 0..200 {
                    let result = top_parser::parse(&input).expect("valid input matches");
                    assert_eq!(result.pos, input.len());
                    assert!(top_parser::parse("xyz").is_none());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn one_parser_value_serves_every_thread() {
    let parser = Arc::new(M::sequence([
        M::one_or_more(M::pattern("[a-z]").unwrap()),
        M::negate(M::pattern(".").unwrap()),
    ]));
    let handles: Vec<_> = ["abc", "hello", "x", "ABC"]
        .into_iter()
        .map(|input| {
            let parser = Arc::clone(&parser);
            thread::spawn(move || parser.parse(&M::ParseState::new(input)).map(|r| r.pos))
        })
        .collect();
    let positions: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(positions, [Some(3), Some(5), Some(1), None]);
}

#[test]
fn bootstrap_recognizer_runs_concurrently() {
    let grammar = Arc::new(read_fixture("grammars/pairs.hera"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let grammar = Arc::clone(&grammar);
            thread::spawn(move || validate(&grammar, bootstrap::parse(&grammar)).is_ok())
        })
        .collect();
    assert!(handles.into_iter().all(|h| h.join().unwrap()));
}
