// Regression tests for the `hera` binary: exit codes, stdout shape, and
// miette-rendered diagnostics on stderr.

mod common;

use assert_cmd::Command;
use common::{fixture, read_fixture};
use predicates::prelude::*;
use predicates::str::contains;

fn hera() -> Command {
    let mut cmd = Command::cargo_bin("hera").unwrap();
    cmd.env_remove("HERA_LOG");
    cmd
}

#[test]
fn compile_prints_generated_source() {
    hera()
        .arg("compile")
        .arg(fixture("top.json"))
        .assert()
        .success()
        .stdout(predicate::eq(read_fixture("top_parser.rs")));
}

#[test]
fn compile_reads_stdin() {
    hera()
        .arg("compile")
        .write_stdin(r#"{"R": ["?", ["L", "x"]]}"#)
        .assert()
        .success()
        .stdout(contains("M::option(L0.clone())"));
}

#[test]
fn compile_honours_start_and_entry() {
    hera()
        .args(["compile", "--start", "Word", "--entry", "parse_word", "--runtime", "crate::m"])
        .arg(fixture("words.json"))
        .assert()
        .success()
        .stdout(
            contains("use crate::m as M;")
                .and(contains("pub fn parse_word(input: &str) -> M::Outcome {\n    Word(")),
        );
}

#[test]
fn compile_check_accepts_up_to_date_output() {
    hera()
        .arg("compile")
        .arg(fixture("top.json"))
        .arg("--check")
        .arg(fixture("top_parser.rs"))
        .assert()
        .success()
        .stdout(contains("ok"));
}

#[test]
fn compile_check_reports_stale_output_with_a_diff() {
    hera()
        .arg("compile")
        .arg(fixture("words.json"))
        .arg("--check")
        .arg(fixture("top_parser.rs"))
        .assert()
        .failure()
        .code(1)
        .stdout(contains("failed").and(contains("+pub fn Document")).and(contains("-pub fn Top")));
}

#[test]
fn compile_errors_render_as_diagnostics() {
    hera()
        .arg("compile")
        .write_stdin(r#"{"Top": ["S", [["L", "a"], "Missing"]]}"#)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("hera::compile::undefined_rule").and(contains("/Top/1/1")));
}

#[test]
fn invalid_options_are_rejected_before_output() {
    for args in [["--entry", "L0"], ["--runtime", "hera machine"]] {
        hera()
            .arg("compile")
            .args(args)
            .arg(fixture("top.json"))
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(contains("hera::compile::invalid_option"));
    }
}

#[test]
fn verbose_flag_logs_compiled_rules() {
    hera()
        .args(["-v", "compile"])
        .arg(fixture("top.json"))
        .assert()
        .success()
        .stderr(contains("compiling rule"));
}

#[test]
fn log_filter_comes_from_environment() {
    hera()
        .env("HERA_LOG", "trace")
        .arg("compile")
        .arg(fixture("top.json"))
        .assert()
        .success()
        .stderr(contains("interned terminal"));
}

#[test]
fn check_walks_directories_for_grammar_files() {
    hera()
        .arg("check")
        .arg(fixture("grammars"))
        .assert()
        .success()
        .stdout(
            contains("pairs.hera")
                .and(contains("arith.hera"))
                .and(contains("ignored.txt").not()),
        );
}

#[test]
fn check_fails_on_malformed_grammar() {
    hera()
        .arg("check")
        .arg(fixture("grammars/pairs.hera"))
        .arg(fixture("broken.hera"))
        .assert()
        .failure()
        .code(1)
        .stdout(contains("failed").and(contains("broken.hera")).and(contains("input did not match")));
}

#[test]
fn check_json_prints_parse_trees() {
    hera()
        .args(["check", "--json"])
        .write_stdin("Top\n  \"a\"\n")
        .assert()
        .success()
        .stdout(contains("\"input\": \"<stdin>\"").and(contains("\"Top\"")));
}

#[test]
fn missing_input_file_is_an_error() {
    hera()
        .arg("compile")
        .arg(fixture("does-not-exist.json"))
        .assert()
        .failure()
        .stderr(contains("failed to read"));
}
