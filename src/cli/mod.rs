//! The hera command-line interface.
//!
//! `hera compile` turns an encoded grammar into Rust source; `hera check`
//! runs the bootstrap recognizer over hera grammar files.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::bootstrap;
use crate::cli::args::{Command, HeraArgs};
use crate::compiler::{CompileOptions, Compiler};
use crate::machine::{self, ParseFailure};

pub mod args;
pub mod output;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "HERA_LOG";

const GRAMMAR_EXTENSION: &str = "hera";
const STDIN_NAME: &str = "<stdin>";

/// The main entry point for the CLI.
pub fn run() {
    let args = HeraArgs::parse();
    init_logging(args.verbose);

    match execute(args.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(report) => {
            eprintln!("{:?}", report);
            process::exit(1);
        }
    }
}

/// Runs one subcommand. `Ok(false)` means it ran but something failed.
pub fn execute(command: Command) -> Result<bool> {
    match command {
        Command::Compile {
            file,
            start,
            runtime,
            entry,
            check,
        } => handle_compile(
            file.as_deref(),
            start.as_deref(),
            CompileOptions {
                runtime_path: runtime,
                entry_point: entry,
            },
            check.as_deref(),
        ),
        Command::Check { paths, json } => handle_check(&paths, json),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_compile(
    file: Option<&Path>,
    start: Option<&str>,
    options: CompileOptions,
    check: Option<&Path>,
) -> Result<bool> {
    let (name, bytes) = read_input(file)?;
    debug!(input = %name, bytes = bytes.len(), "compiling encoded grammar");

    let compiler = Compiler::new(options);
    let source = match start {
        Some(start) => compiler.compile_encoded_from(&bytes, start),
        None => compiler.compile_encoded(&bytes),
    }?;

    let Some(generated) = check else {
        output::print_source(&source)?;
        return Ok(true);
    };

    let expected = fs::read_to_string(generated)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", generated.display()))?;
    let label = generated.display().to_string();
    if expected == source {
        output::print_status(&label, true, None)?;
        Ok(true)
    } else {
        output::print_diff(&expected, &source)?;
        output::print_status(&label, false, Some(&format!("differs from the output for {}", name)))?;
        Ok(false)
    }
}

fn handle_check(paths: &[PathBuf], json: bool) -> Result<bool> {
    let inputs = if paths.is_empty() {
        vec![None]
    } else {
        grammar_files(paths)?.into_iter().map(Some).collect()
    };

    let mut failures = 0;
    for path in inputs {
        let (name, bytes) = read_input(path.as_deref())?;
        let text = String::from_utf8(bytes)
            .into_diagnostic()
            .wrap_err_with(|| format!("{} is not valid UTF-8", name))?;

        match machine::validate(&text, bootstrap::parse(&text)) {
            Ok(value) if json => output::print_json(&name, &value)?,
            Ok(_) => output::print_status(&name, true, None)?,
            Err(failure) => {
                failures += 1;
                output::print_status(&name, false, Some(&describe_failure(&text, failure)))?;
            }
        }
    }
    debug!(failures, "check finished");
    Ok(failures == 0)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn read_input(path: Option<&Path>) -> Result<(String, Vec<u8>)> {
    match path {
        Some(path) => {
            let bytes = fs::read(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), bytes))
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            Ok((STDIN_NAME.to_string(), bytes))
        }
    }
}

/// Expands directories into the grammar files below them, in path order.
fn grammar_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let before = files.len();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to walk {}", path.display()))?;
            if entry.file_type().is_file()
                && entry.path().extension().map_or(false, |ext| ext == GRAMMAR_EXTENSION)
            {
                files.push(entry.into_path());
            }
        }
        if files.len() == before {
            warn!(dir = %path.display(), "no .{} files found", GRAMMAR_EXTENSION);
        }
    }
    Ok(files)
}

fn describe_failure(text: &str, failure: ParseFailure) -> String {
    match failure {
        ParseFailure::NoMatch => failure.to_string(),
        ParseFailure::Incomplete { consumed } => {
            let (line, column) = line_column(text, consumed);
            format!("{} (line {}, column {})", failure, line, column)
        }
    }
}

/// One-based line and column of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}
