//! Handles all user-facing output for the CLI.
//!
//! Results go to stdout, coloured when stdout is a terminal. Errors are not
//! printed here; they travel back to `run` as `miette` reports.

use std::io::{self, IsTerminal, Write};

use difference::{Changeset, Difference};
use miette::{IntoDiagnostic, Result};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::machine::Value;

fn stdout() -> StandardStream {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Writes generated source verbatim.
pub fn print_source(source: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(source.as_bytes()).into_diagnostic()?;
    out.flush().into_diagnostic()
}

/// One `ok` / `failed` line for a named input.
pub fn print_status(name: &str, ok: bool, detail: Option<&str>) -> Result<()> {
    write_status(&mut stdout(), name, ok, detail).into_diagnostic()
}

/// Line diff from `expected` to `actual`.
pub fn print_diff(expected: &str, actual: &str) -> Result<()> {
    write_diff(&mut stdout(), expected, actual).into_diagnostic()
}

/// A parse tree as pretty JSON.
pub fn print_json(name: &str, value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&serde_json::json!({
        "input": name,
        "value": value,
    }))
    .into_diagnostic()?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", rendered).into_diagnostic()
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_status(
    out: &mut impl WriteColor,
    name: &str,
    ok: bool,
    detail: Option<&str>,
) -> io::Result<()> {
    let (label, color) = if ok {
        ("ok", Color::Green)
    } else {
        ("failed", Color::Red)
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{:>6}", label)?;
    out.reset()?;
    match detail {
        Some(detail) => writeln!(out, " {}: {}", name, detail),
        None => writeln!(out, " {}", name),
    }
}

fn write_diff(out: &mut impl WriteColor, expected: &str, actual: &str) -> io::Result<()> {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        for (prefix, color, text) in diff_lines(diff) {
            out.set_color(ColorSpec::new().set_fg(color))?;
            writeln!(out, "{}{}", prefix, text)?;
        }
    }
    out.reset()
}

fn diff_lines(diff: &Difference) -> Vec<(char, Option<Color>, &str)> {
    let (prefix, color, text) = match diff {
        Difference::Same(text) => (' ', None, text),
        Difference::Add(text) => ('+', Some(Color::Green), text),
        Difference::Rem(text) => ('-', Some(Color::Red), text),
    };
    text.split('\n').map(|line| (prefix, color, line)).collect()
}
