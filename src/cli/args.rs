//! Defines the command-line arguments and subcommands for the hera CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "hera",
    version,
    about = "Compile PEG grammars into Rust parsers built on the hera runtime."
)]
pub struct HeraArgs {
    /// Log compiler activity at debug level (overrides HERA_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile an encoded grammar (JSON) into Rust source.
    Compile {
        /// Encoded grammar to read; stdin when omitted.
        file: Option<PathBuf>,

        /// Start rule; defaults to the first rule in the file.
        #[arg(long, value_name = "RULE")]
        start: Option<String>,

        /// Module path the generated code imports the runtime from.
        #[arg(long, value_name = "PATH", default_value = "hera::machine")]
        runtime: String,

        /// Name of the generated entry function.
        #[arg(long, value_name = "NAME", default_value = "parse")]
        entry: String,

        /// Compare the output with an existing generated file instead of printing it.
        #[arg(long, value_name = "GENERATED")]
        check: Option<PathBuf>,
    },
    /// Check that hera grammar files are well formed.
    Check {
        /// Files or directories (searched for *.hera); stdin when omitted.
        paths: Vec<PathBuf>,

        /// Print each parse tree as JSON.
        #[arg(long)]
        json: bool,
    },
}
