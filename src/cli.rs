// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `cmdseq`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "cmdseq",
    version,
    about = "Run a sequence of commands, stopping at the first failure.",
    long_about = None
)]
pub struct CliArgs {
    /// Command lines to run, in order. Each one is tokenized on whitespace
    /// with simple quote handling; no shell is involved.
    #[arg(value_name = "COMMANDS")]
    pub commands: Vec<String>,

    /// Text file with a command block: one command per line, blank lines
    /// ignored, trailing `\` continues a line.
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// TOML sequence file. Its steps run before `--script` and COMMANDS.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not echo command output; results are still captured.
    #[arg(long)]
    pub quiet: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CMDSEQ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the planned steps without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
