// src/lib.rs

//! Run external programs and in-process units behind one result shape, and
//! chain them into stop-at-first-failure sequences.
//!
//! ```no_run
//! # async fn demo() {
//! use cmdseq::{run, Cmd, Runnable};
//!
//! let listing = run("ls -la /tmp").await;
//! assert!(listing.success);
//!
//! let mut setup = Cmd::seq(
//!     "
//!     mkdir -p build
//!     cp README.md build/
//!     ",
//! );
//! let result = setup.run().await;
//! for step in &result.results {
//!     println!("{}", step.summary());
//! }
//! # }
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod parse;
pub mod result;
pub mod types;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

pub use crate::cmd::builtin::{
    cd, read_text_file, write_text_file, CmdCd, CmdReadTextFile, CmdWriteTextFile,
};
pub use crate::cmd::{Cmd, CmdFn, CmdOpts, CmdSeq, FnContext, Runnable, SeqEntry};
pub use crate::config::CmdDefaults;
pub use crate::errors::CmdError;
pub use crate::exec::{run, run_unit, CmdDesc};
pub use crate::result::{CmdOutput, CmdResult, StreamKind};
pub use crate::types::{CmdArgs, SudoMode};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::parse::split_command_block;

const CLI_DESCRIPTION: &str = "cmdseq";

/// High-level entry point used by `main.rs`.
///
/// Builds one sequence from `--config`, then `--script`, then the positional
/// command lines, runs it and returns the exit code the process should use.
pub async fn run_cli(args: CliArgs) -> Result<i32> {
    CmdDefaults::apply_env();
    if args.quiet {
        CmdDefaults::set_quiet(true);
    }

    let mut seq = build_sequence(&args)?;
    if seq.is_empty() {
        bail!("nothing to run: pass COMMANDS, --script or --config");
    }

    if args.dry_run {
        print_dry_run(&seq);
        return Ok(0);
    }

    info!(steps = seq.len(), "running sequence");
    let result = seq.run().await;

    for sub in &result.results {
        eprintln!("{}", sub.summary());
    }
    debug!(exit_code = result.exit_code, "sequence complete");

    Ok(result.exit_code)
}

fn build_sequence(args: &CliArgs) -> Result<CmdSeq> {
    let mut description = CLI_DESCRIPTION.to_string();
    let mut seq = CmdSeq::new(Vec::<SeqEntry>::new());

    if let Some(path) = &args.config {
        let file = load_and_validate(path)
            .with_context(|| format!("loading sequence file {}", path.display()))?;
        if let Some(d) = &file.description {
            description = d.clone();
        }
        seq.extend(file.into_entries());
    }

    if let Some(path) = &args.script {
        let block = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        seq.extend(split_command_block(&block));
    }

    seq.extend(args.commands.iter().cloned());

    Ok(seq.with_description(description))
}

fn print_dry_run(seq: &CmdSeq) {
    println!("cmdseq dry-run: {}", seq.description());
    for (index, step) in seq.plan().iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }
    debug!("dry-run complete (no execution)");
}
