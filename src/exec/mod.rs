// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs external programs with `tokio::process::Command` and
//! turns what happened into a [`crate::result::CmdResult`].
//!
//! - [`descriptor`] defines [`CmdDesc`], the plain configuration of a run.
//! - [`invocation`] applies the sudo mode to produce the final argv.
//! - [`drain`] reads a child's stdout/stderr to end-of-file.
//! - [`runner`] spawns, drains both streams concurrently, waits, and
//!   assembles the result.

pub mod descriptor;
pub mod drain;
pub mod invocation;
pub mod runner;

pub use descriptor::CmdDesc;
pub use invocation::{Invocation, StdinMode};
pub use runner::{run, run_cmd_desc, run_unit, settle_exit};
