// src/cmd/mod.rs

//! Runnable units.
//!
//! Everything that can be run implements [`Runnable`] and yields exactly one
//! [`CmdResult`] per `run()`, whether it spawns a process or runs Rust code in
//! this process.
//!
//! - [`external`] holds [`Cmd`], the process-backed unit.
//! - [`seq`] holds [`CmdSeq`], an ordered stop-at-first-failure sequence.
//! - [`func`] holds [`CmdFn`], a unit backed by a caller-supplied closure.
//! - [`builtin`] holds the change-directory and text-file units.
//! - [`opts`] holds [`CmdOpts`], the execution knobs every unit exposes.

use std::future::Future;
use std::pin::Pin;

use crate::result::{CmdResult, CmdResultDraft, StreamKind};

pub mod builtin;
pub mod external;
pub mod func;
pub mod opts;
pub mod seq;

pub use external::Cmd;
pub use func::{CmdFn, FnContext};
pub use opts::CmdOpts;
pub use seq::{CmdSeq, SeqEntry, SeqState};

/// Boxed future returned by [`Runnable::run`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can be run to completion, producing a [`CmdResult`].
///
/// `run()` never fails: every fault ends up in the result's `error`,
/// `success` and `exit_code` fields.
///
/// Implementations that produce text output should route it through
/// [`print`] (or [`CmdOpts::print`]) so `quiet` behaves the same as it does for
/// real processes.
pub trait Runnable: Send {
    /// Human-readable summary of what the unit does.
    fn description(&self) -> String;

    fn opts(&self) -> &CmdOpts;

    fn opts_mut(&mut self) -> &mut CmdOpts;

    fn run(&mut self) -> BoxFuture<'_, CmdResult>;
}

/// Append `text` to the draft's stdout or stderr and, unless `quiet`, write it
/// to the real console stream as well.
pub fn print(stream: StreamKind, draft: &mut CmdResultDraft, text: &str, quiet: bool) {
    draft.append(stream, text);
    if quiet {
        return;
    }
    match stream {
        StreamKind::Stdout => println!("{text}"),
        StreamKind::Stderr => eprintln!("{text}"),
    }
}
