// src/result/mod.rs

//! The single result shape every unit produces.
//!
//! - [`output`] holds the output-event log entries.
//! - [`record`] holds the final [`CmdResult`] and the mutable
//!   [`CmdResultDraft`] a unit fills in while it runs.

pub mod output;
pub mod record;

pub use output::{CmdOutput, StreamKind};
pub use record::{CmdResult, CmdResultDraft};
