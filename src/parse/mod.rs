// src/parse/mod.rs

//! A deliberately approximate, shell-flavoured tokenizer.
//!
//! This is not a shell. There are no pipes, redirections, globs, variable
//! expansion or escape sequences; operators like `&&` or `|` come through as
//! ordinary tokens. It covers the convenient cases (plain words, single or
//! double quoted arguments, line continuations) and nothing else.
//!
//! - [`line`] splits one line into a command and its arguments.
//! - [`block`] splits a multiline block into logical command lines.

pub mod block;
pub mod line;

pub use block::split_command_block;
pub use line::{parse_command_line, ParsedLine};
