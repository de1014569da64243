// src/config/mod.rs

//! Configuration for cmdseq.
//!
//! Responsibilities:
//! - Process-wide defaults for unset unit knobs (`defaults.rs`).
//! - The TOML-backed sequence-file model (`model.rs`).
//! - Loading a sequence file from disk (`loader.rs`).
//! - Validating raw steps into typed ones (`validate.rs`).

pub mod defaults;
pub mod loader;
pub mod model;
pub mod validate;

pub use defaults::CmdDefaults;
pub use loader::{load_and_validate, load_from_path, parse_and_validate};
pub use model::{RawSequenceFile, RawStep, RawWrite, SequenceFile, Step};
