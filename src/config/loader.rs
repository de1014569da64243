// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawSequenceFile, SequenceFile};
use crate::errors::Result;

/// Load a sequence file and return the raw `RawSequenceFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// typed steps.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSequenceFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let raw: RawSequenceFile = toml::from_str(&contents)?;
    Ok(raw)
}

/// Load a sequence file from path and validate its steps.
///
/// This is the entry point the CLI uses:
///
/// - Reads TOML.
/// - Checks that every step names exactly one action and only carries
///   fields that make sense for that action.
/// - Tokenizes `run = "..."` lines into command descriptors.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<SequenceFile> {
    let raw = load_from_path(&path)?;
    SequenceFile::try_from(raw)
}

/// Parse and validate sequence-file TOML held in memory.
pub fn parse_and_validate(contents: &str) -> Result<SequenceFile> {
    let raw: RawSequenceFile = toml::from_str(contents)?;
    SequenceFile::try_from(raw)
}
