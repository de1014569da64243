// src/result/output.rs

use std::fmt;

/// Which standard stream a piece of output belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// One entry in a unit's output log.
///
/// `Info` entries are out-of-band messages from the unit itself (for example
/// `RUNNING: ...`), kept apart from what the underlying command wrote so the
/// two are easy to tell apart.
///
/// Process-backed units log one coalesced `Stdout`/`Stderr` entry per stream,
/// appended when that stream closes, so the relative order of the two says
/// which stream closed first rather than how the output interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdOutput {
    Info { text: String },
    Stdout { content: Vec<u8> },
    Stderr { content: Vec<u8> },
}

impl CmdOutput {
    pub fn info(text: impl Into<String>) -> Self {
        CmdOutput::Info { text: text.into() }
    }

    pub fn stream(kind: StreamKind, content: Vec<u8>) -> Self {
        match kind {
            StreamKind::Stdout => CmdOutput::Stdout { content },
            StreamKind::Stderr => CmdOutput::Stderr { content },
        }
    }

    /// The stream this entry came from, or `None` for `Info`.
    pub fn stream_kind(&self) -> Option<StreamKind> {
        match self {
            CmdOutput::Info { .. } => None,
            CmdOutput::Stdout { .. } => Some(StreamKind::Stdout),
            CmdOutput::Stderr { .. } => Some(StreamKind::Stderr),
        }
    }

    /// Lossy text view of the entry.
    pub fn text(&self) -> String {
        match self {
            CmdOutput::Info { text } => text.clone(),
            CmdOutput::Stdout { content } | CmdOutput::Stderr { content } => {
                String::from_utf8_lossy(content).into_owned()
            }
        }
    }
}
