// src/exec/drain.rs

//! Draining a child's output stream to end-of-file.

use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use crate::result::StreamKind;

const CHUNK_SIZE: usize = 8 * 1024;

/// Everything read from one stream.
#[derive(Debug, Clone)]
pub struct DrainedStream {
    pub kind: StreamKind,
    /// Decoded text, chunk by chunk.
    pub text: String,
    /// Raw bytes exactly as read.
    pub bytes: Vec<u8>,
    /// When end-of-file (or a read fault) was seen.
    pub closed_at: Instant,
}

/// Read `reader` until end-of-file.
///
/// Each chunk is decoded into the text accumulator and kept verbatim in the
/// byte buffer. With `echo`, chunks are also written straight through to this
/// process's own stdout or stderr as they arrive. A read fault ends the drain
/// early with whatever was collected so far.
pub async fn drain_stream<R>(mut reader: R, kind: StreamKind, echo: bool) -> DrainedStream
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut bytes = Vec::new();
    let mut decoder = ChunkDecoder::default();

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let chunk = &buf[..n];
                bytes.extend_from_slice(chunk);
                decoder.push(chunk);
                if echo {
                    echo_chunk(kind, chunk).await;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(stream = %kind, error = %e, "read failed; stream drained early");
                break;
            }
        }
    }

    debug!(stream = %kind, bytes = bytes.len(), "stream closed");

    DrainedStream {
        kind,
        text: decoder.finish(),
        bytes,
        closed_at: Instant::now(),
    }
}

async fn echo_chunk(kind: StreamKind, chunk: &[u8]) {
    let res = match kind {
        StreamKind::Stdout => {
            let mut out = tokio::io::stdout();
            match out.write_all(chunk).await {
                Ok(()) => out.flush().await,
                Err(e) => Err(e),
            }
        }
        StreamKind::Stderr => {
            let mut err = tokio::io::stderr();
            match err.write_all(chunk).await {
                Ok(()) => err.flush().await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = res {
        debug!(stream = %kind, error = %e, "echo write failed");
    }
}

/// Incremental UTF-8 decoder.
///
/// A multi-byte character split across two chunks is held back until the rest
/// arrives; invalid sequences become U+FFFD.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    text: String,
    pending: Vec<u8>,
}

impl ChunkDecoder {
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    self.pending.clear();
                    return;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    self.text
                        .push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        // Incomplete sequence at the end; wait for more bytes.
                        None => {
                            self.pending.drain(..valid);
                            return;
                        }
                        Some(bad) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                    }
                }
            }
        }
    }

    /// Text so far (excluding any held-back partial character).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Flush and return the text; a dangling partial character becomes U+FFFD.
    pub fn finish(mut self) -> String {
        if !self.pending.is_empty() {
            self.text.push_str(&String::from_utf8_lossy(&self.pending));
        }
        self.text
    }
}
