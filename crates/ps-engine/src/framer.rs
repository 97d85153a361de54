//! Line framing for the engine's output stream.
//!
//! The engine terminates status lines with LF, CR or CRLF (interactive
//! progress lines use a bare CR), and the pipe hands those bytes over in
//! arbitrary chunks. [`LineFramer`] carries the unterminated tail across
//! chunks and emits every completed line exactly once, in arrival order,
//! with terminators stripped. Output is invariant under how the stream is
//! split into chunks.

use bytes::{Buf, Bytes, BytesMut};

/// Incremental byte-stream to line demuxer.
///
/// One instance per engine session. [`reset`](Self::reset) discards all
/// state between sessions so a previous run's partial line can never leak
/// into a new run's first line.
#[derive(Debug, Default)]
pub struct LineFramer {
    /// Bytes received but not yet resolved into a complete line. Never
    /// contains a terminator.
    pending: BytesMut,
    /// The last processed byte was a CR that ended its chunk; a LF leading
    /// the next chunk closes that same boundary and is swallowed.
    split_crlf: bool,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk, returning every line it completes, oldest first.
    ///
    /// An empty chunk yields no lines and changes no state. A line longer
    /// than any chunk simply accumulates in the residue; no cap is imposed
    /// here.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        if chunk.is_empty() {
            return Vec::new();
        }

        let mut chunk = chunk;
        if self.split_crlf {
            self.split_crlf = false;
            if chunk.first() == Some(&b'\n') {
                chunk = &chunk[1..];
                if chunk.is_empty() {
                    return Vec::new();
                }
            }
        }

        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self
            .pending
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            let line = self.pending.split_to(pos).freeze();
            let terminator = self.pending.get_u8();
            if terminator == b'\r' {
                // CRLF is one boundary, even when split across chunks.
                if self.pending.first() == Some(&b'\n') {
                    self.pending.advance(1);
                } else if self.pending.is_empty() {
                    self.split_crlf = true;
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Discard any buffered residue. The buffer is replaced outright so a
    /// restarted engine session starts from a clean slate.
    pub fn reset(&mut self) {
        self.pending = BytesMut::new();
        self.split_crlf = false;
    }

    /// End-of-stream: drop an unterminated tail and report how many bytes
    /// were discarded. A line the engine never terminated is not emitted.
    pub fn flush(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending = BytesMut::new();
        self.split_crlf = false;
        dropped
    }

    /// Bytes currently held back waiting for a terminator.
    pub fn residue_len(&self) -> usize {
        self.pending.len()
    }
}
