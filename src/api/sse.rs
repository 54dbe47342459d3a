//! Incremental Server-Sent-Events parsing for streamed completions.
//!
//! The transport hands us arbitrary byte slices: a read may end in the middle
//! of a line, a JSON token, or even a multi-byte UTF-8 sequence. Buffering
//! happens at the byte level and lines are only split on `\n`, which cannot
//! occur inside a multi-byte sequence, so a codepoint split across two reads
//! is reassembled before it is ever decoded.

use log::warn;

use super::types::StreamFrame;

/// Sentinel frame that terminates an OpenAI-style SSE stream.
const DONE_SENTINEL: &str = "data: [DONE]";

/// Accumulates raw transport bytes and yields complete lines.
///
/// The trailing fragment after the last `\n` stays buffered until a later
/// `push` completes it. Whatever is left when the stream ends cannot be a
/// complete frame and is simply dropped.
#[derive(Debug, Default)]
pub(crate) struct SseLineBuffer {
    buf: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one transport read and returns every line completed by it.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            // Strip the newline; a complete line holds only whole codepoints
            // when the upstream sends valid UTF-8, so lossy decoding only
            // matters for genuinely corrupt input.
            lines.push(String::from_utf8_lossy(&line[..line.len() - 1]).into_owned());
        }
        lines
    }
}

/// Extracts the delta content from one SSE line, if it carries any.
///
/// Blank lines and the `[DONE]` sentinel yield nothing. A `data: ` line that
/// fails to parse as JSON is logged and skipped; one malformed frame must
/// never abort an otherwise-healthy stream.
pub(crate) fn delta_content(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line == DONE_SENTINEL {
        return None;
    }
    let data = line.strip_prefix("data: ")?;

    match serde_json::from_str::<StreamFrame>(data) {
        Ok(frame) => frame
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|content| !content.is_empty()),
        Err(e) => {
            warn!("Discarding malformed SSE frame: {e}");
            None
        }
    }
}
