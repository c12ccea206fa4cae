//! Reassembly of `text/event-stream` chat completion chunks

use tracing::trace;

use crate::types::ChatChunk;

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

/// Collects streamed deltas into the full generated text
///
/// Network chunks may end mid-line (or mid-character), so bytes are buffered
/// until a newline arrives.
#[derive(Debug, Default)]
pub struct SseAccumulator {
    pending: Vec<u8>,
    text: String,
    done: bool,
}

impl SseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);

        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.handle_line(&String::from_utf8_lossy(&line));
        }
    }

    /// Whether the `[DONE]` marker has been seen
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Flush any trailing line and return the text
    pub fn finish(mut self) -> String {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.handle_line(&String::from_utf8_lossy(&line));
        }
        self.text
    }

    fn handle_line(&mut self, line: &str) {
        let Some(data) = line.trim().strip_prefix(DATA_PREFIX) else {
            return;
        };
        let data = data.trim();

        if data == DONE_MARKER {
            self.done = true;
            return;
        }

        // 파싱 실패한 줄은 무시
        match serde_json::from_str::<ChatChunk>(data) {
            Ok(chunk) => {
                if let Some(content) = chunk.content() {
                    self.text.push_str(content);
                }
            }
            Err(e) => trace!("Skipping unparseable SSE line: {}", e),
        }
    }
}

/// Reassemble a complete event-stream body in one go
pub fn collect_sse_text(body: &[u8]) -> String {
    let mut acc = SseAccumulator::new();
    acc.push(body);
    acc.finish()
}
