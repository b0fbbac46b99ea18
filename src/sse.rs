// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Incremental server-sent-events decoder.
//!
//! Feed raw body chunks as they arrive; complete events come out once their
//! terminating blank line has been seen. Chunk boundaries may fall anywhere,
//! including inside a multi-byte character.

/// One dispatched SSE event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

impl SseEvent {
    /// Event type, `message` when the stream did not name one.
    pub fn name(&self) -> &str {
        self.event.as_deref().unwrap_or("message")
    }
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    event: Option<String>,
    data_lines: Vec<String>,
    comments: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of comment lines (keepalives) seen so far.
    pub fn comments_seen(&self) -> usize {
        self.comments
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buf.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.trim_end_matches('\r');
            if let Some(event) = self.process_line(line) {
                out.push(event);
            }
        }
        out
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            let event = self.event.take();
            if self.data_lines.is_empty() {
                return None;
            }
            let data = self.data_lines.join("\n");
            self.data_lines.clear();
            return Some(SseEvent { event, data });
        }

        if line.starts_with(':') {
            self.comments += 1;
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            // id / retry / unknown fields carry nothing this crate uses
            _ => {}
        }
        None
    }
}

/// Decode every complete event in a fully buffered body.
pub fn decode_sse_events(body: &str) -> Vec<SseEvent> {
    SseDecoder::new().push(body.as_bytes())
}
