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

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::debug;

use crate::core::constants::events;
use crate::core::models::JsonRpcResponse;
use crate::sse::{SseDecoder, SseEvent};

/// Pulls decoded SSE events off a stream of body chunks.
///
/// Works over `reqwest`'s `bytes_stream()` as well as an axum body's data
/// stream.
pub struct EventReader<S> {
    stream: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<SseEvent>,
}

impl<S, B, E> EventReader<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: Box::pin(stream),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
        }
    }

    /// Keepalive comments observed so far.
    pub fn keepalives_seen(&self) -> usize {
        self.decoder.comments_seen()
    }

    /// Next dispatched event; fails if nothing arrives within `wait`.
    pub async fn next_event(&mut self, wait: Duration) -> Result<SseEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            self.read_chunk(wait).await?;
        }
    }

    /// Wait until at least one more keepalive comment has been read.
    pub async fn next_keepalive(&mut self, wait: Duration) -> Result<()> {
        let seen = self.keepalives_seen();
        while self.keepalives_seen() == seen {
            self.read_chunk(wait).await?;
        }
        Ok(())
    }

    /// Next `message` event decoded as a JSON-RPC response.
    pub async fn next_message(&mut self, wait: Duration) -> Result<JsonRpcResponse> {
        loop {
            let event = self.next_event(wait).await?;
            if event.name() != events::MESSAGE {
                debug!(event = event.name(), "Skipping non-message event");
                continue;
            }
            return serde_json::from_str(&event.data)
                .with_context(|| format!("message event is not a JSON-RPC response: {}", event.data));
        }
    }

    /// Next response whose `id` equals `id`, skipping others.
    pub async fn response_for(&mut self, id: &Value, wait: Duration) -> Result<JsonRpcResponse> {
        loop {
            let response = self.next_message(wait).await?;
            if &response.id == id {
                return Ok(response);
            }
            debug!(expected = %id, got = %response.id, "Skipping uncorrelated response");
        }
    }

    async fn read_chunk(&mut self, wait: Duration) -> Result<()> {
        let chunk = tokio::time::timeout(wait, self.stream.next())
            .await
            .map_err(|_| anyhow!("timed out after {:?} waiting for the event stream", wait))?;
        match chunk {
            None => bail!("event stream ended"),
            Some(Err(e)) => Err(e).context("read event stream"),
            Some(Ok(bytes)) => {
                self.pending.extend(self.decoder.push(bytes.as_ref()));
                Ok(())
            }
        }
    }
}
