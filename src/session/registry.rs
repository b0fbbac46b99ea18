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

//! Session registry.
//!
//! Maps each open event stream's `SessionId` to the sending half of its
//! pending-response queue. The stream owns the receiving half inside a
//! [`Session`]; dropping the `Session` (stream finished, client gone, task
//! unwound) removes the entry, so a session id is submittable exactly while
//! its stream is alive.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::errors::TransportError;
use crate::core::models::{JsonRpcResponse, SessionId};

type Outbox = mpsc::UnboundedSender<JsonRpcResponse>;

/// Process-local mapping of open sessions. Construct one per server (or per
/// test) and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Outbox>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh session with an empty queue.
    ///
    /// The generated id is guaranteed distinct from every currently open
    /// session's id.
    pub fn open(self: &Arc<Self>) -> Session {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let id = loop {
            let candidate = SessionId::generate();
            if let Entry::Vacant(slot) = sessions.entry(candidate) {
                slot.insert(tx);
                break candidate;
            }
        };
        let open_sessions = sessions.len();
        drop(sessions);

        info!(session_id = %id, open_sessions, "Session opened");

        Session {
            id,
            receiver: rx,
            registry: Arc::clone(self),
        }
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Append a response to the session's queue.
    ///
    /// Fails with `InvalidSession` without touching any state when the
    /// session is not open.
    pub fn enqueue(&self, id: &SessionId, response: JsonRpcResponse) -> Result<(), TransportError> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let outbox = sessions.get(id).ok_or(TransportError::InvalidSession)?;
        outbox
            .send(response)
            .map_err(|_| TransportError::InvalidSession)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: &SessionId) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }
}

/// Outcome of one bounded wait on a session queue.
#[derive(Debug)]
pub enum Recv {
    Message(JsonRpcResponse),
    /// Nothing arrived within the wait.
    Idle,
    /// The queue's sender is gone.
    Closed,
}

/// Owning handle for one open session.
///
/// Holds the receiving half of the queue. Dropping it deregisters the
/// session.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    receiver: mpsc::UnboundedReceiver<JsonRpcResponse>,
    registry: Arc<SessionRegistry>,
}

impl Session {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Wait up to `wait` for the next queued response. Cancel-safe.
    pub async fn recv_timeout(&mut self, wait: Duration) -> Recv {
        match tokio::time::timeout(wait, self.receiver.recv()).await {
            Ok(Some(response)) => Recv::Message(response),
            Ok(None) => Recv::Closed,
            Err(_) => Recv::Idle,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Runs before `receiver` is dropped, so no submission can observe a
        // registered session whose queue is already gone.
        if self.registry.remove(&self.id) {
            info!(session_id = %self.id, "Session closed");
        } else {
            debug!(session_id = %self.id, "Session already removed");
        }
    }
}
