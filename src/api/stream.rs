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

//! Per-session event stream.
//!
//! The first event is always `endpoint` carrying the command address. After
//! that the stream waits on the session queue with a bounded wait: a queued
//! response becomes a `message` event, an idle wait becomes a `: ping`
//! comment. The stream owns the [`Session`], so when the client goes away
//! and the body is dropped the session leaves the registry with it.

use std::time::Duration;

use axum::response::sse::Event;
use futures::stream::{self, Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::core::constants::events;
use crate::session::{Recv, Session};

struct StreamState {
    session: Session,
    keepalive: Duration,
    shutdown: CancellationToken,
}

pub fn session_events(
    session: Session,
    endpoint: Url,
    keepalive: Duration,
    shutdown: CancellationToken,
) -> impl Stream<Item = Result<Event, axum::Error>> + Send + 'static {
    let endpoint_event = Event::default()
        .event(events::ENDPOINT)
        .data(endpoint.as_str());

    let state = StreamState {
        session,
        keepalive,
        shutdown,
    };

    stream::once(async move { Ok(endpoint_event) }).chain(stream::unfold(state, next_event))
}

async fn next_event(mut state: StreamState) -> Option<(Result<Event, axum::Error>, StreamState)> {
    let recv = tokio::select! {
        _ = state.shutdown.cancelled() => {
            debug!(session_id = %state.session.id(), "Shutdown, ending event stream");
            return None;
        }
        recv = state.session.recv_timeout(state.keepalive) => recv,
    };

    match recv {
        Recv::Message(response) => {
            debug!(session_id = %state.session.id(), id = %response.id, "Delivering response");
            let event = Event::default().event(events::MESSAGE).json_data(&response);
            Some((event, state))
        }
        Recv::Idle => Some((Ok(Event::default().comment(events::KEEPALIVE_COMMENT)), state)),
        Recv::Closed => None,
    }
}
