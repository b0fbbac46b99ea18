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

// Request handlers for API endpoints

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{sse::Event, Json, Sse},
};
use futures::Stream;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::responses::{ApiError, HealthResponse};
use crate::api::stream::session_events;
use crate::api::AppState;
use crate::config::Config;
use crate::core::constants::routes;
use crate::core::errors::TransportError;
use crate::core::models::{JsonRpcRequest, SessionId};

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub session_id: Option<String>,
}

/// Stream-open handler
///
/// GET /sse
///
/// Registers a new session and answers with its event stream. The session is
/// deregistered when the stream is dropped.
pub async fn sse_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let session = app_state.registry.open();
    let endpoint = endpoint_url(&app_state.config, &headers, session.id())?;

    info!(session_id = %session.id(), endpoint = %endpoint, "Event stream opened");

    Ok(Sse::new(session_events(
        session,
        endpoint,
        app_state.config.keepalive(),
        app_state.shutdown.clone(),
    )))
}

/// Command-submission handler
///
/// POST /messages?session_id=<id>
///
/// Request flow:
/// 1. Reject unknown, expired, missing or unparseable session ids with 400
/// 2. Parse the JSON-RPC request (400 on garbage)
/// 3. Dispatch; queue any response onto the session's stream
/// 4. Acknowledge with 202 and an empty body
pub async fn messages_handler(
    State(app_state): State<AppState>,
    query: Result<Query<MessagesQuery>, QueryRejection>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let Query(query) = query.map_err(|e| {
        warn!(error = %e, "Rejected submission with unparseable query");
        TransportError::InvalidSession
    })?;

    let session_id = query
        .session_id
        .as_deref()
        .and_then(|raw| raw.parse::<SessionId>().ok())
        .filter(|id| app_state.registry.contains(id))
        .ok_or_else(|| {
            warn!(session_id = ?query.session_id, "Rejected submission for unknown session");
            TransportError::InvalidSession
        })?;

    let request: JsonRpcRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(session_id = %session_id, error = %e, "Rejected malformed JSON-RPC body");
        TransportError::MalformedRequest(e.to_string())
    })?;

    debug!(
        session_id = %session_id,
        method = %request.method,
        request_id = ?request.id,
        "Received command"
    );

    if let Some(response) = app_state.dispatcher.dispatch(request).await {
        app_state.registry.enqueue(&session_id, response).map_err(|e| {
            warn!(session_id = %session_id, "Session closed before response could be queued");
            e
        })?;
    }

    Ok(StatusCode::ACCEPTED)
}

/// Health check handler
///
/// GET /health
pub async fn health_handler(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        sessions: app_state.registry.len(),
    })
}

/// Absolute command address for a session.
///
/// Base resolution order: configured public base URL, then the request's
/// `Host` (scheme from `X-Forwarded-Proto`, default http), then the listen
/// address.
pub fn endpoint_url(
    config: &Config,
    headers: &HeaderMap,
    session_id: SessionId,
) -> Result<Url, TransportError> {
    let mut base = match config.public_base()? {
        Some(base) => base,
        None => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("http");
            let host = headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .unwrap_or_else(|| config.listen_addr());
            Url::parse(&format!("{}://{}", scheme, host)).map_err(|e| {
                TransportError::MalformedRequest(format!("cannot build base URL: {}", e))
            })?
        }
    };

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base
        .join(routes::MESSAGES.trim_start_matches('/'))
        .map_err(|e| TransportError::State(format!("cannot build endpoint URL: {}", e)))?;
    url.query_pairs_mut()
        .clear()
        .append_pair(routes::SESSION_ID_PARAM, &session_id.to_string());

    Ok(url)
}
