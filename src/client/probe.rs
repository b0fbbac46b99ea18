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

//! End-to-end check of a running fixture.
//!
//! Opens the event stream, waits for the `endpoint` event, then walks the
//! MCP handshake and a `say_hello` call over the command address, reading
//! every answer back from the stream.

use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::info;
use url::Url;

use crate::client::events::EventReader;
use crate::core::constants::{events, methods, server, tools};
use crate::core::models::{JsonRpcRequest, JsonRpcResponse};
use crate::mcp::handler::greeting;
use crate::mcp::types::{CallToolResult, ContentBlock, ListToolsResult};

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Stream-open URL, e.g. `http://localhost:8005/sse`
    pub sse_url: Url,
    /// Name passed to `say_hello`; `None` exercises the default.
    pub name: Option<String>,
    /// Upper bound on any single wait for the stream.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub endpoint: Url,
    pub protocol_version: String,
    pub tools: Vec<String>,
    pub greeting: String,
}

pub async fn probe(options: &ProbeOptions) -> Result<ProbeReport> {
    let http = reqwest::Client::new();

    let response = http
        .get(options.sse_url.clone())
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await
        .with_context(|| format!("open event stream at {}", options.sse_url))?
        .error_for_status()
        .context("event stream rejected")?;
    let mut reader = EventReader::new(response.bytes_stream());

    let first = reader.next_event(options.timeout).await?;
    ensure!(
        first.name() == events::ENDPOINT,
        "first event was '{}', expected '{}'",
        first.name(),
        events::ENDPOINT
    );
    let endpoint = options
        .sse_url
        .join(first.data.trim())
        .with_context(|| format!("endpoint event carries an invalid URL: {}", first.data))?;
    info!(endpoint = %endpoint, "Received command endpoint");

    let init = call(
        &http,
        &endpoint,
        &mut reader,
        JsonRpcRequest::new(1, methods::INITIALIZE, Some(json!({
            "protocolVersion": server::PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {"name": "hello-mcp-probe", "version": env!("CARGO_PKG_VERSION")}
        }))),
        options.timeout,
    )
    .await?;
    let protocol_version = init
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    submit(
        &http,
        &endpoint,
        &JsonRpcRequest::notification(methods::NOTIFICATIONS_INITIALIZED, None),
    )
    .await?;

    let listed: ListToolsResult = serde_json::from_value(
        call(
            &http,
            &endpoint,
            &mut reader,
            JsonRpcRequest::new(2, methods::TOOLS_LIST, None),
            options.timeout,
        )
        .await?,
    )
    .context("tools/list result")?;
    let tool_names: Vec<String> = listed.tools.into_iter().map(|t| t.name).collect();
    ensure!(
        tool_names.iter().any(|t| t == tools::SAY_HELLO),
        "catalog does not offer '{}': {:?}",
        tools::SAY_HELLO,
        tool_names
    );

    let arguments = match &options.name {
        Some(name) => json!({ "name": name }),
        None => json!({}),
    };
    let called: CallToolResult = serde_json::from_value(
        call(
            &http,
            &endpoint,
            &mut reader,
            JsonRpcRequest::new(
                3,
                methods::TOOLS_CALL,
                Some(json!({ "name": tools::SAY_HELLO, "arguments": arguments })),
            ),
            options.timeout,
        )
        .await?,
    )
    .context("tools/call result")?;

    let text = called
        .content
        .into_iter()
        .map(|ContentBlock::Text { text }| text)
        .next()
        .context("tools/call returned no content")?;
    let expected = greeting(Some(&arguments));
    ensure!(text == expected, "expected '{}', got '{}'", expected, text);

    Ok(ProbeReport {
        endpoint,
        protocol_version,
        tools: tool_names,
        greeting: text,
    })
}

/// POST a request and wait for its correlated response on the stream.
async fn call<S, B, E>(
    http: &reqwest::Client,
    endpoint: &Url,
    reader: &mut EventReader<S>,
    request: JsonRpcRequest,
    wait: Duration,
) -> Result<Value>
where
    S: futures::Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let id = request.id.clone().unwrap_or(Value::Null);
    submit(http, endpoint, &request).await?;

    let response: JsonRpcResponse = reader
        .response_for(&id, wait)
        .await
        .with_context(|| format!("waiting for '{}' response", request.method))?;
    if let Some(error) = response.error {
        bail!("'{}' failed: {} ({})", request.method, error.message, error.code);
    }
    response
        .result
        .with_context(|| format!("'{}' response carries no result", request.method))
}

async fn submit(http: &reqwest::Client, endpoint: &Url, request: &JsonRpcRequest) -> Result<()> {
    let response = http
        .post(endpoint.clone())
        .json(request)
        .send()
        .await
        .with_context(|| format!("submit '{}'", request.method))?;
    let status = response.status();
    ensure!(
        status == StatusCode::ACCEPTED,
        "'{}' submission answered {} instead of 202",
        request.method,
        status
    );
    Ok(())
}
