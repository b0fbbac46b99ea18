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

//! Closed method table.
//!
//! `initialize`, `notifications/initialized`, `tools/list` and `tools/call`
//! are the only methods served; everything else, including a `tools/call`
//! naming an unknown tool, answers with the JSON-RPC method-not-found
//! envelope. Requests without an `id` are notifications and never answer.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::core::constants::methods;
use crate::core::models::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::handler::McpHandler;
use crate::mcp::types::{CallToolParams, InitializeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    Initialized,
    ToolsList,
    ToolsCall,
    Unknown,
}

impl Method {
    pub fn parse(name: &str) -> Self {
        match name {
            methods::INITIALIZE => Method::Initialize,
            methods::NOTIFICATIONS_INITIALIZED => Method::Initialized,
            methods::TOOLS_LIST => Method::ToolsList,
            methods::TOOLS_CALL => Method::ToolsCall,
            _ => Method::Unknown,
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    handler: Arc<dyn McpHandler>,
}

impl Dispatcher {
    pub fn new(handler: Arc<dyn McpHandler>) -> Self {
        Self { handler }
    }

    /// Route one request. `None` means nothing is sent back.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let method = Method::parse(&request.method);
        debug!(
            method = %request.method,
            route = ?method,
            notification = request.is_notification(),
            "Dispatching"
        );

        if method == Method::Initialized {
            return None;
        }
        let id = request.id?;

        let response = match method {
            Method::Initialize => ok(id, InitializeResult::for_server(self.handler.server_info())),
            Method::ToolsList => ok(id, self.handler.list_tools().await),
            Method::ToolsCall => {
                let params = CallToolParams::from_params(request.params.as_ref());
                match self.handler.call_tool(params).await {
                    Some(result) => ok(id, result),
                    None => method_not_found(id),
                }
            }
            Method::Initialized | Method::Unknown => method_not_found(id),
        };
        Some(response)
    }
}

fn ok(id: Value, result: impl Serialize) -> JsonRpcResponse {
    JsonRpcResponse::ok(id, serde_json::to_value(result).unwrap_or(Value::Null))
}

fn method_not_found(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::err(id, JsonRpcError::method_not_found())
}
