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

use async_trait::async_trait;
use serde_json::Value;

use crate::core::constants::tools;
use crate::mcp::types::{CallToolParams, CallToolResult, ListToolsResult, ServerInfo, Tool};

/// Tool surface behind the method table.
#[async_trait]
pub trait McpHandler: Send + Sync {
    fn server_info(&self) -> ServerInfo;

    async fn list_tools(&self) -> ListToolsResult;

    /// Returns `None` when no tool is registered under `params.name`.
    async fn call_tool(&self, params: CallToolParams) -> Option<CallToolResult>;
}

/// The fixture's one-tool catalog: `say_hello`.
#[derive(Debug, Clone, Default)]
pub struct HelloWorld;

impl HelloWorld {
    pub fn say_hello_tool() -> Tool {
        Tool {
            name: tools::SAY_HELLO.to_string(),
            description: tools::SAY_HELLO_DESCRIPTION.to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name to greet"
                    }
                }
            }),
        }
    }
}

/// `Hello, <name>!` with `name` taken from the call arguments.
///
/// Strings render verbatim, other non-null values as their JSON text, and
/// a missing or null name falls back to `World`.
pub fn greeting(arguments: Option<&Value>) -> String {
    let name = match arguments.and_then(|args| args.get("name")) {
        None | Some(Value::Null) => tools::DEFAULT_NAME.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    format!("Hello, {}!", name)
}

#[async_trait]
impl McpHandler for HelloWorld {
    fn server_info(&self) -> ServerInfo {
        ServerInfo::default()
    }

    async fn list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: vec![Self::say_hello_tool()],
        }
    }

    async fn call_tool(&self, params: CallToolParams) -> Option<CallToolResult> {
        match params.name.as_deref() {
            Some(tools::SAY_HELLO) => Some(CallToolResult::text(greeting(
                params.arguments.as_ref(),
            ))),
            _ => None,
        }
    }
}
