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

//! Fixture constants - single source of truth for protocol values,
//! identities, routes and configuration defaults.

/// JSON-RPC 2.0 Error Codes
pub mod jsonrpc {
    /// Protocol version carried in every envelope
    pub const VERSION: &str = "2.0";
    /// Method not found (standard JSON-RPC)
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
    pub const MESSAGE_METHOD_NOT_FOUND: &str = "Method not found";
}

/// MCP Protocol Methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const NOTIFICATIONS_INITIALIZED: &str = "notifications/initialized";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
}

/// Server identity advertised by `initialize`
pub mod server {
    pub const PROTOCOL_VERSION: &str = "2024-11-05";
    pub const NAME: &str = "hello-world";
    pub const VERSION: &str = "1.0.0";
}

/// The single tool in the catalog
pub mod tools {
    pub const SAY_HELLO: &str = "say_hello";
    pub const SAY_HELLO_DESCRIPTION: &str = "Says hello to someone";
    pub const DEFAULT_NAME: &str = "World";
}

/// HTTP surface
pub mod routes {
    pub const SSE: &str = "/sse";
    pub const MESSAGES: &str = "/messages";
    pub const HEALTH: &str = "/health";
    pub const SESSION_ID_PARAM: &str = "session_id";
}

/// SSE event names and keepalive comment
pub mod events {
    pub const ENDPOINT: &str = "endpoint";
    pub const MESSAGE: &str = "message";
    pub const KEEPALIVE_COMMENT: &str = "ping";
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const ENV_PORT: &str = "PORT";
    pub const ENV_PUBLIC_BASE_URL: &str = "PUBLIC_BASE_URL";
    pub const ENV_KEEPALIVE_SECS: &str = "KEEPALIVE_SECS";
    pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    pub const ENV_BODY_SIZE_LIMIT_BYTES: &str = "BODY_SIZE_LIMIT_BYTES";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8005;
    pub const DEFAULT_KEEPALIVE_SECS: u64 = 30;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// 2 MB
    pub const DEFAULT_BODY_SIZE_LIMIT_BYTES: usize = 2 * 1024 * 1024;
}
