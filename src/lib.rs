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

//! hello-mcp: the Hello World MCP fixture.
//!
//! A minimal MCP server speaking the SSE transport: clients open a long-lived
//! event stream, receive a per-session command address as the first event,
//! POST JSON-RPC requests to that address, and read every response back from
//! the stream. Used to validate that a gateway can discover and invoke tools
//! on an upstream server.

pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod mcp;
pub mod session;
pub mod sse;

pub use crate::api::{create_router, AppState};
pub use crate::config::Config;
pub use crate::session::{Session, SessionRegistry};
