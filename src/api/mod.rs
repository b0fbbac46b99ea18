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

// Axum web server layer

use axum::{
    extract::DefaultBodyLimit,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, post},
    BoxError, Router,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub mod handlers;
pub mod responses;
pub mod stream;

use crate::config::Config;
use crate::core::constants::routes;
use crate::mcp::{Dispatcher, HelloWorld, McpHandler};
use crate::session::SessionRegistry;

/// Application state shared by every handler
///
/// All components are cheap to clone; the registry is the only shared
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub dispatcher: Dispatcher,
    pub config: Arc<Config>,
    /// Cancelled on server shutdown; open event streams end when it fires.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Config, handler: Arc<dyn McpHandler>) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            dispatcher: Dispatcher::new(handler),
            config: Arc::new(config),
            shutdown: CancellationToken::new(),
        }
    }

    /// State serving the `say_hello` catalog
    pub fn hello_world(config: Config) -> Self {
        Self::new(config, Arc::new(HelloWorld))
    }
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Tracing (tower-http::trace)
/// - Body size limit (tower-http::limit) - 413 past `body_size_limit_bytes`;
///   axum's own default limit is disabled so this is the only one
/// - Request timeout (tower::timeout) - `/messages` and `/health` only;
///   the event stream is long-lived
pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.body_size_limit_bytes;
    let timeout = app_state.config.request_timeout();

    let request_routes = Router::new()
        .route(routes::MESSAGES, post(handlers::messages_handler))
        .route(routes::HEALTH, get(handlers::health_handler))
        .layer(
            ServiceBuilder::new()
                // HandleErrorLayer must come before timeout to catch Elapsed
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(timeout),
        );

    Router::new()
        .route(routes::SSE, get(handlers::sse_handler))
        .merge(request_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    let status = if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, err.to_string())
}
