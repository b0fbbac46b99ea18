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

// Domain error types - no internal detail reaches the HTTP surface

use thiserror::Error;

/// Main error type for the session transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// Unknown, expired or missing session id (HTTP 400)
    #[error("Invalid or missing session_id")]
    InvalidSession,

    /// Body is not a JSON-RPC request object (HTTP 400)
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Configuration error (HTTP 500)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Session state error (HTTP 500)
    #[error("State error: {0}")]
    State(String),
}

impl TransportError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TransportError::InvalidSession => 400,
            TransportError::MalformedRequest(_) => 400,
            TransportError::Configuration(_) => 500,
            TransportError::State(_) => 500,
        }
    }

    /// Get user-facing error message (no parser or state detail)
    pub fn user_message(&self) -> String {
        match self {
            TransportError::InvalidSession => "Invalid or missing session_id".to_string(),
            TransportError::MalformedRequest(_) => "Invalid JSON-RPC request".to_string(),
            TransportError::Configuration(_) => "Internal error".to_string(),
            TransportError::State(_) => "Internal error".to_string(),
        }
    }
}
