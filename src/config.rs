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

// Configuration management

use crate::core::constants::config::*;
use crate::core::errors::TransportError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

/// Server configuration loaded from environment variables
///
/// All values are validated on load with clear error messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub bind_address: String,
    pub port: u16,

    // Absolute base for the endpoint event URL; derived from the request when unset
    pub public_base_url: Option<String>,

    // Stream and middleware configuration
    pub keepalive_secs: u64,
    pub request_timeout_secs: u64,
    pub body_size_limit_bytes: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Returns
    /// * `Result<Self, TransportError>` - Config instance or validation error
    pub fn from_env() -> Result<Self, TransportError> {
        let config = Self {
            bind_address: Self::get_env_or_default(ENV_BIND_ADDRESS, DEFAULT_BIND_ADDRESS),
            port: Self::parse_port()?,
            public_base_url: Self::get_optional_env(ENV_PUBLIC_BASE_URL),
            keepalive_secs: Self::parse_u64_or_default(ENV_KEEPALIVE_SECS, DEFAULT_KEEPALIVE_SECS)?,
            request_timeout_secs: Self::parse_u64_or_default(
                ENV_REQUEST_TIMEOUT_SECS,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            body_size_limit_bytes: Self::parse_usize_or_default(
                ENV_BODY_SIZE_LIMIT_BYTES,
                DEFAULT_BODY_SIZE_LIMIT_BYTES,
            )?,
            log_level: Self::get_env_or_default(ENV_LOG_LEVEL, "info"),
            log_format: Self::get_env_or_default(ENV_LOG_FORMAT, "text"),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.bind_address.trim().is_empty() {
            return Err(TransportError::Configuration(format!(
                "{} is empty",
                ENV_BIND_ADDRESS
            )));
        }

        if self.port == 0 {
            return Err(TransportError::Configuration(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        if self.keepalive_secs == 0 || self.request_timeout_secs == 0 || self.body_size_limit_bytes == 0 {
            return Err(TransportError::Configuration(
                "Timeouts and size limits must be greater than 0".to_string(),
            ));
        }

        if self.log_format != "json" && self.log_format != "text" {
            return Err(TransportError::Configuration(format!(
                "Invalid {} value '{}': expected 'json' or 'text'",
                ENV_LOG_FORMAT, self.log_format
            )));
        }

        if let Some(base) = &self.public_base_url {
            self.parse_public_base_url(base)?;
        }

        Ok(())
    }

    /// Parsed public base URL, if configured
    pub fn public_base(&self) -> Result<Option<Url>, TransportError> {
        self.public_base_url
            .as_deref()
            .map(|base| self.parse_public_base_url(base))
            .transpose()
    }

    fn parse_public_base_url(&self, base: &str) -> Result<Url, TransportError> {
        let url = Url::parse(base).map_err(|e| {
            TransportError::Configuration(format!(
                "Invalid {} value '{}': {}",
                ENV_PUBLIC_BASE_URL, base, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(TransportError::Configuration(format!(
                "{} must be an http(s) URL",
                ENV_PUBLIC_BASE_URL
            )));
        }

        Ok(url)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get environment variable or return default value
    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get optional environment variable
    fn get_optional_env(key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    /// Parse port from PORT environment variable
    fn parse_port() -> Result<u16, TransportError> {
        let port_str = match env::var(ENV_PORT) {
            Ok(value) => value,
            Err(_) => return Ok(DEFAULT_PORT),
        };
        let port = port_str.parse::<u16>().map_err(|e| {
            TransportError::Configuration(format!("Invalid PORT value '{}': {}", port_str, e))
        })?;

        if port == 0 {
            return Err(TransportError::Configuration(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(port)
    }

    /// Parse a positive u64 from environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, TransportError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    TransportError::Configuration(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(TransportError::Configuration(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Parse a positive usize from environment variable or return default
    fn parse_usize_or_default(key: &str, default: usize) -> Result<usize, TransportError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<usize>().map_err(|e| {
                    TransportError::Configuration(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(TransportError::Configuration(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Configuration for in-process tests: fixed public base and a short
    /// keepalive so idle pings show up quickly.
    pub fn test_config() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            public_base_url: Some("http://localhost:8005".to_string()),
            keepalive_secs: 1,
            request_timeout_secs: 5,
            body_size_limit_bytes: 64 * 1024,
            log_level: "debug".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            public_base_url: None,
            keepalive_secs: DEFAULT_KEEPALIVE_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            body_size_limit_bytes: DEFAULT_BODY_SIZE_LIMIT_BYTES,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}
