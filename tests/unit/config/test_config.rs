// Unit tests for configuration management
// NOTE: These tests must run sequentially to avoid environment variable conflicts

use hello_mcp::config::Config;
use hello_mcp::core::errors::TransportError;
use std::env;
use std::sync::Mutex;
use std::time::Duration;

// Global mutex to serialize environment variable access in tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    env::remove_var("BIND_ADDRESS");
    env::remove_var("PORT");
    env::remove_var("PUBLIC_BASE_URL");
    env::remove_var("KEEPALIVE_SECS");
    env::remove_var("REQUEST_TIMEOUT_SECS");
    env::remove_var("BODY_SIZE_LIMIT_BYTES");
    env::remove_var("LOG_LEVEL");
    env::remove_var("LOG_FORMAT");
}

fn expect_config_error(result: Result<Config, TransportError>, needle: &str) {
    match result {
        Err(TransportError::Configuration(msg)) => {
            assert!(msg.contains(needle), "'{}' does not mention '{}'", msg, needle)
        }
        other => panic!("Expected ConfigurationError, got {:?}", other),
    }
}

#[test]
fn test_config_default_values() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    let config = Config::from_env().unwrap();

    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(config.port, 8005);
    assert_eq!(config.public_base_url, None);
    assert_eq!(config.keepalive(), Duration::from_secs(30));
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.body_size_limit_bytes, 2 * 1024 * 1024);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_format, "text");
    assert_eq!(config.listen_addr(), "0.0.0.0:8005");
}

#[test]
fn test_config_reads_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("BIND_ADDRESS", "127.0.0.1");
    env::set_var("PORT", "9000");
    env::set_var("PUBLIC_BASE_URL", "https://gateway.local/hello");
    env::set_var("KEEPALIVE_SECS", "5");
    env::set_var("LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    clear_env_vars();

    assert_eq!(config.listen_addr(), "127.0.0.1:9000");
    assert_eq!(config.keepalive(), Duration::from_secs(5));
    assert_eq!(config.log_format, "json");
    assert_eq!(
        config.public_base().unwrap().unwrap().as_str(),
        "https://gateway.local/hello"
    );
}

#[test]
fn test_config_invalid_port() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("PORT", "invalid");
    let result = Config::from_env();
    env::set_var("PORT", "0");
    let zero = Config::from_env();
    clear_env_vars();

    expect_config_error(result, "PORT");
    expect_config_error(zero, "PORT");
}

#[test]
fn test_config_zero_keepalive_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("KEEPALIVE_SECS", "0");
    let result = Config::from_env();
    clear_env_vars();

    expect_config_error(result, "KEEPALIVE_SECS");
}

#[test]
fn test_config_invalid_log_format() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("LOG_FORMAT", "xml");
    let result = Config::from_env();
    clear_env_vars();

    expect_config_error(result, "LOG_FORMAT");
}

#[test]
fn test_config_public_base_must_be_http() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("PUBLIC_BASE_URL", "ftp://files.local/");
    let wrong_scheme = Config::from_env();
    env::set_var("PUBLIC_BASE_URL", "not a url");
    let garbage = Config::from_env();
    clear_env_vars();

    expect_config_error(wrong_scheme, "PUBLIC_BASE_URL");
    expect_config_error(garbage, "PUBLIC_BASE_URL");
}

#[test]
fn test_validate_catches_cli_overrides() {
    let config = Config {
        keepalive_secs: 0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(TransportError::Configuration(_))
    ));
}
