// Unit tests for error mapping at the HTTP surface

use hello_mcp::core::errors::TransportError;

#[test]
fn test_client_errors_are_400() {
    assert_eq!(TransportError::InvalidSession.status_code(), 400);
    assert_eq!(
        TransportError::MalformedRequest("expected value at line 1".to_string()).status_code(),
        400
    );
}

#[test]
fn test_user_message_hides_parser_detail() {
    let err = TransportError::MalformedRequest("expected value at line 1 column 1".to_string());
    let message = err.user_message();

    assert_eq!(message, "Invalid JSON-RPC request");
    assert!(!message.contains("line 1"));
    // Display keeps the detail for logs
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn test_internal_errors_are_opaque() {
    for err in [
        TransportError::Configuration("PORT".to_string()),
        TransportError::State("lock".to_string()),
    ] {
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), "Internal error");
    }
}
