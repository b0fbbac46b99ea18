// Unit tests for the closed method table

use hello_mcp::core::models::JsonRpcRequest;
use hello_mcp::mcp::{Dispatcher, HelloWorld, Method};
use serde_json::{json, Value};
use std::sync::Arc;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(HelloWorld))
}

async fn result_of(request: JsonRpcRequest) -> Value {
    let response = dispatcher().dispatch(request).await.expect("response expected");
    assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
    response.result.expect("result expected")
}

#[test]
fn test_method_parse() {
    assert_eq!(Method::parse("initialize"), Method::Initialize);
    assert_eq!(Method::parse("notifications/initialized"), Method::Initialized);
    assert_eq!(Method::parse("tools/list"), Method::ToolsList);
    assert_eq!(Method::parse("tools/call"), Method::ToolsCall);
    assert_eq!(Method::parse("Tools/List"), Method::Unknown);
    assert_eq!(Method::parse("resources/list"), Method::Unknown);
}

#[tokio::test]
async fn test_initialize_descriptor() {
    let result = result_of(JsonRpcRequest::new(1, "initialize", Some(json!({})))).await;

    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["capabilities"], json!({"tools": {}}));
    assert_eq!(result["serverInfo"], json!({"name": "hello-world", "version": "1.0.0"}));
}

#[tokio::test]
async fn test_tools_list_catalog() {
    let result = result_of(JsonRpcRequest::new(2, "tools/list", None)).await;
    let tools = result["tools"].as_array().unwrap();

    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "say_hello");
    assert_eq!(tools[0]["description"], "Says hello to someone");
    assert_eq!(tools[0]["inputSchema"]["properties"]["name"]["type"], "string");
}

#[tokio::test]
async fn test_say_hello_variants() {
    let cases = [
        (json!({"name": "say_hello", "arguments": {"name": "X"}}), "Hello, X!"),
        (json!({"name": "say_hello", "arguments": {}}), "Hello, World!"),
        (json!({"name": "say_hello"}), "Hello, World!"),
        (json!({"name": "say_hello", "arguments": {"name": ""}}), "Hello, !"),
    ];

    for (params, expected) in cases {
        let result = result_of(JsonRpcRequest::new(3, "tools/call", Some(params))).await;
        assert_eq!(result["content"], json!([{"type": "text", "text": expected}]));
    }
}

#[tokio::test]
async fn test_unknown_method_preserves_id() {
    for id in [json!(7), json!("req-7")] {
        let response = dispatcher()
            .dispatch(JsonRpcRequest::new(id.clone(), "prompts/list", None))
            .await
            .unwrap();

        assert_eq!(response.id, id);
        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not found");
    }
}

#[tokio::test]
async fn test_unknown_tool_is_method_not_found() {
    let response = dispatcher()
        .dispatch(JsonRpcRequest::new(
            9,
            "tools/call",
            Some(json!({"name": "say_goodbye", "arguments": {}})),
        ))
        .await
        .unwrap();

    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_notifications_are_silent() {
    let d = dispatcher();

    assert!(d
        .dispatch(JsonRpcRequest::notification("notifications/initialized", None))
        .await
        .is_none());
    assert!(d
        .dispatch(JsonRpcRequest::notification("tools/list", None))
        .await
        .is_none());
    // Initialized stays silent even when a client attaches an id
    assert!(d
        .dispatch(JsonRpcRequest::new(5, "notifications/initialized", None))
        .await
        .is_none());
}

#[tokio::test]
async fn test_null_id_is_answered_with_null_id() {
    let request: JsonRpcRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","method":"tools/list","id":null}"#).unwrap();

    let response = dispatcher()
        .dispatch(request)
        .await
        .expect("a request with an explicit null id is answered");

    assert_eq!(response.id, Value::Null);
    assert_eq!(response.result.unwrap()["tools"][0]["name"], "say_hello");
}
