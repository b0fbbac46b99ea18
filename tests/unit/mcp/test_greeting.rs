// Property tests for the say_hello greeting

use hello_mcp::mcp::handler::greeting;
use proptest::prelude::*;
use serde_json::{json, Value};

#[test]
fn test_greeting_defaults_to_world() {
    assert_eq!(greeting(None), "Hello, World!");
    assert_eq!(greeting(Some(&json!({}))), "Hello, World!");
    assert_eq!(greeting(Some(&json!({"name": null}))), "Hello, World!");
    assert_eq!(greeting(Some(&json!("not an object"))), "Hello, World!");
}

#[test]
fn test_greeting_renders_non_strings_as_json() {
    assert_eq!(greeting(Some(&json!({"name": 42}))), "Hello, 42!");
    assert_eq!(greeting(Some(&json!({"name": true}))), "Hello, true!");
    assert_eq!(greeting(Some(&json!({"name": ["a"]}))), "Hello, [\"a\"]!");
}

proptest! {
    #[test]
    fn prop_string_names_are_verbatim(name in ".*") {
        let arguments = json!({ "name": name.clone() });
        prop_assert_eq!(greeting(Some(&arguments)), format!("Hello, {}!", name));
    }

    #[test]
    fn prop_extra_arguments_are_ignored(name in "[a-zA-Z ]{0,16}", extra in any::<i64>()) {
        let arguments = json!({ "name": name.clone(), "extra": extra });
        prop_assert_eq!(greeting(Some(&arguments)), format!("Hello, {}!", name));
        prop_assert_eq!(greeting(Some(&Value::Null)), "Hello, World!".to_string());
    }
}
