use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A backend-reported data-source invocation, shown for transparency only.
///
/// `arguments` is never interpreted by the client. The backend may send an
/// object, a JSON-encoded string, or `null`; all are kept as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub name: String,
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Map::new())
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: empty_arguments(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_arguments_default_to_empty() {
        let call: ToolCall = serde_json::from_value(json!({"name": "get_interest_rate"})).unwrap();
        assert_eq!(call, ToolCall::new("get_interest_rate"));
    }

    #[test]
    fn test_arguments_kept_verbatim() {
        let call: ToolCall = serde_json::from_value(json!({
            "name": "get_exchange_rate",
            "arguments": {"from_currency": "USD", "to_currency": "JPY", "amount": 250.0}
        }))
        .unwrap();

        assert_eq!(call.arguments.get("to_currency"), Some(&json!("JPY")));
        assert_eq!(call.arguments.as_object().map(|m| m.len()), Some(3));
    }

    #[test]
    fn test_string_and_null_arguments_accepted() {
        let encoded: ToolCall = serde_json::from_value(json!({
            "name": "get_inflation_rate",
            "arguments": "{\"months\": 12}"
        }))
        .unwrap();
        assert_eq!(encoded.arguments, json!("{\"months\": 12}"));

        let null: ToolCall =
            serde_json::from_value(json!({"name": "get_financial_news", "arguments": null})).unwrap();
        assert!(null.arguments.is_null());
    }
}
