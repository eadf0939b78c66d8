//! Request and response bodies exchanged with the advisor backend.

use serde::{Deserialize, Serialize};

use super::{ProfileData, ToolCall};

/// `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

/// `POST /profile/update`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileRequest {
    pub user_id: String,
    pub profile: ProfileData,
}

/// `POST /history`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRequest {
    pub user_id: String,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryItem {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryResponse {
    pub messages: Vec<HistoryItem>,
    pub user_id: String,
}

/// `GET /profile/{user_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileStatus {
    pub user_id: String,
    pub message: String,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Error body produced by the backend on failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_response_without_tool_calls() {
        let body: ChatResponse = serde_json::from_value(json!({"response": "Hi"})).unwrap();
        assert_eq!(body.response, "Hi");
        assert!(body.tool_calls.is_empty());
        assert!(body.agent_id.is_none());
    }

    #[test]
    fn test_chat_response_with_encoded_and_null_tool_arguments() {
        let body: ChatResponse = serde_json::from_value(json!({
            "response": "CPI is 3.1%.",
            "tool_calls": [
                {"name": "get_inflation_rate", "arguments": "{\"months\": 12}"},
                {"name": "get_financial_news", "arguments": null}
            ]
        }))
        .unwrap();

        assert_eq!(body.response, "CPI is 3.1%.");
        assert_eq!(body.tool_calls.len(), 2);
        assert_eq!(body.tool_calls[0].arguments, json!("{\"months\": 12}"));
        assert!(body.tool_calls[1].arguments.is_null());
    }

    #[test]
    fn test_chat_response_requires_response_field() {
        let result = serde_json::from_value::<ChatResponse>(json!({"tool_calls": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_request_shape() {
        let req = ChatRequest {
            user_id: "user_1_abcdefghi".to_string(),
            message: "Should I refinance?".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"user_id": "user_1_abcdefghi", "message": "Should I refinance?"})
        );
    }

    #[test]
    fn test_error_body_detail_text() {
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Failed to process message: boom"})).unwrap();
        assert_eq!(body.detail_text(), "Failed to process message: boom");

        let body: ErrorBody =
            serde_json::from_value(json!({"detail": [{"loc": ["body", "message"]}]})).unwrap();
        assert!(body.detail_text().contains("message"));
    }
}
