use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::errors::ApiError;
use crate::external::advisor_backend::AdvisorBackend;
use crate::models::{
    ChatRequest, ChatResponse, HealthStatus, HistoryItem, HistoryRequest, HistoryResponse,
    ProfileStatus, ToolCall, UpdateProfileRequest,
};

/// Scripted in-process backend for unit tests.
///
/// Chat replies are served in the order they were queued. When a gate is set,
/// each call records its request and then waits for the gate before replying.
#[derive(Default)]
pub struct FakeBackend {
    chat_replies: Mutex<VecDeque<Result<ChatResponse, ApiError>>>,
    profile_failure: Mutex<Option<u16>>,
    gate: Option<Arc<Notify>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub profile_requests: Mutex<Vec<UpdateProfileRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn reply(self, text: &str, tools: &[&str]) -> Self {
        self.chat_replies.lock().push_back(Ok(ChatResponse {
            response: text.to_string(),
            tool_calls: tools.iter().map(|name| ToolCall::new(*name)).collect(),
            agent_id: Some("agent-test".to_string()),
        }));
        self
    }

    pub fn fail_chat(self, error: ApiError) -> Self {
        self.chat_replies.lock().push_back(Err(error));
        self
    }

    pub fn fail_profile(self, status: u16) -> Self {
        *self.profile_failure.lock() = Some(status);
        self
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl AdvisorBackend for FakeBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.chat_requests.lock().push(request.clone());
        self.wait_for_gate().await;

        let next = self.chat_replies.lock().pop_front();
        next.unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_string())))
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<(), ApiError> {
        self.profile_requests.lock().push(request.clone());
        self.wait_for_gate().await;

        let failure = *self.profile_failure.lock();
        match failure {
            Some(status) => Err(ApiError::Status { status, detail: None }),
            None => Ok(()),
        }
    }

    async fn history(&self, request: &HistoryRequest) -> Result<HistoryResponse, ApiError> {
        let messages = self
            .chat_requests
            .lock()
            .iter()
            .rev()
            .take(request.limit as usize)
            .map(|r| HistoryItem {
                role: "user".to_string(),
                content: r.message.clone(),
                timestamp: None,
            })
            .collect();

        Ok(HistoryResponse {
            messages,
            user_id: request.user_id.clone(),
        })
    }

    async fn profile_status(&self, user_id: &str) -> Result<ProfileStatus, ApiError> {
        Ok(ProfileStatus {
            user_id: user_id.to_string(),
            message: "Profile retrieved.".to_string(),
        })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            service: "Economic Decision Advisor".to_string(),
            version: "0.1.0".to_string(),
        })
    }
}
