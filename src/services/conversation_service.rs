use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::errors::ApiError;
use crate::external::AdvisorBackend;
use crate::models::{
    ChatRequest, ChatResponse, HistoryItem, HistoryRequest, Message, MessageIdGenerator, Role,
    ToolCall,
};

pub const WELCOME_MESSAGE: &str = "Hello! I'm your Economic Decision Advisor. I can help you \
make everyday financial decisions using live economic data such as inflation, interest rates, \
employment figures, exchange rates and financial news. What would you like to know?";

pub const CHAT_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    RequestInFlight,
}

/// What happened to a `send_message` call. The session's visible state is
/// the same whether or not the caller looks at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Ignored(IgnoreReason),
    Answered,
    Failed,
}

/// Point-in-time copy of everything the presentation layer draws.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub messages: Vec<Message>,
    pub tool_calls: Vec<ToolCall>,
}

struct SessionState {
    phase: SessionPhase,
    messages: Vec<Message>,
    tool_calls: Vec<ToolCall>,
}

/// Owns one in-memory conversation with the advisor.
///
/// The log is append-only and starts with a local welcome message. At most
/// one chat request is outstanding at a time; calls made while one is in
/// flight are dropped, not queued.
pub struct ConversationSession {
    backend: Arc<dyn AdvisorBackend>,
    user_id: String,
    request_timeout: Duration,
    ids: MessageIdGenerator,
    state: Mutex<SessionState>,
}

impl ConversationSession {
    pub fn new(backend: Arc<dyn AdvisorBackend>, user_id: String, request_timeout: Duration) -> Self {
        let ids = MessageIdGenerator::new();
        let welcome = ids.message(Role::Assistant, WELCOME_MESSAGE);

        Self {
            backend,
            user_id,
            request_timeout,
            ids,
            state: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                messages: vec![welcome],
                tool_calls: Vec::new(),
            }),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == SessionPhase::Loading
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.lock().messages.clone()
    }

    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.state.lock().tool_calls.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            phase: state.phase,
            messages: state.messages.clone(),
            tool_calls: state.tool_calls.clone(),
        }
    }

    pub async fn send_message(&self, text: &str) -> SendOutcome {
        self.send_message_with_cancel(text, CancellationToken::new()).await
    }

    /// Run one request/response cycle. Cancelling the token or hitting the
    /// request timeout resolves the turn exactly like a network failure.
    pub async fn send_message_with_cancel(
        &self,
        text: &str,
        cancel: CancellationToken,
    ) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        {
            let mut state = self.state.lock();
            if state.phase == SessionPhase::Loading {
                debug!("Dropping chat message while a request is in flight");
                return SendOutcome::Ignored(IgnoreReason::RequestInFlight);
            }
            state.messages.push(self.ids.message(Role::User, text));
            state.phase = SessionPhase::Loading;
            state.tool_calls.clear();
        }

        let flight = InFlight::new(self);

        let request = ChatRequest {
            user_id: self.user_id.clone(),
            message: text.to_string(),
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            reply = tokio::time::timeout(self.request_timeout, self.backend.chat(&request)) => {
                reply.unwrap_or_else(|_| Err(ApiError::Timeout))
            }
        };

        flight.complete(result)
    }

    /// Fetch the backend's stored transcript for this user. Read-only: the
    /// local log is not touched.
    pub async fn load_history(&self, limit: u32) -> Result<Vec<HistoryItem>, ApiError> {
        let request = HistoryRequest {
            user_id: self.user_id.clone(),
            limit,
        };

        let history = tokio::time::timeout(self.request_timeout, self.backend.history(&request))
            .await
            .unwrap_or_else(|_| Err(ApiError::Timeout))?;

        info!("Loaded {} history messages for {}", history.messages.len(), self.user_id);
        Ok(history.messages)
    }

    fn fail_turn(&self, state: &mut SessionState) {
        state.messages.push(self.ids.message(Role::Assistant, CHAT_ERROR_MESSAGE));
        state.phase = SessionPhase::Idle;
    }
}

/// Holds the session in `Loading` for one request. Returning to `Idle`
/// happens exactly once: in `complete`, or in `Drop` if the call is abandoned
/// or unwinds before completing.
struct InFlight<'a> {
    session: &'a ConversationSession,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a ConversationSession) -> Self {
        Self { session, done: false }
    }

    fn complete(mut self, result: Result<ChatResponse, ApiError>) -> SendOutcome {
        let session = self.session;
        let mut state = session.state.lock();
        self.done = true;

        match result {
            Ok(reply) => {
                info!(
                    "Advisor replied to {} (agent: {}, tool calls: {})",
                    session.user_id,
                    reply.agent_id.as_deref().unwrap_or("unknown"),
                    reply.tool_calls.len()
                );
                state.messages.push(session.ids.message(Role::Assistant, reply.response));
                if !reply.tool_calls.is_empty() {
                    state.tool_calls = reply.tool_calls;
                }
                state.phase = SessionPhase::Idle;
                SendOutcome::Answered
            }
            Err(e) => {
                error!("Chat request for {} failed: {}", session.user_id, e);
                session.fail_turn(&mut state);
                SendOutcome::Failed
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        error!("Chat request for {} abandoned before completion", self.session.user_id);
        let mut state = self.session.state.lock();
        self.session.fail_turn(&mut state);
    }
}
