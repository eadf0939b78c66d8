use async_trait::async_trait;

use crate::errors::ApiError;
use crate::models::{
    ChatRequest, ChatResponse, HealthStatus, HistoryRequest, HistoryResponse, ProfileStatus,
    UpdateProfileRequest,
};

/// The remote advisor service. Economic data retrieval and model reasoning
/// happen behind this boundary; the client only sees request/response pairs.
#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;

    /// Any 2xx is success; the response body is not consumed.
    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<(), ApiError>;

    async fn history(&self, request: &HistoryRequest) -> Result<HistoryResponse, ApiError>;

    async fn profile_status(&self, user_id: &str) -> Result<ProfileStatus, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
