mod message;
mod tool_call;
mod profile;
pub mod api;

pub use message::{Message, MessageIdGenerator, Role};
pub use tool_call::ToolCall;
pub use profile::{
    ProfileData, RiskTolerance, DEBT_LEVELS, INCOME_RANGES, PREFER_NOT_TO_SAY, SAVINGS_BUCKETS,
};
pub use api::{
    ChatRequest, ChatResponse, HealthStatus, HistoryItem, HistoryRequest, HistoryResponse,
    ProfileStatus, UpdateProfileRequest,
};
