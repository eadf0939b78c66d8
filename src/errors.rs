use thiserror::Error;

/// Banner shown after the backend accepts a profile.
pub const PROFILE_SUCCESS_NOTICE: &str = "Profile saved successfully!";
/// Banner shown for any failed profile submission, whatever the cause.
pub const PROFILE_FAILURE_NOTICE: &str = "Failed to save profile. Please try again.";

/// Failures talking to the advisor backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    #[error("backend returned HTTP {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default()
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ApiError::Timeout
        } else if value.is_decode() {
            ApiError::InvalidResponse(value.to_string())
        } else {
            ApiError::Network(value.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage is corrupt: {0}")]
    Corrupt(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Corrupt(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum ProfileSubmitError {
    #[error("a profile submission is already in progress")]
    Busy,

    #[error("profile update failed: {0}")]
    Backend(#[from] ApiError),
}

impl ProfileSubmitError {
    /// The fixed banner text shown to the user for any failed submission.
    pub fn notice(&self) -> &'static str {
        PROFILE_FAILURE_NOTICE
    }
}
