use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::errors::{ApiError, ConfigError};
use crate::external::advisor_backend::AdvisorBackend;
use crate::models::api::ErrorBody;
use crate::models::{
    ChatRequest, ChatResponse, HealthStatus, HistoryRequest, HistoryResponse, ProfileStatus,
    UpdateProfileRequest,
};

/// reqwest-backed client for the advisor's `/api/v1` routes.
#[derive(Debug, Clone)]
pub struct HttpAdvisorBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpAdvisorBackend {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.config
            .endpoint(path)
            .map_err(|e: ConfigError| ApiError::Network(e.to_string()))
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let resp = self.client.post(url).json(body).send().await?;
        check_status(resp).await
    }

    async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;
        check_status(resp).await
    }
}

/// Turn non-2xx responses into `ApiError::Status`, keeping the backend's
/// `detail` message when the body carries one.
async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let detail = resp
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
        .map(|body| body.detail_text());

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl AdvisorBackend for HttpAdvisorBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let resp = self.post_json("chat", request).await?;
        decode(resp).await
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<(), ApiError> {
        self.post_json("profile/update", request).await?;
        Ok(())
    }

    async fn history(&self, request: &HistoryRequest) -> Result<HistoryResponse, ApiError> {
        let resp = self.post_json("history", request).await?;
        decode(resp).await
    }

    async fn profile_status(&self, user_id: &str) -> Result<ProfileStatus, ApiError> {
        let mut url = self.url("profile/")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Network("API base cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(user_id);
        debug!("GET {}", url);

        let resp = check_status(self.client.get(url).send().await?).await?;
        decode(resp).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let resp = self.get("health").await?;
        decode(resp).await
    }
}
