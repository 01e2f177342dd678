use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Asset, ScheduledScan},
    error::{ApiError, ErrorCode},
    protocol::{AssetsResponse, ScheduledScansResponse, ASSETS_PATH, SCHEDULED_SCANS_PATH},
};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("error calling backend {endpoint}: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend {endpoint} did not answer within {timeout:?}")]
    Timeout {
        endpoint: &'static str,
        timeout: Duration,
    },
    #[error("backend returned status {status} for {endpoint}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("error decoding {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl BackendError {
    /// Status the frontend answers with when this failure is fatal for a page.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } | Self::Status { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::Build(_) | Self::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        if self.http_status() == StatusCode::BAD_GATEWAY {
            ErrorCode::BadGateway
        } else {
            ErrorCode::Internal
        }
    }
}

impl From<&BackendError> for ApiError {
    fn from(value: &BackendError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

/// Read-only view of the asset and scan inventory.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    async fn list_assets(&self) -> Result<Vec<Asset>, BackendError>;
    async fn list_scheduled_scans(&self) -> Result<Vec<ScheduledScan>, BackendError>;
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BackendError::Build)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, BackendError> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(%url, "calling backend");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| self.transport_error(endpoint, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| self.transport_error(endpoint, source))?;
        serde_json::from_slice(&body).map_err(|source| BackendError::Decode { endpoint, source })
    }

    fn transport_error(&self, endpoint: &'static str, source: reqwest::Error) -> BackendError {
        if source.is_timeout() {
            BackendError::Timeout {
                endpoint,
                timeout: self.timeout,
            }
        } else {
            BackendError::Transport { endpoint, source }
        }
    }
}

#[async_trait]
impl InventoryBackend for BackendClient {
    async fn list_assets(&self) -> Result<Vec<Asset>, BackendError> {
        let body: AssetsResponse = self.get_json(ASSETS_PATH).await?;
        Ok(body.assets)
    }

    async fn list_scheduled_scans(&self) -> Result<Vec<ScheduledScan>, BackendError> {
        let body: ScheduledScansResponse = self.get_json(SCHEDULED_SCANS_PATH).await?;
        Ok(body.scans)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
