pub mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::core::{
    DiagnosisInput, DiagnosisResult, HealthStatus, SimulationParams, SimulationResult,
    SubmitRequest,
};
use crate::error::SubmitError;

use wire::{DiagnoseRequest, DiagnoseResponse, SimulateRequest, SimulateResponse};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DIAGNOSE_PATH: &str = "/diagnose";
pub const SIMULATE_PATH: &str = "/api/v1/simulate";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// HTTP client for the diagnosis and simulation backends. Never retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, SubmitError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn diagnose(&self, input: &DiagnosisInput) -> Result<DiagnosisResult, SubmitError> {
        let body = DiagnoseRequest::from(input);
        let response: DiagnoseResponse = self.post_json(DIAGNOSE_PATH, &body).await?;
        Ok(response.into())
    }

    pub async fn simulate(
        &self,
        params: &SimulationParams,
    ) -> Result<SimulationResult, SubmitError> {
        let body = SimulateRequest::from(params);
        let response: SimulateResponse = self.post_json(SIMULATE_PATH, &body).await?;
        Ok(response.into())
    }

    pub async fn health(&self) -> Result<HealthStatus, SubmitError> {
        let url = self.config.endpoint(HEALTH_PATH);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        decode_response(&url, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, SubmitError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        decode_response(&url, response).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, SubmitError> {
    let status = response.status();
    if !status.is_success() {
        warn!(%url, status = status.as_u16(), "backend rejected request");
        return Err(status_error(status));
    }
    let bytes = response.bytes().await?;
    let decoded = serde_json::from_slice(&bytes)?;
    info!(%url, status = status.as_u16(), "backend answered");
    Ok(decoded)
}

fn status_error(status: StatusCode) -> SubmitError {
    SubmitError::Status {
        status: status.as_u16(),
    }
}

#[async_trait]
impl SubmitRequest<DiagnosisInput> for ApiClient {
    type Output = DiagnosisResult;

    async fn submit_request(
        &self,
        request: &DiagnosisInput,
    ) -> Result<DiagnosisResult, SubmitError> {
        self.diagnose(request).await
    }
}

#[async_trait]
impl SubmitRequest<SimulationParams> for ApiClient {
    type Output = SimulationResult;

    async fn submit_request(
        &self,
        request: &SimulationParams,
    ) -> Result<SimulationResult, SubmitError> {
        self.simulate(request).await
    }
}
