//! HTTP gateway to the dashboard backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::Company,
    error::GatewayError,
    protocol::{GenerateContentRequest, GenerateContentResponse, HealthResponse},
};

use crate::config::ClientConfig;

const COMPANIES_PATH: &str = "/api/companies";
const GENERATE_CONTENT_PATH: &str = "/api/generate-content";
const HEALTH_PATH: &str = "/api/health";

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_companies(&self) -> Result<Vec<Company>, GatewayError>;
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError>;
    async fn health(&self) -> Result<HealthResponse, GatewayError>;
}

pub struct HttpDashboardApi {
    http: Client,
    config: ClientConfig,
}

impl HttpDashboardApi {
    pub fn new(config: ClientConfig) -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_companies(&self) -> Result<Vec<Company>, GatewayError> {
        let res = self
            .http
            .get(self.config.endpoint(COMPANIES_PATH))
            .send()
            .await
            .map_err(transport_error)?;
        decode_json(res).await
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let res = self
            .http
            .post(self.config.endpoint(GENERATE_CONTENT_PATH))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        decode_json(res).await
    }

    async fn health(&self) -> Result<HealthResponse, GatewayError> {
        let res = self
            .http
            .get(self.config.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(transport_error)?;
        decode_json(res).await
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Transport(format!("timed out: {err}"))
    } else {
        GatewayError::Transport(err.to_string())
    }
}

async fn decode_json<T: DeserializeOwned>(res: Response) -> Result<T, GatewayError> {
    let status = res.status();
    if !status.is_success() {
        return Err(GatewayError::Response {
            status: status.as_u16(),
        });
    }

    let body = res.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|err| GatewayError::Malformed(err.to_string()))
}
