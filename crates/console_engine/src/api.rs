use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ApiError, FailureKind, ResultRecord, UsageRecord};

const VERIFY_PATH: &str = "api/verify";
const EXPORT_PATH: &str = "api/export";
const STATS_PATH: &str = "api/stats";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// `None` keeps the transport default.
    pub connect_timeout: Option<Duration>,
    /// `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// The three backend operations the console relies on.
#[async_trait::async_trait]
pub trait VerificationApi: Send + Sync {
    /// Submits raw, unsplit input text.
    async fn verify(&self, emails: &str) -> Result<Vec<ResultRecord>, ApiError>;

    /// Returns the exported file payload for `results`.
    async fn export(&self, results: &[ResultRecord]) -> Result<Bytes, ApiError>;

    async fn stats(&self) -> Result<UsageRecord, ApiError>;
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    emails: &'a str,
}

#[derive(Serialize)]
struct ExportRequest<'a> {
    results: &'a [ResultRecord],
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        // Endpoint paths are joined relative to the base, so keep its path prefix.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ApiError> {
        let body = serde_json::to_vec(body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        self.client
            .post(self.endpoint(path)?)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl VerificationApi for ReqwestApi {
    async fn verify(&self, emails: &str) -> Result<Vec<ResultRecord>, ApiError> {
        let response = self.post_json(VERIFY_PATH, &VerifyRequest { emails }).await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            // A quota answer without a readable JSON body still counts as quota.
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error);
            let text = message.clone().unwrap_or_else(|| status.to_string());
            return Err(ApiError::new(FailureKind::QuotaExceeded(message), text));
        }
        ensure_success(status)?;

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        decode_json(&body)
    }

    async fn export(&self, results: &[ResultRecord]) -> Result<Bytes, ApiError> {
        let response = self.post_json(EXPORT_PATH, &ExportRequest { results }).await?;
        ensure_success(response.status())?;
        response.bytes().await.map_err(map_reqwest_error)
    }

    async fn stats(&self) -> Result<UsageRecord, ApiError> {
        let response = self
            .client
            .get(self.endpoint(STATS_PATH)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response.status())?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        decode_json(&body)
    }
}

fn ensure_success(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
