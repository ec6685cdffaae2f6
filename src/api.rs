use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::models::{
    CaloriesPayload, CreateReply, DeleteReply, HistoryReply, ImtPayload, PressurePayload,
    StatsReply, UpstreamHealth,
};

/// Failure of a single remote call. One attempt per call, no retries;
/// whether to try again is the caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("calculation service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("calculation service returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("calculation service response was missing '{0}'")]
    Malformed(&'static str),
}

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: String,
}

/// Thin typed wrapper over the remote calculation service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("health-tracker/0.1")
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build http client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a prepared request and map non-2xx statuses to `ApiError`,
    /// carrying the server's `detail` field when it supplies one.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = match response.json::<ErrorBody>().await {
            Ok(body) if !body.detail.is_empty() => body.detail,
            _ => format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("error")
            ),
        };
        warn!("calculation service returned {status}: {detail}");
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn create(
        &self,
        path: &str,
        payload: &impl serde::Serialize,
    ) -> Result<CreateReply, ApiError> {
        let reply: CreateReply = self
            .execute(self.client.post(self.url(path)).json(payload))
            .await?
            .json()
            .await?;
        if reply.result.is_none() {
            return Err(ApiError::Malformed("result"));
        }
        Ok(reply)
    }

    pub async fn create_imt(
        &self,
        user_id: &str,
        weight: f64,
        height: f64,
    ) -> Result<CreateReply, ApiError> {
        self.create(
            "/calculations/imt",
            &ImtPayload {
                user_id,
                weight,
                height,
            },
        )
        .await
    }

    pub async fn create_calories(
        &self,
        user_id: &str,
        age: i64,
        weight: f64,
        height: f64,
        gender: &str,
        activity: f64,
    ) -> Result<CreateReply, ApiError> {
        self.create(
            "/calculations/calories",
            &CaloriesPayload {
                user_id,
                age,
                weight,
                height,
                gender,
                activity,
            },
        )
        .await
    }

    pub async fn create_pressure(
        &self,
        user_id: &str,
        systolic: i64,
        diastolic: i64,
    ) -> Result<CreateReply, ApiError> {
        self.create(
            "/calculations/blood-pressure",
            &PressurePayload {
                user_id,
                systolic,
                diastolic,
            },
        )
        .await
    }

    pub async fn history(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
        calc_type: Option<&str>,
    ) -> Result<HistoryReply, ApiError> {
        let mut request = self.client.get(self.url("/calculations/history")).query(&[
            ("user_id", user_id.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ]);
        if let Some(calc_type) = calc_type {
            request = request.query(&[("calc_type", calc_type)]);
        }
        Ok(self.execute(request).await?.json().await?)
    }

    pub async fn delete_calculation(
        &self,
        id: i64,
        user_id: &str,
    ) -> Result<DeleteReply, ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/calculations/{id}")))
            .query(&[("user_id", user_id)]);
        Ok(self.execute(request).await?.json().await?)
    }

    pub async fn stats(&self, user_id: &str) -> Result<StatsReply, ApiError> {
        let request = self
            .client
            .get(self.url("/calculations/stats"))
            .query(&[("user_id", user_id)]);
        Ok(self.execute(request).await?.json().await?)
    }

    pub async fn health(&self) -> Result<UpstreamHealth, ApiError> {
        Ok(self
            .execute(self.client.get(self.url("/health")))
            .await?
            .json()
            .await?)
    }
}
