//! JSON REST client shared by the per-resource API modules

use http::StatusCode;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Error body sent by the server: `{ "detail": ... }`.
/// `detail` is usually a string, validation failures send a list.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ErrorBody {
    fn message(self) -> String {
        match self.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::expect_body(Self::handle_response(response).await?, path)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::expect_body(Self::handle_response(response).await?, path)
    }

    /// POST without a request body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).send().await?;
        Self::expect_body(Self::handle_response(response).await?, path)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let response = self.client.put(&url).json(body).send().await?;
        Self::expect_body(Self::handle_response(response).await?, path)
    }

    /// DELETE; any 2xx, including 204, counts as success.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        Self::handle_response::<serde_json::Value>(response).await?;
        Ok(())
    }

    fn expect_body<T>(body: Option<T>, path: &str) -> AppResult<T> {
        body.ok_or_else(|| AppError::InvalidResponse(format!("Empty response from {path}")))
    }

    /// Maps non-2xx to `AppError::Api`; 204 and empty bodies yield `None`.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> AppResult<Option<T>> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(ErrorBody::message)
                .unwrap_or_else(|_| format!("Error {}", status.as_u16()));
            warn!(status = status.as_u16(), %detail, "API request failed");
            return Err(AppError::Api { status, detail });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }
}
