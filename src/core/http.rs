use crate::config::{ClientConfig, Credentials};
use crate::domain::model::Item;
use crate::utils::error::{ExtPipesError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wire shape of platform error responses.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: u16,
    message: String,
    #[serde(default)]
    duplicated: Vec<Item>,
    #[serde(default)]
    missing: Vec<Item>,
}

/// Thin wrapper around `reqwest::Client` that knows the project URL scheme,
/// the auth headers and the platform error body. All endpoint operations go
/// through `post_json`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    project: String,
    headers: HeaderMap,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match &config.credentials {
            Credentials::ApiKey(key) => {
                headers.insert(
                    "api-key",
                    HeaderValue::from_str(key)
                        .map_err(|_| ExtPipesError::config("api_key contains invalid characters"))?,
                );
            }
            Credentials::Token(token) => {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", token))
                        .map_err(|_| ExtPipesError::config("token contains invalid characters"))?,
                );
            }
        }
        headers.insert(
            "x-cdp-app",
            HeaderValue::from_str(&config.client_name)
                .map_err(|_| ExtPipesError::config("client_name contains invalid characters"))?,
        );

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            headers,
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/api/v1/projects/{}/{}",
            self.base_url, self.project, path
        )
    }

    /// POSTs a JSON body and deserializes the JSON response, retrying
    /// transient failures (429/502/503/504) with linear backoff.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            tracing::debug!("POST {} (attempt {})", url, attempt);

            let response = self
                .http
                .post(&url)
                .headers(self.headers.clone())
                .json(body)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(response.json::<R>().await?);
            }

            if is_transient(status) && attempt <= self.max_retries {
                let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                tracing::warn!(
                    "POST {} returned {}, retrying in {:?} ({}/{})",
                    url,
                    status,
                    delay,
                    attempt,
                    self.max_retries
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(map_error(status, response.text().await.unwrap_or_default()));
        }
    }
}

fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn map_error(status: StatusCode, body: String) -> ExtPipesError {
    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(parsed) => ExtPipesError::Api {
            code: parsed.error.code,
            message: parsed.error.message,
            duplicated: parsed.error.duplicated,
            missing: parsed.error.missing,
        },
        // Not every error body follows the documented shape.
        Err(_) => ExtPipesError::Api {
            code: status.as_u16(),
            message: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
            duplicated: Vec::new(),
            missing: Vec::new(),
        },
    }
}
