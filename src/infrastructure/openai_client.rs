// OpenAI images API client
use crate::application::image_service::ImageGenerator;
use crate::domain::image::ImageRequest;
use crate::infrastructure::config::ImageConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenAiImageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedData>,
}

#[derive(Debug, Deserialize)]
struct GeneratedData {
    #[serde(default)]
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl<'a> From<&'a ImageRequest> for GenerationBody<'a> {
    fn from(request: &'a ImageRequest) -> Self {
        Self {
            model: &request.model,
            prompt: &request.prompt,
            size: &request.size,
            quality: &request.quality,
            response_format: &request.response_format,
            n: request.count,
        }
    }
}

impl OpenAiImageClient {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

/// Pulls the API's own error message out of a failed response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

fn first_payload(response: GenerationResponse) -> Result<String> {
    response
        .data
        .into_iter()
        .find_map(|d| d.b64_json)
        .context("Image API response contained no base64 image data")
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, request: &ImageRequest) -> Result<String> {
        let url = self.generations_url();
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&GenerationBody::from(request))
            .send()
            .await
            .context("Failed to send request to image API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Image API request failed with status {}: {}", status, error_message(&body));
        }

        let data = response
            .json::<GenerationResponse>()
            .await
            .context("Failed to parse image API response")?;

        first_payload(data)
    }
}
