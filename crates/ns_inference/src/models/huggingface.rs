use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use ns_core::{Error, Result, SummarizationModel, SummaryRequest};

use crate::Config;

/// Sampling is disabled, so this has no effect on the output. It is sent so that
/// re-enabling sampling keeps the same behaviour.
const TEMPERATURE: f32 = 0.6;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    #[serde(default)]
    summary_text: Option<String>,
    #[serde(default)]
    generated_text: Option<String>,
}

pub struct HuggingFaceModel {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HuggingFaceModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Configuration("Hugging Face API key is required".to_string()))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    fn model_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.base_url, model_id.trim_start_matches('/'))
    }

    fn describe_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Summarization(format!("API request timed out after {:?}", self.timeout))
        } else {
            Error::Summarization(format!("API error: {}", e))
        }
    }
}

/// Picks the summary out of an inference response body.
fn parse_summary(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::Summarization(format!("malformed API response: {}", e)))?;
    let items: Vec<serde_json::Value> = serde_json::from_value(value)
        .map_err(|_| Error::Summarization("unexpected API response format".to_string()))?;
    // Only the first output is used; later ones are not validated.
    let first = items
        .into_iter()
        .next()
        .ok_or_else(|| Error::Summarization("API returned no results".to_string()))?;
    let first: InferenceOutput = serde_json::from_value(first)
        .map_err(|_| Error::Summarization("unexpected API response format".to_string()))?;

    first
        .summary_text
        .filter(|s| !s.trim().is_empty())
        .or(first.generated_text.filter(|s| !s.trim().is_empty()))
        .ok_or_else(|| Error::Summarization("no summary returned".to_string()))
}

#[async_trait]
impl SummarizationModel for HuggingFaceModel {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn summarize_chunk(&self, request: &SummaryRequest, chunk: &str) -> Result<String> {
        let payload = InferenceRequest {
            inputs: chunk,
            parameters: GenerationParameters {
                max_length: request.max_length,
                min_length: request.min_length,
                do_sample: false,
                temperature: TEMPERATURE,
            },
        };

        let url = self.model_url(&request.model_id);
        tracing::debug!("Requesting summary of {} chars from {}", chunk.chars().count(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.describe_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.describe_transport_error(e))?;

        if status != StatusCode::OK {
            tracing::warn!("Inference endpoint answered {} for {}", status, request.model_id);
            return Err(Error::Summarization(format!("API error: HTTP {}", status)));
        }

        parse_summary(&body)
    }
}
