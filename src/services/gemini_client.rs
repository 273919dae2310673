use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERIC_REQUEST_FAILURE: &str = "API request failed";
const NETWORK_FAILURE: &str = "Failed to reach the itinerary model";

/// A text-generation backend that turns a prompt into raw model text.
#[async_trait]
pub trait ItineraryModel: Send + Sync + fmt::Debug {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Sampling parameters sent with every request
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

/// Client for the Gemini `generateContent` endpoint. One attempt per call.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    generation: GenerationConfig,
    http: reqwest::Client,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("generation", &self.generation)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationConfig::default(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body for a single-turn prompt
    pub fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": self.generation,
        })
    }

    /// Send the prompt and return the text of the first candidate.
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let request_url = build_generate_url(&self.base_url, &self.model);
        debug!(
            target: "itinerary::upstream",
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(&request_url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|err| network_failure("request", &err))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| network_failure("response body", &err))?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| GENERIC_REQUEST_FAILURE.to_string());

            warn!(
                target: "itinerary::upstream",
                status = status.as_u16(),
                message = %api_message,
                "model provider rejected the request"
            );
            return Err(PlannerError::Upstream(api_message));
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
            warn!(target: "itinerary::upstream", error = %err, "provider returned invalid JSON");
            PlannerError::Upstream("Model returned an unreadable response".to_string())
        })?;

        first_candidate_text(&response_json)
    }
}

#[async_trait]
impl ItineraryModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt).await
    }
}

fn network_failure(stage: &str, err: &reqwest::Error) -> PlannerError {
    warn!(
        target: "itinerary::upstream",
        stage,
        timeout = err.is_timeout(),
        error = %err,
        "model request failed"
    );
    PlannerError::Upstream(NETWORK_FAILURE.to_string())
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        trimmed.to_string()
    } else {
        format!("{}/models/{}:generateContent", trimmed, model)
    }
}

/// Text of the first candidate, with its parts concatenated.
fn first_candidate_text(response: &Value) -> Result<String> {
    let parts = response
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array());

    let text: String = parts
        .into_iter()
        .flatten()
        .filter_map(|part| part.get("text").and_then(|value| value.as_str()))
        .collect();

    if text.trim().is_empty() {
        let reason = response
            .get("promptFeedback")
            .and_then(|feedback| feedback.get("blockReason"))
            .and_then(|value| value.as_str());
        let message = match reason {
            Some(reason) => format!("Model returned no itinerary text (blocked: {reason})"),
            None => "Model returned no itinerary text".to_string(),
        };
        return Err(PlannerError::Upstream(message));
    }

    Ok(text)
}
