use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::{NarrativeConfig, NarrativeProvider};

const SAMPLING_TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("GROQ_API_KEY is missing; set it in the environment")]
    MissingCredentials,
    #[error("Narrative provider request failed: {0}")]
    Transport(String),
    #[error("Narrative provider returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Narrative provider returned an empty response")]
    EmptyResponse,
}

/// Free-text augmentation for the narrative pipeline steps
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}

/// Build the configured generator
pub fn narrative_generator_from_config(
    config: &NarrativeConfig,
) -> Result<Arc<dyn NarrativeGenerator>, ProviderError> {
    match config.provider {
        NarrativeProvider::Groq => {
            if config.groq_api_key.is_none() {
                // Server still starts; only the narrative steps will fail.
                tracing::warn!("GROQ_API_KEY not set, plan and review requests will fail");
            }
            Ok(Arc::new(GroqNarrativeGenerator::new(config)?))
        }
        NarrativeProvider::Canned => {
            info!("Using canned narrative generator");
            Ok(Arc::new(CannedNarrativeGenerator::default()))
        }
    }
}

// ============================================================================
// Groq (OpenAI-compatible chat completions)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub struct GroqNarrativeGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GroqNarrativeGenerator {
    pub fn new(config: &NarrativeConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.groq_api_key.clone(),
            model: config.groq_model.clone(),
            base_url: config.groq_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl NarrativeGenerator for GroqNarrativeGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ProviderError::MissingCredentials)?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: SAMPLING_TEMPERATURE,
        };

        debug!(model = %self.model, "Sending narrative request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Narrative request failed: {}", e);
                ProviderError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Narrative provider error: {} - {}", status, body);
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::Transport(format!("invalid response body: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

// ============================================================================
// Canned generator for offline runs and tests
// ============================================================================

/// A request seen by [`CannedNarrativeGenerator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeRequest {
    pub system: String,
    pub user: String,
}

/// Returns the same text for every request and records what it was asked
pub struct CannedNarrativeGenerator {
    response: String,
    requests: Mutex<Vec<NarrativeRequest>>,
}

impl CannedNarrativeGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<NarrativeRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for CannedNarrativeGenerator {
    fn default() -> Self {
        Self::new("Stay consistent, keep sessions short, and log every day.")
    }
}

#[async_trait]
impl NarrativeGenerator for CannedNarrativeGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(NarrativeRequest {
                system: system.to_string(),
                user: user.to_string(),
            });
        }
        Ok(self.response.clone())
    }
}
