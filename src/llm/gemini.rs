use crate::config::GenerationConfig;
use crate::llm::{GenerationError, TextGenerator};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info, instrument, warn};
use zeroize::Zeroizing;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client.
///
/// Holds only configuration. The API key and the HTTP client are created
/// on every call, so a key changed in the environment is picked up by the
/// next generation without restarting the app.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GenerationConfig,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: RequestGenerationConfig,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct RequestGenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn read_api_key(&self) -> Result<Zeroizing<String>, GenerationError> {
        self.config
            .key_vars
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|k| !k.trim().is_empty()))
            .map(Zeroizing::new)
            .ok_or_else(|| {
                let var = self
                    .config
                    .key_vars
                    .first()
                    .map(String::as_str)
                    .unwrap_or("API_KEY");
                GenerationError::remote(format!(
                    "API key is not configured. Set {} in the environment.",
                    var
                ))
            })
    }

    fn endpoint(&self) -> Result<reqwest::Url, GenerationError> {
        self.config
            .api_base
            .join(&format!("models/{}:generateContent", self.config.model))
            .map_err(|e| GenerationError::remote(format!("Invalid API endpoint: {}", e)))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.read_api_key()?;
        let endpoint = self.endpoint()?;

        let client = Client::builder()
            .build()
            .map_err(|e| GenerationError::remote(format!("Failed to create HTTP client: {}", e)))?;

        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: RequestGenerationConfig {
                temperature: self.config.temperature,
            },
        };

        let start = Instant::now();
        let response = client
            .post(endpoint)
            .header(API_KEY_HEADER, api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Generation request failed");
                GenerationError::remote(e.to_string())
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| {
            error!(status = status.as_u16(), error = %e, "Failed to read generation response");
            GenerationError::remote(e.to_string())
        })?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body_text)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_default();
            error!(status = status.as_u16(), elapsed_ms, "Generation API returned an error");
            return Err(GenerationError::remote(message));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body_text).map_err(|e| {
            error!(error = %e, "Failed to parse generation response");
            GenerationError::remote(format!("Failed to parse API response: {}", e))
        })?;

        let text = parsed.text();
        let text = text.trim();
        if text.is_empty() {
            warn!(elapsed_ms, "Generation API returned no text");
            return Err(GenerationError::EmptyResponse);
        }

        info!(elapsed_ms, chars = text.len(), "Generation finished");
        Ok(text.to_string())
    }
}
