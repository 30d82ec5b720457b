//! # Generation Client
//!
//! Sends one composed prompt to a hosted text-generation API and hands back
//! the text, or a single human-readable error.
//!
//! ## Architecture
//!
//! ```text
//! Prompt → TextGenerator::generate → (one HTTP call) → trimmed text | GenerationError
//! ```
//!
//! Every failure from the remote side (missing key, network, HTTP status,
//! malformed body) collapses into [`GenerationError::Remote`]. An answer
//! with no text is [`GenerationError::EmptyResponse`]. There are no retries.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Shown when the remote side failed without giving a usable message.
pub const FALLBACK_MESSAGE: &str =
    "The creative engine encountered a critical failure. Check your connection.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("The Architect returned an empty blueprint.")]
    EmptyResponse,
    #[error("{0}")]
    Remote(String),
}

impl GenerationError {
    /// Builds a remote error, falling back to the generic message when
    /// `message` is blank.
    pub fn remote(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            GenerationError::Remote(FALLBACK_MESSAGE.to_string())
        } else {
            GenerationError::Remote(message)
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issues exactly one request for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
