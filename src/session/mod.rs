//! Generation lifecycle for the single in-window request.
//!
//! The session owns the `GenerationState`; its `Pending` variant is the
//! flag that keeps a second request from being issued while one is in
//! flight. Checking and setting it happens in one `watch` modification,
//! never across the network await.

use crate::composer::{self, ComposeError};
use crate::llm::{GenerationError, TextGenerator};
use crate::preferences::PreferenceSet;
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum GenerationState {
    #[default]
    Idle,
    Pending,
    Success(String),
    Failed(String),
}

impl GenerationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationState::Pending)
    }

    pub fn lyrics(&self) -> Option<&str> {
        match self {
            GenerationState::Success(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A generation is already in progress.")]
    Busy,
    #[error(transparent)]
    Validation(#[from] ComposeError),
    #[error("{0}")]
    Generation(String),
}

pub struct GenerationSession {
    state: watch::Sender<GenerationState>,
}

impl GenerationSession {
    pub fn new() -> Self {
        let (state, _) = watch::channel(GenerationState::Idle);
        Self { state }
    }

    pub fn state(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    /// Checks the pending flag and, if clear, validates and marks pending
    /// in one step.
    fn begin(&self, prefs: &PreferenceSet) -> Result<String, SessionError> {
        let mut outcome = Err(SessionError::Busy);
        self.state.send_if_modified(|state| {
            if state.is_pending() {
                return false;
            }
            match composer::compose(prefs) {
                Ok(prompt) => {
                    *state = GenerationState::Pending;
                    outcome = Ok(prompt);
                }
                Err(e) => {
                    *state = GenerationState::Failed(e.to_string());
                    outcome = Err(e.into());
                }
            }
            true
        });
        outcome
    }

    /// Validates, marks the session pending and runs one generation.
    ///
    /// Returns `Busy` without touching state when a request is already in
    /// flight, and records a validation failure without contacting the API.
    pub async fn run(
        &self,
        prefs: &PreferenceSet,
        generator: &dyn TextGenerator,
    ) -> Result<String, SessionError> {
        let prompt = match self.begin(prefs) {
            Ok(prompt) => prompt,
            Err(SessionError::Busy) => {
                warn!("Generation requested while another is pending");
                return Err(SessionError::Busy);
            }
            Err(e) => {
                info!(error = %e, "Generation rejected before contacting the API");
                return Err(e);
            }
        };

        let request_id = Uuid::new_v4().to_string();
        let span = info_span!("generation", request_id = %request_id);
        let start = Instant::now();

        let outcome = generator
            .generate(&prompt)
            .instrument(span.clone())
            .await
            .and_then(|text| match text.trim() {
                "" => Err(GenerationError::EmptyResponse),
                trimmed => Ok(trimmed.to_string()),
            });
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let _entered = span.enter();
        match outcome {
            Ok(text) => {
                info!(elapsed_ms, "Lyrics generated");
                self.state.send_replace(GenerationState::Success(text.clone()));
                Ok(text)
            }
            Err(e) => {
                error!(elapsed_ms, error = %e, "Lyrical engine error");
                let message = e.to_string();
                self.state.send_replace(GenerationState::Failed(message.clone()));
                Err(SessionError::Generation(message))
            }
        }
    }
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Counts calls and optionally blocks until released.
    struct FakeGenerator {
        calls: AtomicUsize,
        reply: Result<String, GenerationError>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeGenerator {
        fn replying(reply: Result<String, GenerationError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply,
                gate: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply.clone()
        }
    }

    fn prefs(idea: &str) -> PreferenceSet {
        PreferenceSet {
            idea: idea.to_string(),
            ..PreferenceSet::default()
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        assert_eq!(GenerationSession::new().state(), GenerationState::Idle);
    }

    #[tokio::test]
    async fn blank_idea_never_calls_the_api() {
        let session = GenerationSession::new();
        let generator = FakeGenerator::replying(Ok("unused".into()));

        let err = session.run(&prefs("   "), &generator).await.unwrap_err();

        assert_eq!(err, SessionError::Validation(ComposeError::EmptyIdea));
        assert_eq!(generator.calls(), 0);
        assert_eq!(
            session.state(),
            GenerationState::Failed("Please enter an idea for your lyrics first.".into())
        );
    }

    #[tokio::test]
    async fn success_is_recorded() {
        let session = GenerationSession::new();
        let generator = FakeGenerator::replying(Ok("[Intro]\nHello".into()));

        let text = session.run(&prefs("moon"), &generator).await.unwrap();

        assert_eq!(text, "[Intro]\nHello");
        assert_eq!(session.state().lyrics(), Some("[Intro]\nHello"));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn remote_failure_is_recorded_as_one_message() {
        let session = GenerationSession::new();
        let generator = FakeGenerator::replying(Err(GenerationError::EmptyResponse));

        let err = session.run(&prefs("moon"), &generator).await.unwrap_err();

        assert_eq!(
            err,
            SessionError::Generation("The Architect returned an empty blueprint.".into())
        );
        assert_eq!(
            session.state(),
            GenerationState::Failed("The Architect returned an empty blueprint.".into())
        );
    }

    #[tokio::test]
    async fn blank_reply_is_never_a_success() {
        let session = GenerationSession::new();
        let generator = FakeGenerator::replying(Ok("  \n ".into()));

        let err = session.run(&prefs("moon"), &generator).await.unwrap_err();

        assert_eq!(
            err,
            SessionError::Generation("The Architect returned an empty blueprint.".into())
        );
        assert_eq!(
            session.state(),
            GenerationState::Failed("The Architect returned an empty blueprint.".into())
        );
    }

    #[tokio::test]
    async fn new_run_clears_previous_result() {
        let session = GenerationSession::new();
        session
            .run(&prefs("moon"), &FakeGenerator::replying(Ok("first".into())))
            .await
            .unwrap();
        let _ = session
            .run(&prefs("moon"), &FakeGenerator::replying(Err(GenerationError::remote("down"))))
            .await;

        assert_eq!(session.state(), GenerationState::Failed("down".into()));
        assert_eq!(session.state().lyrics(), None);
    }

    #[tokio::test]
    async fn second_trigger_while_pending_is_rejected() {
        let session = Arc::new(GenerationSession::new());
        let gate = Arc::new(Notify::new());
        let generator = Arc::new(FakeGenerator {
            calls: AtomicUsize::new(0),
            reply: Ok("done".into()),
            gate: Some(gate.clone()),
        });

        let first = {
            let session = session.clone();
            let generator = generator.clone();
            tokio::spawn(async move { session.run(&prefs("moon"), generator.as_ref()).await })
        };

        while !session.state().is_pending() {
            tokio::task::yield_now().await;
        }

        let second = session.run(&prefs("moon"), generator.as_ref()).await;
        assert_eq!(second, Err(SessionError::Busy));
        assert_eq!(generator.calls(), 1);

        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), "done");
        assert_eq!(generator.calls(), 1);
        assert_eq!(session.state(), GenerationState::Success("done".into()));
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let session = GenerationSession::new();
        let mut rx = session.subscribe();

        session
            .run(&prefs("moon"), &FakeGenerator::replying(Ok("bars".into())))
            .await
            .unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), GenerationState::Success("bars".into()));
    }

    #[test]
    fn state_serializes_with_status_tag() {
        let json = serde_json::to_value(GenerationState::Success("yo".into())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "success", "text": "yo"}));
        let json = serde_json::to_value(GenerationState::Idle).unwrap();
        assert_eq!(json, serde_json::json!({"status": "idle"}));
    }
}
