//! Submission orchestration for the alt-text pipeline.
//!
//! Owns the session's request lifecycle: the display state mirrored by the
//! UI, the `Idle -> InFlight -> Completed` request state, and a generation
//! counter. Each submission takes the next generation token; only the
//! response matching the latest token may update display state, so a stale
//! response can never overwrite the output of a newer submission.

use crate::models::{AltTextOutcome, ImageSource, RequestState};
use crate::relay::RelayService;
use crate::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Shown when the relay succeeds but returns an empty description.
pub const EMPTY_ALT_FALLBACK: &str = "No alt text generated.";
/// Shown when the relay endpoint cannot be reached or returns garbage.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Something went wrong.";

/// User-visible state mirrored by the UI after each transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// Preview source; always the most recently accepted [`ImageSource`].
    pub preview: Option<String>,
    pub alt_text: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug)]
struct SessionState {
    display: DisplayState,
    request: RequestState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            display: DisplayState::default(),
            request: RequestState::Idle,
        }
    }
}

/// Coordinates one session's submissions against the relay.
pub struct Orchestrator {
    relay: Box<dyn RelayService>,
    session: Mutex<SessionState>,
    generation: AtomicU64,
}

impl Orchestrator {
    pub fn new(relay: Box<dyn RelayService>) -> Self {
        Self {
            relay,
            session: Mutex::new(SessionState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current display state.
    pub fn display(&self) -> DisplayState {
        self.session.lock().unwrap().display.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.session.lock().unwrap().request
    }

    /// Submit one validated image source to the relay.
    ///
    /// Clears previously displayed output, goes in-flight, sends a single
    /// request, and maps the reply to an outcome. The outcome is returned
    /// to the caller in every case; display state is only updated when this
    /// submission is still the newest one.
    pub async fn submit(&self, source: ImageSource) -> AltTextOutcome {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut session = self.session.lock().unwrap();
            session.display.alt_text = None;
            session.display.error = None;
            session.display.preview = Some(source.as_str().to_string());
            session.display.loading = true;
            session.request = RequestState::InFlight;
        }

        let outcome = match self.relay.generate_alt_text(source.as_str()).await {
            Ok(alt) if alt.trim().is_empty() => AltTextOutcome::Success {
                alt_text: EMPTY_ALT_FALLBACK.to_string(),
            },
            Ok(alt) => AltTextOutcome::Success { alt_text: alt },
            Err(Error::Relay(message)) => AltTextOutcome::Failure { message },
            Err(e) => {
                tracing::warn!("Relay request failed: {}", e);
                AltTextOutcome::Failure {
                    message: TRANSPORT_FAILURE_MESSAGE.to_string(),
                }
            }
        };

        {
            let mut session = self.session.lock().unwrap();
            // Token check stays under the lock; a newer submit increments
            // the counter before taking it.
            if self.generation.load(Ordering::SeqCst) == token {
                session.display.loading = false;
                match &outcome {
                    AltTextOutcome::Success { alt_text } => {
                        session.display.alt_text = Some(alt_text.clone());
                    }
                    AltTextOutcome::Failure { message } => {
                        session.display.error = Some(message.clone());
                    }
                }
                session.request = RequestState::Completed;
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::MockRelayClient;
    use std::time::Duration;

    fn make_source(url: &str) -> ImageSource {
        ImageSource::Remote {
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_success_updates_display() {
        let relay = MockRelayClient::new().with_alt("A quiet lake at dawn.".to_string());
        let orchestrator = Orchestrator::new(Box::new(relay));

        assert_eq!(orchestrator.request_state(), RequestState::Idle);

        let outcome = orchestrator
            .submit(make_source("https://example.com/lake.jpg"))
            .await;
        assert_eq!(
            outcome,
            AltTextOutcome::Success {
                alt_text: "A quiet lake at dawn.".to_string()
            }
        );

        let display = orchestrator.display();
        assert_eq!(display.alt_text.as_deref(), Some("A quiet lake at dawn."));
        assert_eq!(
            display.preview.as_deref(),
            Some("https://example.com/lake.jpg")
        );
        assert!(display.error.is_none());
        assert!(!display.loading);
        assert_eq!(orchestrator.request_state(), RequestState::Completed);
    }

    #[tokio::test]
    async fn test_submit_clears_previous_output() {
        let relay = MockRelayClient::new()
            .with_relay_error("Image processing failed.".to_string())
            .with_alt("A sunflower field.".to_string());
        let orchestrator = Orchestrator::new(Box::new(relay));

        orchestrator
            .submit(make_source("https://example.com/a.jpg"))
            .await;
        assert_eq!(
            orchestrator.display().error.as_deref(),
            Some("Image processing failed.")
        );

        orchestrator
            .submit(make_source("https://example.com/b.jpg"))
            .await;
        let display = orchestrator.display();
        assert!(display.error.is_none());
        assert_eq!(display.alt_text.as_deref(), Some("A sunflower field."));
        assert_eq!(display.preview.as_deref(), Some("https://example.com/b.jpg"));
    }

    #[tokio::test]
    async fn test_submit_relay_error_shows_payload_message() {
        let relay = MockRelayClient::new().with_relay_error("Image processing failed.".to_string());
        let orchestrator = Orchestrator::new(Box::new(relay));

        let outcome = orchestrator
            .submit(make_source("https://example.com/x.png"))
            .await;
        assert_eq!(
            outcome,
            AltTextOutcome::Failure {
                message: "Image processing failed.".to_string()
            }
        );

        let display = orchestrator.display();
        assert_eq!(display.error.as_deref(), Some("Image processing failed."));
        assert!(!display.loading);
    }

    #[tokio::test]
    async fn test_submit_transport_failure_shows_generic_message() {
        let relay = MockRelayClient::new().with_transport_failure();
        let orchestrator = Orchestrator::new(Box::new(relay));

        let outcome = orchestrator
            .submit(make_source("https://example.com/x.png"))
            .await;
        assert_eq!(
            outcome,
            AltTextOutcome::Failure {
                message: TRANSPORT_FAILURE_MESSAGE.to_string()
            }
        );
        assert!(!orchestrator.display().loading);
    }

    #[tokio::test]
    async fn test_submit_empty_alt_uses_fallback() {
        let relay = MockRelayClient::new().with_alt("  ".to_string());
        let orchestrator = Orchestrator::new(Box::new(relay));

        let outcome = orchestrator
            .submit(make_source("https://example.com/x.png"))
            .await;
        assert_eq!(
            outcome,
            AltTextOutcome::Success {
                alt_text: EMPTY_ALT_FALLBACK.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_sequential_submits_issue_independent_requests() {
        let relay = MockRelayClient::new().with_alt("Same image.".to_string());
        let probe = relay.clone();
        let orchestrator = Orchestrator::new(Box::new(relay));
        let source = make_source("https://example.com/same.jpg");

        orchestrator.submit(source.clone()).await;
        assert_eq!(orchestrator.request_state(), RequestState::Completed);
        orchestrator.submit(source).await;
        assert_eq!(orchestrator.request_state(), RequestState::Completed);

        assert_eq!(probe.get_call_count(), 2);
    }

    #[tokio::test]
    async fn test_stale_response_does_not_overwrite_newer_display() {
        // First submission resolves slowly, second immediately. The slow
        // reply lands last but belongs to a superseded generation.
        let relay = MockRelayClient::new()
            .with_delayed_alt("Stale description.".to_string(), Duration::from_millis(100))
            .with_alt("Fresh description.".to_string());
        let orchestrator = Orchestrator::new(Box::new(relay));

        let (first, second) = tokio::join!(
            orchestrator.submit(make_source("https://example.com/old.jpg")),
            orchestrator.submit(make_source("https://example.com/new.jpg")),
        );

        // Both callers still observe their own outcome.
        assert_eq!(
            first,
            AltTextOutcome::Success {
                alt_text: "Stale description.".to_string()
            }
        );
        assert_eq!(
            second,
            AltTextOutcome::Success {
                alt_text: "Fresh description.".to_string()
            }
        );

        let display = orchestrator.display();
        assert_eq!(display.alt_text.as_deref(), Some("Fresh description."));
        assert!(!display.loading);
    }
}
