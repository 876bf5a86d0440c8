use super::RelayService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted relay reply, with an optional artificial latency.
#[derive(Clone)]
enum ScriptedReply {
    Alt(String),
    RelayError(String),
    TransportFailure,
}

/// Scripted [`RelayService`] used by orchestrator tests.
///
/// Replies are served in the order they were queued, cycling when the queue
/// is exhausted. Per-reply delays make submission interleavings
/// reproducible.
#[derive(Clone)]
pub struct MockRelayClient {
    replies: Arc<Mutex<Vec<(ScriptedReply, Duration)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_alt(self, alt: String) -> Self {
        self.push(ScriptedReply::Alt(alt), Duration::ZERO);
        self
    }

    pub fn with_delayed_alt(self, alt: String, delay: Duration) -> Self {
        self.push(ScriptedReply::Alt(alt), delay);
        self
    }

    pub fn with_relay_error(self, message: String) -> Self {
        self.push(ScriptedReply::RelayError(message), Duration::ZERO);
        self
    }

    pub fn with_transport_failure(self) -> Self {
        self.push(ScriptedReply::TransportFailure, Duration::ZERO);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn push(&self, reply: ScriptedReply, delay: Duration) {
        self.replies.lock().unwrap().push((reply, delay));
    }
}

impl Default for MockRelayClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayService for MockRelayClient {
    async fn generate_alt_text(&self, _image_source: &str) -> Result<String> {
        let (reply, delay) = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;

            let replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                (
                    ScriptedReply::Alt("A mock description".to_string()),
                    Duration::ZERO,
                )
            } else {
                let index = (*count - 1) % replies.len();
                replies[index].clone()
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            ScriptedReply::Alt(alt) => Ok(alt),
            ScriptedReply::RelayError(message) => Err(Error::Relay(message)),
            ScriptedReply::TransportFailure => {
                Err(Error::Generic("simulated connection failure".to_string()))
            }
        }
    }
}
