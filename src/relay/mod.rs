//! Client-side view of the description relay endpoint.
//!
//! The orchestrator talks to `POST /api/imgalt` through this seam so tests
//! can script replies without a running server.

pub mod client;
pub mod mock;

pub use client::HttpRelayClient;
pub use mock::MockRelayClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RelayService: Send + Sync {
    /// Send one image-source string and return the generated alt text.
    ///
    /// A non-2xx reply surfaces as [`crate::Error::Relay`] carrying the
    /// payload's message; transport and decode failures keep their own
    /// variants.
    async fn generate_alt_text(&self, image_source: &str) -> Result<String>;
}
