//! AI service integration for alt-text generation
//!
//! Provides the interface to a vision-capable chat-completion API that turns
//! an image reference into a short description.

pub mod mock;
pub mod openai;

pub use mock::MockVisionClient;
pub use openai::OpenAiAltTextClient;

use crate::Result;
use async_trait::async_trait;

/// Vision-model seam consumed by the relay handler.
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Request a description for one image reference (a data URL or a
    /// remote URL string, forwarded unmodified).
    ///
    /// Returns `None` when the provider replied successfully but produced
    /// no text; the relay decides what to substitute.
    async fn describe_image(&self, image_source: &str) -> Result<Option<String>>;
}
