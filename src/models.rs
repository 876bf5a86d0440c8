//! Data models and structures
//!
//! Defines the core data structures for image sources, the relay wire
//! contract, and process configuration.

use serde::{Deserialize, Serialize};

/// A validated image reference. Exactly one representation is active at a
/// time; the preview shown to the user always corresponds to the most
/// recently accepted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A self-describing `data:<mime>;base64,<payload>` string produced by
    /// reading a local file.
    Uploaded { data_url: String },
    /// A URL pointing at a remote image resource.
    Remote { url: String },
}

impl ImageSource {
    /// String form of the source, used verbatim as the wire payload and as
    /// the preview image source.
    pub fn as_str(&self) -> &str {
        match self {
            ImageSource::Uploaded { data_url } => data_url,
            ImageSource::Remote { url } => url,
        }
    }
}

/// Lifecycle of one submission; transitions only through the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    InFlight,
    Completed,
}

/// Result of one submission as surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltTextOutcome {
    Success { alt_text: String },
    Failure { message: String },
}

// Relay wire contract

/// Request body for `POST /api/imgalt`.
///
/// The field name is historical; the value may be a data URL or a plain
/// remote URL string.
#[derive(Debug, Serialize, Deserialize)]
pub struct AltTextRequest {
    #[serde(rename = "imageBase64")]
    pub image_source: String,
}

/// Success body: the generated description.
#[derive(Debug, Serialize, Deserialize)]
pub struct AltTextResponse {
    pub alt: String,
}

/// Error body returned with any non-2xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub alt_text_model: String,
    pub max_completion_tokens: u32,
    pub bind_addr: String,
}

impl Config {
    /// Read configuration once at process start. A missing API key fails
    /// startup here rather than individual requests later.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let max_completion_tokens = match std::env::var("MAX_COMPLETION_TOKENS") {
            Ok(raw) => raw.parse().map_err(|_| {
                crate::Error::Config(format!("MAX_COMPLETION_TOKENS is not a number: {}", raw))
            })?,
            Err(_) => 100,
        };

        Ok(Self {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .map_err(|_| crate::Error::Config("OPENAI_API_KEY not set".to_string()))?,
            alt_text_model: std::env::var("ALT_TEXT_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            max_completion_tokens,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_historical_field_name() {
        let request = AltTextRequest {
            image_source: "https://example.com/photo.png".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"imageBase64\":\"https://example.com/photo.png\""));

        let deserialized: AltTextRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.image_source, "https://example.com/photo.png");
    }

    #[test]
    fn test_response_bodies_round_trip() {
        let success: AltTextResponse =
            serde_json::from_str("{\"alt\":\"A red bicycle leaning against a wall.\"}").unwrap();
        assert_eq!(success.alt, "A red bicycle leaning against a wall.");

        let failure: ErrorResponse =
            serde_json::from_str("{\"error\":\"Image processing failed.\"}").unwrap();
        assert_eq!(failure.error, "Image processing failed.");
    }

    #[test]
    fn test_image_source_string_form() {
        let uploaded = ImageSource::Uploaded {
            data_url: "data:image/png;base64,AAAA".to_string(),
        };
        assert_eq!(uploaded.as_str(), "data:image/png;base64,AAAA");

        let remote = ImageSource::Remote {
            url: "https://example.com/photo.jpg".to_string(),
        };
        assert_eq!(remote.as_str(), "https://example.com/photo.jpg");
    }
}
