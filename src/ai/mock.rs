use super::VisionService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted [`VisionService`] used by server and pipeline tests.
#[derive(Clone)]
pub struct MockVisionClient {
    descriptions: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            descriptions: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_description(self, description: String) -> Self {
        self.descriptions.lock().unwrap().push(description);
        self
    }

    /// Make every call fail the way a provider outage would.
    pub fn with_failure(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionService for MockVisionClient {
    async fn describe_image(&self, _image_source: &str) -> Result<Option<String>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if *self.fail.lock().unwrap() {
            return Err(Error::AiProvider("mock provider failure".to_string()));
        }

        let descriptions = self.descriptions.lock().unwrap();
        if descriptions.is_empty() {
            Ok(Some("A placeholder description of the image".to_string()))
        } else {
            let index = (*count - 1) % descriptions.len();
            Ok(Some(descriptions[index].clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_vision_client_default_description() {
        let client = MockVisionClient::new();

        let alt = client
            .describe_image("https://example.com/photo.png")
            .await
            .unwrap();
        assert!(alt.is_some());
    }

    #[tokio::test]
    async fn test_mock_vision_client_cycles_custom_descriptions() {
        let client = MockVisionClient::new()
            .with_description("First description".to_string())
            .with_description("Second description".to_string());

        assert_eq!(
            client.describe_image("a").await.unwrap().as_deref(),
            Some("First description")
        );
        assert_eq!(
            client.describe_image("b").await.unwrap().as_deref(),
            Some("Second description")
        );
        // Cycles back around.
        assert_eq!(
            client.describe_image("c").await.unwrap().as_deref(),
            Some("First description")
        );
    }

    #[tokio::test]
    async fn test_mock_vision_client_failure_mode() {
        let client = MockVisionClient::new().with_failure();

        let err = client.describe_image("a").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert_eq!(client.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_vision_client_call_count() {
        let client = MockVisionClient::new();

        assert_eq!(client.get_call_count(), 0);
        client.describe_image("a").await.unwrap();
        client.describe_image("b").await.unwrap();
        assert_eq!(client.get_call_count(), 2);
    }
}
