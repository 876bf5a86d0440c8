use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ChatMessageContent, ImageUrl, MessagePart};
use crate::ai::VisionService;
use crate::{prompts, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiAltTextClient {
    http: OpenAiHttpClient,
    model: String,
    max_completion_tokens: u32,
}

impl OpenAiAltTextClient {
    pub fn new(api_key: String, model: String, max_completion_tokens: u32) -> Self {
        Self::new_with_client(api_key, model, max_completion_tokens, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        max_completion_tokens: u32,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, Duration::from_secs(30), client),
            model,
            max_completion_tokens,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl VisionService for OpenAiAltTextClient {
    async fn describe_image(&self, image_source: &str) -> Result<Option<String>> {
        tracing::debug!("Requesting alt text ({} char source)", image_source.len());

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(ChatMessageContent::ImageContent(vec![
                MessagePart {
                    part_type: "text".to_string(),
                    text: Some(prompts::ALT_TEXT.to_string()),
                    image_url: None,
                },
                MessagePart {
                    part_type: "image_url".to_string(),
                    text: None,
                    image_url: Some(ImageUrl {
                        url: image_source.to_string(),
                    }),
                },
            ])),
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![user_message],
            max_completion_tokens: self.max_completion_tokens,
        };

        let response = self.http.chat_completion(&request).await?;

        // Absent content is a valid provider reply, not an error.
        let alt_text = response
            .choices
            .first()
            .and_then(|choice| match &choice.message.content {
                Some(ChatMessageContent::Text(text)) => Some(text.clone()),
                _ => None,
            });

        match &alt_text {
            Some(text) => tracing::info!("Generated alt text ({} chars)", text.len()),
            None => tracing::warn!("Provider reply carried no text content"),
        }

        Ok(alt_text)
    }
}
