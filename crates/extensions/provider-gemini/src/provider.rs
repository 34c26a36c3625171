//! Gemini implementation of the text generation boundary.

use async_trait::async_trait;
use tracing::debug;

use pagequill_protocols::error::ProviderError;
use pagequill_protocols::provider::{Role, TextGenerator, Turn};

use crate::client::GeminiClient;
use crate::types::*;

/// Gemini text generator.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: String) -> Self {
        Self {
            client: GeminiClient::new(api_key),
        }
    }

    /// Create a provider over an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }

    fn convert_turns(turns: &[Turn]) -> Vec<Content> {
        turns
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::User => "user",
                    Role::Model => "model",
                };
                Content::text(role, turn.text.clone())
            })
            .collect()
    }

    fn extract_text(response: &GenerateContentResponse) -> Result<String, ProviderError> {
        response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.first_text())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Malformed("response carries no text part".to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, model: &str, turns: &[Turn]) -> Result<String, ProviderError> {
        debug!("Gemini generate: model={} turns={}", model, turns.len());

        let request = GenerateContentRequest {
            contents: Self::convert_turns(turns),
            generation_config: None,
        };

        let response = self.client.generate_content(model, request).await?;
        Self::extract_text(&response)
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        self.client.list_models().await
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
