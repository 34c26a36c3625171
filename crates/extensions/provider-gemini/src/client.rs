//! Gemini API client.

use reqwest::Client;
use tracing::debug;

use pagequill_protocols::error::ProviderError;

use crate::types::*;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Create a client against a non-default endpoint (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse response: {}", e)))
    }

    /// List the models able to serve `generateContent`, by bare identifier.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);

        debug!("Gemini list_models");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), body));
        }

        let listing: ListModelsResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse model list: {}", e)))?;

        Ok(listing
            .models
            .iter()
            .filter(|model| model.supports_generation())
            .map(|model| model.short_name().to_string())
            .collect())
    }

    /// Surface the API's own error message when the body parses as a Gemini
    /// error envelope, the raw body otherwise.
    fn api_error(status: u16, body: String) -> ProviderError {
        match serde_json::from_str::<GeminiError>(&body) {
            Ok(envelope) => ProviderError::from_api_response(status, envelope.error.message),
            Err(_) => ProviderError::from_api_response(status, body),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
