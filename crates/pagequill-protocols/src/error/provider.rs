//! Text generation provider errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("No API credential configured")]
    MissingCredential,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Map a non-success HTTP status plus the API's message text.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            _ => ProviderError::ApiError { status, message },
        }
    }

    /// The message text to show the user, per the boundary contract:
    /// the API's own message when it sent one, the error display otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::AuthenticationFailed(message) => message.clone(),
            ProviderError::ApiError { message, .. } => message.clone(),
            _ => self.to_string(),
        }
    }
}
