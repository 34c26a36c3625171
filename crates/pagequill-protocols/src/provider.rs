//! Generative text provider boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn of a completion conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A remote generative text endpoint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one blocking completion over the given turns and return the
    /// response text.
    async fn generate(&self, model: &str, turns: &[Turn]) -> Result<String, ProviderError>;

    /// List the model identifiers usable with [`generate`](Self::generate).
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;
}
