//! Settings schema.

use serde::{Deserialize, Serialize};

/// Model used until the user picks one from the fetched list.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API credential for the generative endpoint. Absent until configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Selected model identifier.
    pub model: String,

    /// Cached model identifiers from the last fetch.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cached_models: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            cached_models: Vec::new(),
        }
    }
}

impl Settings {
    /// Whether a credential has been configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}
