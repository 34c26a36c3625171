//! Settings store with environment variable substitution.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::settings::Settings;

/// Loads and saves [`Settings`] as a TOML file.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform default location
    /// (`<config dir>/pagequill/settings.toml`).
    pub fn at_default_path() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dir.join("pagequill").join("settings.toml")))
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields defaults.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Self::load_str(&content)
    }

    /// Load settings from a string.
    pub fn load_str(content: &str) -> Result<Settings, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let settings: Settings = toml::from_str(&expanded)?;
        Ok(settings)
    }

    /// Save settings, creating parent directories as needed.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.toml"));

        let settings = Settings {
            api_key: Some("key-abc".to_string()),
            model: "gemini-1.5-pro".to_string(),
            cached_models: vec!["gemini-1.5-pro".to_string(), "gemini-2.0-flash".to_string()],
        };
        store.save(&settings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_str_partial_file() {
        let settings = SettingsStore::load_str("model = \"gemini-2.0-flash\"").unwrap();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_env_var_expansion() {
        unsafe { std::env::set_var("PAGEQUILL_TEST_KEY", "expanded-key") };
        let settings = SettingsStore::load_str("api_key = \"${PAGEQUILL_TEST_KEY}\"").unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("expanded-key"));
    }

    #[test]
    fn test_unset_env_var_is_an_error() {
        let result = SettingsStore::load_str("api_key = \"${PAGEQUILL_DEFINITELY_UNSET}\"");
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = SettingsStore::load_str("model = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_path() {
        let expanded = SettingsStore::expand_path("~/pagequill");
        assert!(!expanded.starts_with('~'));
    }
}
