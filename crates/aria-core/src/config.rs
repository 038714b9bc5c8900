//! Environment-driven configuration.
//!
//! Values come from the process environment (the CLI loads a `.env` file
//! first). Empty variables count as unset.

use std::{path::PathBuf, str::FromStr};

use crate::error::{AriaError, IoResultExt, Result};

/// Default sampling temperature for plan decomposition.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default completion budget.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

const DEEPSEEK_DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Supported model providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    DeepSeek,
    OpenAi,
}

impl FromStr for Provider {
    type Err = AriaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(Provider::DeepSeek),
            "openai" => Ok(Provider::OpenAi),
            other => Err(AriaError::configuration(format!(
                "Unsupported AI provider: {other} (expected 'deepseek' or 'openai')"
            ))),
        }
    }
}

impl Provider {
    /// Model requested from this provider.
    pub fn model(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "deepseek-chat",
            Provider::OpenAi => "gpt-4",
        }
    }

    /// Human readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "DeepSeek",
            Provider::OpenAi => "OpenAI",
        }
    }

    /// Environment variable holding the API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// API key and endpoint for one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// A fully resolved provider endpoint, ready for the model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub provider: Provider,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Raw `AI_PROVIDER` value, parsed when a client is needed
    pub provider: String,
    pub deepseek: ProviderCredentials,
    pub openai: ProviderCredentials,
    /// Override for where plans are saved
    pub plans_dir: Option<PathBuf>,
    /// Directory for the log file; stderr logging when unset
    pub logs_dir: Option<PathBuf>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            provider: get("AI_PROVIDER").unwrap_or_else(|| "deepseek".to_string()),
            deepseek: ProviderCredentials {
                api_key: get("DEEPSEEK_API_KEY"),
                base_url: get("DEEPSEEK_BASE_URL"),
            },
            openai: ProviderCredentials {
                api_key: get("OPENAI_API_KEY"),
                base_url: get("OPENAI_BASE_URL"),
            },
            plans_dir: get("PLANS_DIR").map(PathBuf::from),
            logs_dir: get("LOGS_DIR").map(PathBuf::from),
        }
    }

    /// The configured provider.
    ///
    /// # Errors
    ///
    /// Returns `AriaError::Configuration` for an unknown provider name.
    pub fn provider(&self) -> Result<Provider> {
        self.provider.parse()
    }

    /// Check that the selected provider has credentials and resolve its
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AriaError::Configuration` when the provider is unknown or
    /// its API key is missing.
    pub fn validate(&self) -> Result<ProviderSettings> {
        let provider = self.provider()?;
        let (credentials, default_base_url) = match provider {
            Provider::DeepSeek => (&self.deepseek, DEEPSEEK_DEFAULT_BASE_URL),
            Provider::OpenAi => (&self.openai, OPENAI_DEFAULT_BASE_URL),
        };

        let api_key = credentials.api_key.clone().ok_or_else(|| {
            AriaError::configuration(format!(
                "{} is required when using {} provider",
                provider.api_key_var(),
                provider.display_name()
            ))
        })?;

        let base_url = credentials
            .base_url
            .as_deref()
            .unwrap_or(default_base_url)
            .trim_end_matches('/')
            .to_string();

        Ok(ProviderSettings {
            provider,
            api_key,
            base_url,
            model: provider.model().to_string(),
        })
    }

    /// Directory where plans are saved when no explicit path is given.
    ///
    /// Defaults to `$XDG_DATA_HOME/aria/plans`, created on demand.
    ///
    /// # Errors
    ///
    /// Returns `AriaError::FileSystem` if the XDG directory cannot be
    /// created.
    pub fn plans_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.plans_dir {
            return Ok(dir.clone());
        }
        let data_home = PathBuf::from("$XDG_DATA_HOME/aria/plans");
        xdg::BaseDirectories::with_prefix("aria")
            .create_data_directory("plans")
            .at_path(&data_home)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.provider().unwrap(), Provider::DeepSeek);
        assert!(config.plans_dir.is_none());
        assert!(config.logs_dir.is_none());
    }

    #[test]
    fn test_missing_deepseek_key() {
        let err = config_from(&[]).validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("DEEPSEEK_API_KEY is required when using DeepSeek provider"));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let err = config_from(&[("DEEPSEEK_API_KEY", "  ")])
            .validate()
            .unwrap_err();
        assert!(matches!(err, AriaError::Configuration { .. }));
    }

    #[test]
    fn test_deepseek_default_endpoint() {
        let settings = config_from(&[("DEEPSEEK_API_KEY", "test-key")])
            .validate()
            .unwrap();
        assert_eq!(settings.api_key, "test-key");
        assert_eq!(settings.base_url, "https://api.deepseek.com/v1");
        assert_eq!(settings.model, "deepseek-chat");
    }

    #[test]
    fn test_openai_provider_with_custom_base_url() {
        let settings = config_from(&[
            ("AI_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
        ])
        .validate()
        .unwrap();
        assert_eq!(settings.provider, Provider::OpenAi);
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
        assert_eq!(settings.model, "gpt-4");
    }

    #[test]
    fn test_openai_requires_its_own_key() {
        let err = config_from(&[("AI_PROVIDER", "openai"), ("DEEPSEEK_API_KEY", "x")])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY is required"));
    }

    #[test]
    fn test_unknown_provider() {
        let err = config_from(&[("AI_PROVIDER", "llama")]).provider().unwrap_err();
        assert!(err.to_string().contains("Unsupported AI provider: llama"));
    }

    #[test]
    fn test_plans_dir_override() {
        let config = config_from(&[("PLANS_DIR", "/tmp/aria-plans")]);
        assert_eq!(
            config.plans_dir().unwrap(),
            PathBuf::from("/tmp/aria-plans")
        );
    }
}
