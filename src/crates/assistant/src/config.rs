//! Process-wide settings.
//!
//! Loaded once at startup from `GENESIS_`-prefixed environment variables and
//! passed down explicitly; nothing reads the environment after startup.

use genesis_api::BackendConfig;
use llm::{CompletionModel, LlmError, LocalLlmConfig, RemoteLlmConfig};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tooling::config::{get_env, get_env_bool, get_env_or, get_env_parse, ConfigBuilder};
use tooling::{Result, ToolingError};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which completion provider to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    Ollama,
    OpenAi,
}

impl FromStr for LlmProvider {
    type Err = ToolingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(ToolingError::General(format!(
                "Unknown LLM provider: {} (expected ollama or openai)",
                other
            ))),
        }
    }
}

/// Completion-model settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub base_url: String,
    pub model: String,
    /// Required for remote providers only.
    pub api_key: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Ollama,
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

/// All runtime settings for the assistant.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Genesis backend base URL.
    pub backend_url: String,
    /// Bearer token sent on every backend call.
    pub auth_token: String,
    /// Backend request timeout in seconds.
    pub timeout_secs: u64,
    pub llm: LlmSettings,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            auth_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            llm: LlmSettings::default(),
            verbose: false,
        }
    }
}

impl ConfigBuilder for Settings {
    fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            return Err(ToolingError::General("backend URL must be set".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ToolingError::General("timeout must be non-zero".into()));
        }
        if self.llm.provider == LlmProvider::OpenAi && self.llm.api_key.is_none() {
            return Err(ToolingError::General(
                "GENESIS_LLM_API_KEY must be set for the openai provider".into(),
            ));
        }
        Ok(())
    }

    fn from_env(prefix: &str) -> Result<Self> {
        let provider = match get_env(&format!("{}LLM_PROVIDER", prefix))? {
            Some(raw) => raw.parse()?,
            None => LlmProvider::default(),
        };
        let default_llm_url = match provider {
            LlmProvider::Ollama => DEFAULT_OLLAMA_URL,
            LlmProvider::OpenAi => "https://api.openai.com/v1",
        };
        Ok(Self {
            backend_url: get_env_or(&format!("{}BACKEND_URL", prefix), DEFAULT_BACKEND_URL)?,
            auth_token: get_env_or(&format!("{}AUTH_TOKEN", prefix), "")?,
            timeout_secs: get_env_parse(&format!("{}TIMEOUT_SECS", prefix))?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            llm: LlmSettings {
                provider,
                base_url: get_env_or(&format!("{}LLM_BASE_URL", prefix), default_llm_url)?,
                model: get_env_or(&format!("{}LLM_MODEL", prefix), DEFAULT_MODEL)?,
                api_key: get_env(&format!("{}LLM_API_KEY", prefix))?,
            },
            verbose: get_env_bool(&format!("{}VERBOSE", prefix))?.unwrap_or(false),
        })
    }

    fn merge(&mut self, other: Self) -> &mut Self {
        if self.backend_url.is_empty() {
            self.backend_url = other.backend_url;
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = other.timeout_secs;
        }
        if self.llm.base_url.is_empty() {
            self.llm.base_url = other.llm.base_url;
        }
        if self.llm.model.is_empty() {
            self.llm.model = other.llm.model;
        }
        self
    }
}

impl Settings {
    /// Load from `GENESIS_*` variables, validated.
    pub fn load() -> Result<Self> {
        Self::from_env_with_defaults("GENESIS_")
    }

    /// Backend client configuration.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(&self.backend_url, &self.auth_token)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Build the configured completion model.
    ///
    /// For a local provider this probes the server and logs a warning when
    /// it is unreachable; the first real request will surface the error.
    pub async fn completion_model(&self) -> std::result::Result<Arc<dyn CompletionModel>, LlmError> {
        match self.llm.provider {
            LlmProvider::Ollama => {
                let config = LocalLlmConfig::new(&self.llm.base_url, &self.llm.model);
                let client = llm::local::OllamaClient::new(config);
                if !client.check_health().await.unwrap_or(false) {
                    tracing::warn!(url = %self.llm.base_url, "Ollama server not reachable");
                }
                Ok(Arc::new(client))
            }
            LlmProvider::OpenAi => {
                let api_key = self
                    .llm
                    .api_key
                    .clone()
                    .ok_or_else(|| LlmError::ApiKeyNotFound("GENESIS_LLM_API_KEY".to_string()))?;
                let config = RemoteLlmConfig::new(api_key, &self.llm.base_url, &self.llm.model);
                Ok(Arc::new(llm::remote::OpenAiClient::new(config)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("ollama".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert_eq!(" OpenAI ".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert!("bard".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_backend_config_carries_timeout() {
        let mut settings = Settings::default();
        settings.timeout_secs = 5;
        assert_eq!(settings.backend_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_openai_requires_api_key() {
        let mut settings = Settings::default();
        settings.llm.provider = LlmProvider::OpenAi;
        assert!(settings.validate().is_err());
        settings.llm.api_key = Some("sk-test".to_string());
        assert!(settings.validate().is_ok());
    }
}
