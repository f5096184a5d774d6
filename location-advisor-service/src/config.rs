//! Process-wide LLM configuration.
//!
//! Resolved once at startup from environment variables and carried in the
//! shared application state; no component re-reads the environment per call.

use tracing::info;

/// Which chat-completion backend the interpreter talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    OpenAi,
    Simulate,
}

impl Provider {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ollama" => Provider::Ollama,
            "openai" => Provider::OpenAi,
            _ => Provider::Simulate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Ollama => "ollama",
            Provider::OpenAi => "openai",
            Provider::Simulate => "simulate",
        }
    }
}

/// Immutable LLM configuration for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub enabled: bool,
    pub provider: Provider,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl LlmConfig {
    /// Read configuration from the environment. Missing variables resolve to
    /// the simulated (heuristic-only) mode.
    pub fn from_env() -> Self {
        let enabled = std::env::var("LLM_ENABLED")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let provider = std::env::var("LLM_PROVIDER")
            .map(|v| Provider::parse(&v))
            .unwrap_or(Provider::Simulate);

        let endpoint = std::env::var("LLM_ENDPOINT").unwrap_or_else(|_| {
            match provider {
                Provider::OpenAi => "https://api.openai.com/v1".to_string(),
                _ => "http://localhost:11434/v1".to_string(),
            }
        });

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| {
            match provider {
                Provider::OpenAi => "gpt-4o-mini".to_string(),
                _ => "llama3.1".to_string(),
            }
        });

        let api_key = std::env::var("OPENAI_API_KEY").ok();

        let config = Self {
            enabled,
            provider,
            endpoint,
            model,
            api_key,
        };

        info!(
            provider = config.provider.as_str(),
            enabled = config.enabled,
            model = %config.model,
            "Resolved LLM configuration"
        );

        config
    }

    /// True when the interpreter should attempt a live chat-completion call.
    pub fn llm_mode(&self) -> bool {
        self.enabled && self.provider != Provider::Simulate
    }

    /// Configuration for a heuristic-only instance (used by tests).
    #[cfg(test)]
    pub fn simulated() -> Self {
        Self {
            enabled: false,
            provider: Provider::Simulate,
            endpoint: "http://localhost:11434/v1".to_string(),
            model: "llama3.1".to_string(),
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_parses_to_simulate() {
        assert_eq!(Provider::parse("ollama"), Provider::Ollama);
        assert_eq!(Provider::parse("OpenAI"), Provider::OpenAi);
        assert_eq!(Provider::parse("whatever"), Provider::Simulate);
    }

    #[test]
    fn simulate_provider_never_enters_llm_mode() {
        let config = LlmConfig {
            enabled: true,
            provider: Provider::Simulate,
            endpoint: String::new(),
            model: String::new(),
            api_key: None,
        };
        assert!(!config.llm_mode());
    }

    #[test]
    fn disabled_flag_overrides_provider() {
        let config = LlmConfig {
            enabled: false,
            provider: Provider::Ollama,
            endpoint: String::new(),
            model: String::new(),
            api_key: None,
        };
        assert!(!config.llm_mode());
    }
}
