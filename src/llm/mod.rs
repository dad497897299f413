//! LLM — multi-provider adapter for the image review endpoint.
//!
//! DESIGN
//! ======
//! The `LlmClient` enum dispatches a plain system + user exchange to either
//! `OpenAI` chat completions or the Anthropic Messages API based on
//! `LLM_PROVIDER`. Both providers return trimmed assistant text.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::{LlmChat, LlmError};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either `OpenAI` or Anthropic.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    OpenAi(openai::OpenAiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// - `LLM_PROVIDER`: "openai" (default) or "anthropic"
    /// - `LLM_API_KEY_ENV`: name of env var holding the API key (e.g. `OPENAI_API_KEY`)
    /// - `LLM_MODEL`: model name (e.g. "gpt-4o-mini")
    /// - `LLM_BASE_URL`: custom base URL for compatible APIs
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::OpenAi => {
                LlmProvider::OpenAi(openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
            LlmProviderKind::Anthropic => LlmProvider::Anthropic(anthropic::AnthropicClient::new(
                config.api_key,
                config.base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        match &self.inner {
            LlmProvider::OpenAi(c) => c.chat(&self.model, system, user).await,
            LlmProvider::Anthropic(c) => c.chat(&self.model, system, user).await,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
