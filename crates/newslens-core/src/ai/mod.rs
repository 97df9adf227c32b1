pub mod providers;

use std::sync::Arc;

pub use providers::{AiProvider, ClaudeApiProvider, GeminiApiProvider, OpenAiProvider};

use crate::config::AiConfig;
use crate::{Error, Result};

/// Build the provider selected in `[ai]`
pub fn create_provider(config: &AiConfig) -> Result<Arc<dyn AiProvider>> {
    let max_tokens = config.max_tokens.max(1);

    let provider: Arc<dyn AiProvider> = match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .openai_api_key
                .as_ref()
                .ok_or_else(|| Error::Config("OpenAI API key not configured".to_string()))?;
            Arc::new(OpenAiProvider::new(api_key, &config.openai_model, max_tokens))
        }
        "gemini_api" => {
            let api_key = config
                .gemini_api_key
                .as_ref()
                .ok_or_else(|| Error::Config("Gemini API key not configured".to_string()))?;
            Arc::new(GeminiApiProvider::new(api_key, &config.gemini_model, max_tokens)?)
        }
        "claude_api" => {
            let api_key = config
                .claude_api_key
                .as_ref()
                .ok_or_else(|| Error::Config("Claude API key not configured".to_string()))?;
            Arc::new(ClaudeApiProvider::new(api_key, &config.claude_model, max_tokens)?)
        }
        other => {
            return Err(Error::Config(format!("Unknown AI provider: {}", other)));
        }
    };

    tracing::debug!("Using AI provider {}", provider.name());
    Ok(provider)
}
