use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};

use super::AiProvider;
use crate::{Error, Result};

/// OpenAI API provider
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, max_tokens: u32) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| Error::AiProvider(e.to_string()))?,
            )])
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| Error::AiProvider(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::AiProvider(format!("OpenAI request failed: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| Error::AiProvider("OpenAI returned no content".to_string()))
    }
}
