mod claude_api;
mod gemini_api;
mod openai;

pub use claude_api::ClaudeApiProvider;
pub use gemini_api::GeminiApiProvider;
pub use openai::OpenAiProvider;

use std::time::Duration;

use reqwest::Client;

use crate::Result;

/// Timeout applied to every LLM request
pub(crate) const AI_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Client for the providers that talk to their REST APIs directly
pub(crate) fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(AI_REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// A hosted language model used by the AI-backed translation and QA services
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider name for logs and status messages
    fn name(&self) -> &str;

    /// Send a single user prompt and return the model's reply
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Translate `text` into `language` (a display name such as "French")
    async fn translate(&self, text: &str, language: &str) -> Result<String> {
        let prompt = format!(
            "Translate the following news article into {language}. \
Return only the translation, without notes or quotation marks:\n\n{text}"
        );
        Ok(self.complete(&prompt).await?.trim().to_string())
    }

    /// Answer `question` with a short span taken from `context`
    async fn answer(&self, question: &str, context: &str) -> Result<String> {
        let prompt = format!(
            "Answer the question using only the article below. Reply with the shortest \
exact phrase from the article that answers it, nothing else.\n\n\
Article:\n{context}\n\nQuestion: {question}"
        );
        Ok(self.complete(&prompt).await?.trim().to_string())
    }
}
