use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{http_client, AiProvider};
use crate::{Error, Result};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Option<Vec<ClaudeContent>>,
    error: Option<ClaudeError>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ClaudeError {
    message: String,
}

/// Claude/Anthropic API provider
pub struct ClaudeApiProvider {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeApiProvider {
    pub fn new(api_key: &str, model: &str, max_tokens: u32) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
        })
    }
}

#[async_trait::async_trait]
impl AiProvider for ClaudeApiProvider {
    fn name(&self) -> &str {
        "claude_api"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ClaudeRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::AiProvider(format!("Claude API request failed: {}", e)))?;

        let claude_response: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| Error::AiProvider(format!("Failed to parse Claude response: {}", e)))?;

        parse_reply(claude_response)
    }
}

fn parse_reply(response: ClaudeResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(Error::AiProvider(format!("Claude API error: {}", error.message)));
    }

    response
        .content
        .and_then(|c| c.into_iter().next())
        .map(|c| c.text)
        .ok_or_else(|| Error::AiProvider("Claude returned no content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply() {
        let ok: ClaudeResponse =
            serde_json::from_str(r#"{"content":[{"type":"text","text":"Bonjour"}]}"#).unwrap();
        assert_eq!(parse_reply(ok).unwrap(), "Bonjour");

        let err: ClaudeResponse =
            serde_json::from_str(r#"{"type":"error","error":{"type":"invalid_request_error","message":"bad key"}}"#)
                .unwrap();
        let message = parse_reply(err).unwrap_err().to_string();
        assert!(message.contains("bad key"));
    }

    #[test]
    fn test_request_shape() {
        let request = ClaudeRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: 64,
            messages: vec![ClaudeMessage {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 64);
    }
}
