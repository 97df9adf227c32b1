use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{http_client, AiProvider};
use crate::{Error, Result};

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: String,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

/// Gemini API provider
pub struct GeminiApiProvider {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl GeminiApiProvider {
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
impl AiProvider for GeminiApiProvider {
    fn name(&self) -> &str {
        "gemini_api"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens,
                temperature: 0.2,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::AiProvider(format!("Gemini API request failed: {}", e)))?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::AiProvider(format!("Failed to parse Gemini response: {}", e)))?;

        parse_reply(gemini_response)
    }
}

fn parse_reply(response: GeminiResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(Error::AiProvider(format!("Gemini API error: {}", error.message)));
    }

    response
        .candidates
        .and_then(|c| c.into_iter().next())
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .ok_or_else(|| Error::AiProvider("Gemini returned no candidates".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_joins_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hola "},{"text":"mundo"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parse_reply(response).unwrap(), "Hola mundo");
    }

    #[test]
    fn test_parse_reply_error() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"error":{"code":400,"message":"API key not valid"}}"#).unwrap();
        assert!(parse_reply(response).is_err());

        let empty: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(parse_reply(empty).is_err());
    }
}
