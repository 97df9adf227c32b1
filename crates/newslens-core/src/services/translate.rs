use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;

use super::language::{find_language, Language};
use crate::ai::{create_provider, AiProvider};
use crate::config::AppConfig;
use crate::feed::build_client;
use crate::nlp::text::truncate_chars;
use crate::outcome::Outcome;
use crate::{Error, Result};

/// A translation backend
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    async fn translate(&self, text: &str, target: &Language) -> Result<String>;
}

/// Google's public web translation endpoint, source language auto-detected
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(&self, text: &str, target: &Language) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("client", "gtx"), ("sl", "auto"), ("tl", target.code), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Other(format!("translation endpoint returned HTTP {}", status)));
        }

        let body: Value = response.json().await?;
        parse_google_response(&body)
    }
}

/// The first element of the reply is a list of `[translated, original, ...]` segments
fn parse_google_response(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Other("unexpected translation response".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(Error::Other("empty translation".to_string()));
    }
    Ok(translated)
}

/// Translation through the configured LLM provider
pub struct AiTranslator {
    provider: Arc<dyn AiProvider>,
}

impl AiTranslator {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl Translator for AiTranslator {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn translate(&self, text: &str, target: &Language) -> Result<String> {
        self.provider.translate(text, target.name).await
    }
}

/// Translates article text into one of the supported languages.
///
/// Never returns an error: unsupported languages, empty input and backend
/// failures come back as `Outcome::Failed` with a readable reason.
pub struct TranslationService {
    translator: Box<dyn Translator>,
    max_chars: usize,
}

impl TranslationService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let translator: Box<dyn Translator> = match config.translation.provider.as_str() {
            "google" => Box::new(GoogleTranslator::new(
                build_client(&config.sync)?,
                config.translation.endpoint.clone(),
            )),
            "ai" => Box::new(AiTranslator::new(create_provider(&config.ai)?)),
            other => {
                return Err(Error::Config(format!("Unknown translation provider: {}", other)));
            }
        };
        Ok(Self::with_translator(translator, config.translation.max_chars))
    }

    pub fn with_translator(translator: Box<dyn Translator>, max_chars: usize) -> Self {
        Self {
            translator,
            max_chars,
        }
    }

    pub async fn translate(&self, text: &str, code: &str) -> Outcome<String> {
        let Some(language) = find_language(code) else {
            return Outcome::failed(format!("Unsupported language code: {}", code));
        };
        if text.trim().is_empty() {
            return Outcome::failed("No article content to translate");
        }

        let input = truncate_chars(text, self.max_chars);
        let truncated = input.len() < text.len();
        tracing::info!(
            "Translating {} chars to {} via {}",
            input.chars().count(),
            language.name,
            self.translator.name()
        );

        match self.translator.translate(input, language).await {
            Ok(translated) if truncated => Outcome::degraded(
                translated,
                format!("only the first {} characters were translated", self.max_chars),
            ),
            Ok(translated) => Outcome::Success(translated),
            Err(e) => {
                tracing::warn!("Translation to {} failed: {}", language.code, e);
                Outcome::failed(e.to_string())
            }
        }
    }
}
