//! DeepL translation adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{build_client, endpoint};
use super::{ProviderError, Result, TranslationClient};
use crate::LocalcastError;
use crate::config::{ServiceConfig, required_credential};

/// DeepL `/v2/translate` client
pub struct DeeplTranslator {
    client: Client,
    auth_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

impl DeeplTranslator {
    pub fn new(config: &ServiceConfig) -> std::result::Result<Self, LocalcastError> {
        Ok(Self {
            client: build_client(&config.http)?,
            auth_key: required_credential(&config.translation.auth_key, "translation.auth_key")?,
            base_url: config.translation.base_url.clone(),
        })
    }
}

#[async_trait]
impl TranslationClient for DeeplTranslator {
    #[instrument(name = "deepl_translate", skip(self, text), fields(chars = text.chars().count()))]
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        // Nothing to translate; DeepL rejects empty text anyway.
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let url = endpoint(&self.base_url, "v2/translate");
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.auth_key))
            .form(&[("text", text), ("target_lang", target_lang)])
            .send()
            .await
            .map_err(|e| ProviderError::Translation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                403 => ProviderError::Translation("invalid or missing DeepL auth key".to_string()),
                456 => ProviderError::Translation("DeepL character quota exceeded".to_string()),
                _ => ProviderError::Translation(format!("DeepL returned {status}")),
            });
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Translation(format!("malformed response: {e}")))?;

        let translated = body
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::Translation("response had no translations".to_string()))?;

        debug!(target_lang, "translated text");
        Ok(translated)
    }
}
