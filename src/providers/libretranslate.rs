use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use super::{ProviderArgs, TranslationProvider, TranslationResult};
use crate::errors::{ConfigError, ProviderError};
use crate::language_utils::{is_auto, AUTO_LANGUAGE};

/// Request body for the `/translate` endpoint
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source language code, or `auto`
    source: &'a str,
    /// Destination language code
    target: &'a str,
    /// Input format, always plain text for chat messages
    format: &'a str,
    /// API key, required by some instances
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Response body from the `/translate` endpoint
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
    #[serde(rename = "detectedLanguage")]
    detected_language: Option<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    language: String,
}

/// One entry of the `/languages` catalog
#[derive(Debug, Deserialize)]
struct LanguageEntry {
    code: String,
    name: String,
}

/// Client for a self-hosted LibreTranslate instance.
///
/// The instance URL comes from `provider.args.url` (scheme optional,
/// https assumed). The language catalog is fetched from the instance as
/// part of construction; a failed fetch fails the whole provider load.
/// Codes are lowercased.
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Instance base URL without a trailing slash
    base_url: String,
    /// API key for instances that require one
    api_key: Option<String>,
    /// Catalog fetched from the instance at construction time
    languages: HashMap<String, String>,
}

impl LibreTranslate {
    /// Build a client for the configured instance and fetch its catalog
    pub async fn connect(args: &ProviderArgs) -> Result<Self, ConfigError> {
        let raw_url = args.get("url").ok_or(ConfigError::MissingArgument("url"))?;
        let raw_url = if raw_url.starts_with("http://") || raw_url.starts_with("https://") {
            raw_url.clone()
        } else {
            format!("https://{}", raw_url)
        };
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidArgument(format!("url: {}", e)))?;

        let mut provider = Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: args.get("api_key").cloned(),
            languages: HashMap::from([(
                AUTO_LANGUAGE.to_string(),
                "Detect language".to_string(),
            )]),
        };

        provider.fetch_languages().await.map_err(|e| {
            ConfigError::InitFailed(format!(
                "{} does not point to a compatible libretranslate instance: {}",
                provider.base_url, e
            ))
        })?;
        info!(
            "Loaded {} languages from {}",
            provider.languages.len(),
            provider.base_url
        );

        Ok(provider)
    }

    async fn fetch_languages(&mut self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(format!("{}/languages", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let entries: Vec<LanguageEntry> = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        for entry in entries {
            self.languages.insert(entry.code, entry.name);
        }
        Ok(())
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslate {
    async fn translate(
        &self,
        text: &str,
        to_lang: &str,
        from_lang: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let from_lang = if is_auto(from_lang) { AUTO_LANGUAGE } else { from_lang };

        let request = TranslateRequest {
            q: text,
            source: from_lang,
            target: to_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 403 {
            return Err(ProviderError::ApiError {
                status_code: 403,
                message: "Request forbidden, check the configured api key".to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let source_language = if from_lang == AUTO_LANGUAGE {
            body.detected_language
                .map_or_else(|| from_lang.to_string(), |detected| detected.language)
        } else {
            from_lang.to_string()
        };

        Ok(TranslationResult {
            text: body.translated_text,
            source_language,
        })
    }

    fn is_supported_language(&self, code: &str) -> bool {
        self.languages.contains_key(&code.to_lowercase())
    }

    fn get_language_name(&self, code: &str) -> Result<String, ProviderError> {
        self.languages
            .get(&code.to_lowercase())
            .cloned()
            .ok_or_else(|| ProviderError::UnsupportedLanguage(code.to_string()))
    }

    fn supported_languages(&self) -> &HashMap<String, String> {
        &self.languages
    }
}
