use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::{TranslationProvider, TranslationResult};
use crate::errors::ProviderError;
use crate::language_utils::{is_auto, AUTO_LANGUAGE};

const ENDPOINT: &str = "https://www2.deepl.com/jsonrpc";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";

// The web endpoint throttles back-to-back JSON-RPC calls from one client
const INTER_REQUEST_DELAY: Duration = Duration::from_secs(1);

static PARAGRAPH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s*\n)+\s*").expect("paragraph regex is valid"));

static SUPPORTED_LANGUAGES: Lazy<HashMap<String, String>> = Lazy::new(|| {
    [
        ("DE", "German"),
        ("EN", "English"),
        ("FR", "French"),
        ("ES", "Spanish"),
        ("IT", "Italian"),
        ("NL", "Dutch"),
        ("PL", "Polish"),
        ("PT", "Portuguese"),
        ("RU", "Russian"),
    ]
    .iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
});

/// Client for the DeepL web JSON-RPC endpoint.
///
/// Translation runs in two phases: `LMT_split_into_sentences` breaks the
/// text into per-paragraph sentence lists and reports the detected source
/// language, then `LMT_handle_jobs` translates each sentence with its
/// surrounding sentences as context. Codes are uppercased.
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// Monotonic JSON-RPC request id
    request_id: AtomicU64,
}

impl DeepL {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            request_id: AtomicU64::new(0),
        }
    }

    fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn split_paragraphs(text: &str) -> Vec<String> {
        PARAGRAPH_REGEX
            .split(text)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let request = json!({
            "id": self.next_request_id(),
            "method": format!("LMT_{}", method),
            "jsonrpc": "2.0",
            "params": params,
        });

        let response = self
            .client
            .post(ENDPOINT)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "*/*")
            .header(header::CONTENT_TYPE, "text/plain")
            .header(header::ORIGIN, "https://www.deepl.com")
            .header(header::REFERER, "https://www.deepl.com/translator")
            .header("Accept-Charset", "UTF-8")
            .header("DNT", "1")
            .body(request.to_string())
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

        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Split paragraphs into sentences and learn the detected source language
    async fn request_split_sentences(
        &self,
        paragraphs: &[String],
        from_lang: &str,
    ) -> Result<(Vec<Vec<String>>, String), ProviderError> {
        let data = self
            .rpc(
                "split_into_sentences",
                json!({
                    "texts": paragraphs,
                    "lang": {
                        "lang_user_selected": from_lang,
                        "user_preferred_langs": [],
                    },
                }),
            )
            .await?;

        let result = data
            .get("result")
            .ok_or_else(|| ProviderError::ParseError("missing result object".to_string()))?;
        let sentences: Vec<Vec<String>> = result
            .get("splitted_texts")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .ok_or_else(|| ProviderError::ParseError("missing splitted_texts".to_string()))?;
        let detected = result
            .get("lang")
            .and_then(Value::as_str)
            .unwrap_or(from_lang)
            .to_string();

        Ok((sentences, detected))
    }

    /// Translate every sentence, keeping its paragraph as context
    async fn request_translate(
        &self,
        mut paragraphs: Vec<Vec<String>>,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<Vec<Vec<String>>, ProviderError> {
        let mut jobs = Vec::new();
        let mut job_indexes = Vec::new();
        for (pi, paragraph) in paragraphs.iter().enumerate() {
            for (si, sentence) in paragraph.iter().enumerate() {
                jobs.push(json!({
                    "kind": "default",
                    "raw_en_context_before": &paragraph[..si],
                    "raw_en_sentence": sentence,
                    "raw_en_context_after": &paragraph[si + 1..],
                }));
                job_indexes.push((pi, si));
            }
        }

        let data = self
            .rpc(
                "handle_jobs",
                json!({
                    "jobs": jobs,
                    "lang": {
                        "source_lang_computed": from_lang,
                        "target_lang": to_lang,
                        "user_preferred_langs": [],
                    },
                }),
            )
            .await?;

        let result = data
            .get("result")
            .ok_or_else(|| ProviderError::ParseError("missing result object".to_string()))?;
        // Some revisions of the endpoint key translations by job id,
        // others return a plain list
        let translations: Vec<&Value> = match result.get("translations") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(map)) => map.values().collect(),
            _ => return Err(ProviderError::ParseError("missing translations".to_string())),
        };

        for (ji, translation) in translations.iter().enumerate() {
            let Some(&(pi, si)) = job_indexes.get(ji) else {
                break;
            };
            let best_beam = translation
                .get("beams")
                .and_then(|beams| beams.get(0))
                .and_then(|beam| beam.get("postprocessed_sentence"))
                .and_then(Value::as_str);
            if let Some(sentence) = best_beam {
                paragraphs[pi][si] = sentence.to_string();
            }
        }

        Ok(paragraphs)
    }
}

impl Default for DeepL {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationProvider for DeepL {
    async fn translate(
        &self,
        text: &str,
        to_lang: &str,
        from_lang: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let from_lang = if is_auto(from_lang) {
            AUTO_LANGUAGE.to_string()
        } else {
            from_lang.to_uppercase()
        };
        let to_lang = to_lang.to_uppercase();

        let paragraphs = Self::split_paragraphs(text);
        let (sentences, detected) = self.request_split_sentences(&paragraphs, &from_lang).await?;
        tokio::time::sleep(INTER_REQUEST_DELAY).await;
        let translated = self.request_translate(sentences, &detected, &to_lang).await?;

        Ok(TranslationResult {
            text: translated
                .iter()
                .map(|paragraph| paragraph.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
            source_language: detected,
        })
    }

    fn is_supported_language(&self, code: &str) -> bool {
        is_auto(code) || SUPPORTED_LANGUAGES.contains_key(&code.to_uppercase())
    }

    fn get_language_name(&self, code: &str) -> Result<String, ProviderError> {
        if is_auto(code) {
            return Ok("Detect language".to_string());
        }
        SUPPORTED_LANGUAGES
            .get(&code.to_uppercase())
            .cloned()
            .ok_or_else(|| ProviderError::UnsupportedLanguage(code.to_string()))
    }

    fn supported_languages(&self) -> &HashMap<String, String> {
        &SUPPORTED_LANGUAGES
    }
}
