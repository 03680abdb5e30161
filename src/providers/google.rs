use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::{header, Client};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::{TranslationProvider, TranslationResult};
use crate::errors::ProviderError;
use crate::language_utils::{is_auto, AUTO_LANGUAGE};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

// Needs to be some real browser so Google accepts it
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";

// From https://cloud.google.com/translate/docs/languages
static SUPPORTED_LANGUAGES: Lazy<HashMap<String, String>> = Lazy::new(|| {
    [
        (AUTO_LANGUAGE, "Detect language"),
        ("af", "Afrikaans"),
        ("sq", "Albanian"),
        ("am", "Amharic"),
        ("ar", "Arabic"),
        ("hy", "Armenian"),
        ("az", "Azerbaijani"),
        ("eu", "Basque"),
        ("be", "Belarusian"),
        ("bn", "Bengali"),
        ("bs", "Bosnian"),
        ("bg", "Bulgarian"),
        ("ca", "Catalan"),
        ("ceb", "Cebuano"),
        ("zh-CN", "Chinese (Simplified)"),
        ("zh", "Chinese (Simplified)"),
        ("zh-TW", "Chinese (Traditional)"),
        ("co", "Corsican"),
        ("hr", "Croatian"),
        ("cs", "Czech"),
        ("da", "Danish"),
        ("nl", "Dutch"),
        ("en", "English"),
        ("eo", "Esperanto"),
        ("et", "Estonian"),
        ("fi", "Finnish"),
        ("fr", "French"),
        ("fy", "Frisian"),
        ("gl", "Galician"),
        ("ka", "Georgian"),
        ("de", "German"),
        ("el", "Greek"),
        ("gu", "Gujarati"),
        ("ht", "HaitianCreole"),
        ("ha", "Hausa"),
        ("haw", "Hawaiian"),
        ("he", "Hebrew"),
        ("iw", "Hebrew"),
        ("hi", "Hindi"),
        ("hmn", "Hmong"),
        ("hu", "Hungarian"),
        ("is", "Icelandic"),
        ("ig", "Igbo"),
        ("id", "Indonesian"),
        ("ga", "Irish"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("jw", "Javanese"),
        ("kn", "Kannada"),
        ("kk", "Kazakh"),
        ("km", "Khmer"),
        ("ko", "Korean"),
        ("ku", "Kurdish"),
        ("ky", "Kyrgyz"),
        ("lo", "Lao"),
        ("la", "Latin"),
        ("lv", "Latvian"),
        ("lt", "Lithuanian"),
        ("lb", "Luxembourgish"),
        ("mk", "Macedonian"),
        ("mg", "Malagasy"),
        ("ms", "Malay"),
        ("ml", "Malayalam"),
        ("mt", "Maltese"),
        ("mi", "Maori"),
        ("mr", "Marathi"),
        ("mn", "Mongolian"),
        ("my", "Myanmar"),
        ("ne", "Nepali"),
        ("no", "Norwegian"),
        ("ny", "Nyanja"),
        ("ps", "Pashto"),
        ("fa", "Persian"),
        ("pl", "Polish"),
        ("pt", "Portuguese"),
        ("pa", "Punjabi"),
        ("ro", "Romanian"),
        ("ru", "Russian"),
        ("sm", "Samoan"),
        ("gd", "ScotsGaelic"),
        ("sr", "Serbian"),
        ("st", "Sesotho"),
        ("sn", "Shona"),
        ("sd", "Sindhi"),
        ("si", "Sinhala"),
        ("sk", "Slovak"),
        ("sl", "Slovenian"),
        ("so", "Somali"),
        ("es", "Spanish"),
        ("su", "Sundanese"),
        ("sw", "Swahili"),
        ("sv", "Swedish"),
        ("tl", "Tagalog"),
        ("tg", "Tajik"),
        ("ta", "Tamil"),
        ("te", "Telugu"),
        ("th", "Thai"),
        ("tr", "Turkish"),
        ("uk", "Ukrainian"),
        ("ur", "Urdu"),
        ("uz", "Uzbek"),
        ("vi", "Vietnamese"),
        ("cy", "Welsh"),
        ("xh", "Xhosa"),
        ("yi", "Yiddish"),
        ("yo", "Yoruba"),
        ("zu", "Zulu"),
    ]
    .iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
});

/// Client for the free Google web-translate endpoint.
///
/// No credentials and no post-construction step; the catalog is static.
/// Codes are matched exactly as listed (mixed case for the regional
/// Chinese variants).
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
}

impl GoogleTranslate {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        to_lang: &str,
        from_lang: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let from_lang = if is_auto(from_lang) { AUTO_LANGUAGE } else { from_lang };

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("dt", "t"),
                ("q", text),
                ("sl", from_lang),
                ("tl", to_lang),
            ])
            .header(header::USER_AGENT, USER_AGENT)
            .header("Accept-Charset", "UTF-8")
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

        let data: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let segments = data
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("missing translation segments".to_string()))?;
        let translated: String = segments
            .iter()
            .filter_map(|item| item.get(0).and_then(Value::as_str))
            .collect();

        // Index 2 of the gtx payload carries the language the endpoint
        // actually translated from
        let source_language = data
            .get(2)
            .and_then(Value::as_str)
            .filter(|code| !code.is_empty())
            .unwrap_or(from_lang)
            .to_string();
        debug!("Google reported source language {}", source_language);

        Ok(TranslationResult {
            text: translated,
            source_language,
        })
    }

    fn is_supported_language(&self, code: &str) -> bool {
        SUPPORTED_LANGUAGES.contains_key(code)
    }

    fn get_language_name(&self, code: &str) -> Result<String, ProviderError> {
        SUPPORTED_LANGUAGES
            .get(code)
            .cloned()
            .ok_or_else(|| ProviderError::UnsupportedLanguage(code.to_string()))
    }

    fn supported_languages(&self) -> &HashMap<String, String> {
        &SUPPORTED_LANGUAGES
    }
}
