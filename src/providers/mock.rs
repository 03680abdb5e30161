/*!
 * Mock provider for testing and dry runs.
 *
 * The mock simulates the backend behaviors the policy layer cares about:
 * - `MockProvider::tagged()` - "translates" by tagging text with the target code
 * - `MockProvider::identity()` - returns the input unchanged (backend no-op)
 * - `MockProvider::failing()` - always fails with a request error
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{TranslationProvider, TranslationResult};
use crate::errors::ProviderError;
use crate::language_utils::{is_auto, AUTO_LANGUAGE};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Prefix the text with the target code so output differs from input
    Tagged,
    /// Return the input text unchanged
    Identity,
    /// Always fail with a request error
    Failing,
}

/// Deterministic in-process translation backend.
///
/// When asked to detect the source language it reports a fixed code,
/// configurable with [`MockProvider::with_detected_language`].
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Code reported as the detected source language
    detected_language: String,
    /// Small fixed catalog
    languages: HashMap<String, String>,
    /// Number of translate calls made
    call_count: AtomicUsize,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        let languages = [
            (AUTO_LANGUAGE, "Detect language"),
            ("en", "English"),
            ("de", "German"),
            ("fr", "French"),
            ("es", "Spanish"),
            ("fi", "Finnish"),
            ("ru", "Russian"),
        ]
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

        Self {
            behavior,
            detected_language: "xx".to_string(),
            languages,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock that tags translated text with the target code
    pub fn tagged() -> Self {
        Self::new(MockBehavior::Tagged)
    }

    /// Create a mock that echoes the input unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create a mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set the code reported when source detection is requested
    pub fn with_detected_language(mut self, code: impl Into<String>) -> Self {
        self.detected_language = code.into();
        self
    }

    /// Number of translate calls this instance has received
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    fn source_language(&self, from_lang: &str) -> String {
        if is_auto(from_lang) {
            self.detected_language.clone()
        } else {
            from_lang.to_string()
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(
        &self,
        text: &str,
        to_lang: &str,
        from_lang: &str,
    ) -> Result<TranslationResult, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Identity => Ok(TranslationResult {
                text: text.to_string(),
                source_language: self.source_language(from_lang),
            }),
            MockBehavior::Tagged => Ok(TranslationResult {
                text: format!("[{}] {}", to_lang, text),
                source_language: self.source_language(from_lang),
            }),
        }
    }

    fn is_supported_language(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    fn get_language_name(&self, code: &str) -> Result<String, ProviderError> {
        self.languages
            .get(code)
            .cloned()
            .ok_or_else(|| ProviderError::UnsupportedLanguage(code.to_string()))
    }

    fn supported_languages(&self) -> &HashMap<String, String> {
        &self.languages
    }
}
