/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for various translation
 * backends:
 * - Google: free web-translate endpoint with a static catalog
 * - DeepL: sentence-splitting JSON-RPC backend
 * - LibreTranslate: self-hosted instance with a remotely fetched catalog
 * - Mock: deterministic in-process provider for tests and dry runs
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::{ConfigError, ProviderError};

pub mod deepl;
pub mod google;
pub mod libretranslate;
pub mod mock;

/// Backend-specific key/value settings from the `provider.args`
/// configuration section
pub type ProviderArgs = HashMap<String, String>;

/// Ids accepted by [`create_provider`]
pub const PROVIDER_IDS: &[&str] = &["google", "deepl", "libretranslate", "mock"];

/// Outcome of a translation request.
///
/// `source_language` reflects what the backend actually translated from,
/// which may differ from the requested source when detection ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// The translated text
    pub text: String,
    /// Language code the backend detected or used as the source
    pub source_language: String,
}

/// Common trait for all translation backends.
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be swapped via configuration without touching
/// call sites. Code case-folding is backend-specific, but each backend is
/// self-consistent: a code accepted by `is_supported_language` is usable
/// in `translate` and `get_language_name`.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate `text` into `to_lang`.
    ///
    /// An empty or `"auto"` `from_lang` asks the backend to detect the
    /// source language; the code it settled on is reported in the result.
    async fn translate(
        &self,
        text: &str,
        to_lang: &str,
        from_lang: &str,
    ) -> Result<TranslationResult, ProviderError>;

    /// Whether `code` is `"auto"` or a concrete code this backend can
    /// translate from/to. Pure predicate, no network.
    fn is_supported_language(&self, code: &str) -> bool;

    /// Human-readable display name for a supported code
    fn get_language_name(&self, code: &str) -> Result<String, ProviderError>;

    /// Full catalog of supported codes mapped to display names
    fn supported_languages(&self) -> &HashMap<String, String>;
}

/// Construct a translation backend by its configuration id.
///
/// This is the registry of compiled-in backends. Backends that fetch their
/// catalog remotely complete that fetch here, so a provider returned from
/// this function is always fully initialized and routable; any failure in
/// that step fails the whole construction.
pub async fn create_provider(
    id: &str,
    args: &ProviderArgs,
) -> Result<Arc<dyn TranslationProvider>, ConfigError> {
    match id {
        "google" => Ok(Arc::new(google::GoogleTranslate::new())),
        "deepl" => Ok(Arc::new(deepl::DeepL::new())),
        "libretranslate" => Ok(Arc::new(libretranslate::LibreTranslate::connect(args).await?)),
        "mock" => Ok(Arc::new(mock::MockProvider::tagged())),
        other => Err(ConfigError::UnknownProvider(other.to_string())),
    }
}
