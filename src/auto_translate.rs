use std::collections::{HashMap, HashSet};

use crate::language_utils;
use crate::providers::TranslationResult;

/// Per-room auto-translation policy.
///
/// Rooms with a config get every inbound text message checked: messages
/// not already in an accepted language are translated into the room's
/// main language, with two suppression rules to keep the room quiet when
/// no real translation happened.
/// Room policies keyed by room id. Rooms absent from the map are never
/// auto-translated.
pub type AutoTranslateMap = HashMap<String, AutoTranslateConfig>;

/// Auto-translation settings for a single room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoTranslateConfig {
    /// Language every message should end up in
    pub main_language: String,
    /// Languages tolerated as-is besides the main one
    pub accepted_languages: HashSet<String>,
}

impl AutoTranslateConfig {
    pub fn new(main_language: impl Into<String>, accepted_languages: HashSet<String>) -> Self {
        Self {
            main_language: main_language.into(),
            accepted_languages,
        }
    }

    /// Whether a message in `code` can stay untranslated
    pub fn is_acceptable(&self, code: &str) -> bool {
        code == self.main_language || self.accepted_languages.contains(code)
    }
}

/// Why a message was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Local detection failed (short or ambiguous text); fail open
    DetectionFailed,
    /// The detected language is acceptable in this room
    Acceptable,
}

/// Decision for an inbound room message, made before any network call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Leave the message alone
    Skip(SkipReason),
    /// Translate into the room's main language, detecting the source
    Translate {
        /// Destination language code
        to: String,
    },
}

/// Evaluate a message against a room's config using local detection only.
///
/// The local detector is the first of two acceptance checks; the second
/// one runs in [`should_suppress`] against the language the provider
/// itself reports.
pub fn evaluate(config: &AutoTranslateConfig, text: &str) -> PolicyDecision {
    match language_utils::detect_language(text) {
        Err(_) => PolicyDecision::Skip(SkipReason::DetectionFailed),
        Ok(lang) if config.is_acceptable(&lang) => PolicyDecision::Skip(SkipReason::Acceptable),
        Ok(_) => PolicyDecision::Translate {
            to: config.main_language.clone(),
        },
    }
}

/// Whether a completed translation should not be posted.
///
/// Suppresses when the provider-reported source language turns out to be
/// acceptable (the local detector mis-fired), or when the translated text
/// is byte-identical to the original (the backend silently no-op'd).
pub fn should_suppress(
    config: &AutoTranslateConfig,
    original: &str,
    result: &TranslationResult,
) -> bool {
    config.is_acceptable(&result.source_language) || result.text == original
}
