use isolang::Language;
use log::debug;
use whatlang::Lang;

use crate::errors::DetectionError;

/// Language utilities for the bot core.
///
/// This module holds the `auto` detection sentinel, local (non-network)
/// language identification built on whatlang, and ISO 639 display-name
/// lookups via isolang.
/// Sentinel language code meaning "detect the source language".
///
/// Valid as the source side of a language pair, never as the destination.
pub const AUTO_LANGUAGE: &str = "auto";

/// Shortest text whatlang gets a usable signal from
const MIN_DETECTABLE_LEN: usize = 3;

/// Whether a code (possibly empty) asks the backend to detect the source
pub fn is_auto(code: &str) -> bool {
    code.is_empty() || code.eq_ignore_ascii_case(AUTO_LANGUAGE)
}

/// Identify the language of a text locally, without any network call.
///
/// Returns the ISO 639-1 code of the detected language. Short or ambiguous
/// text fails with a `DetectionError`; auto-translate callers treat that as
/// "no action".
pub fn detect_language(text: &str) -> Result<String, DetectionError> {
    let trimmed = text.trim();
    if trimmed.len() < MIN_DETECTABLE_LEN {
        return Err(DetectionError::TooShort);
    }

    let info = whatlang::detect(trimmed).ok_or(DetectionError::Unrecognized)?;
    if !info.is_reliable() {
        debug!(
            "Discarding low-confidence detection {} ({:.2})",
            info.lang().code(),
            info.confidence()
        );
        return Err(DetectionError::Unrecognized);
    }

    iso639_1(info.lang()).ok_or(DetectionError::Unrecognized)
}

/// Map a whatlang language to its ISO 639-1 code
fn iso639_1(lang: Lang) -> Option<String> {
    // whatlang reports individual ISO 639-3 codes; a few of them belong to
    // macrolanguages and only the macrolanguage has a two-letter code
    let part1 = match lang.code() {
        "cmn" => "zh",
        "arb" => "ar",
        "pes" => "fa",
        code => Language::from_639_3(code)?.to_639_1()?,
    };
    Some(part1.to_string())
}

/// English display name for an ISO 639-1 or 639-3 code, if the code is
/// known at all. Used as a fallback when the active provider's catalog
/// does not list the detected language.
pub fn language_name(code: &str) -> Option<String> {
    let normalized = code.trim().to_lowercase();
    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };
    language.map(|lang| lang.to_name().to_string())
}
