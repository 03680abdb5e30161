/*!
 * Tests for error types and conversions
 */

use lingobot::errors::{BotError, ConfigError, DetectionError, ProviderError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 403,
        message: "Request forbidden".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("403"));
    assert!(display.contains("Request forbidden"));
}

#[test]
fn test_providerError_unsupportedLanguage_shouldDisplayCode() {
    let error = ProviderError::UnsupportedLanguage("xx".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Unsupported language code"));
    assert!(display.contains("xx"));
}

#[test]
fn test_configError_unknownProvider_shouldDisplayId() {
    let error = ConfigError::UnknownProvider("babelfish".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Unknown translation provider"));
    assert!(display.contains("babelfish"));
}

#[test]
fn test_configError_missingArgument_shouldDisplayName() {
    let error = ConfigError::MissingArgument("url");
    let display = format!("{}", error);
    assert!(display.contains("Missing required provider argument"));
    assert!(display.contains("url"));
}

#[test]
fn test_detectionError_variants_shouldDisplayCorrectly() {
    assert!(format!("{}", DetectionError::TooShort).contains("too short"));
    assert!(format!("{}", DetectionError::Unrecognized).contains("could not be identified"));
}

#[test]
fn test_botError_fromProviderError_shouldWrapCorrectly() {
    let error: BotError = ProviderError::RequestFailed("Test error".to_string()).into();
    let display = format!("{}", error);
    assert!(display.contains("Provider error"));
    assert!(display.contains("Test error"));
}

#[test]
fn test_botError_fromConfigError_shouldWrapCorrectly() {
    let error: BotError = ConfigError::UnknownProvider("nope".to_string()).into();
    let display = format!("{}", error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("nope"));
}

#[test]
fn test_botError_fromAnyhow_shouldBecomeUnknown() {
    let error: BotError = anyhow::anyhow!("something else").into();
    let display = format!("{}", error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("something else"));
}
