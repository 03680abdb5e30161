/*!
 * Error types for the lingobot crate.
 *
 * This module contains custom error types for different parts of the bot,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while loading configuration or constructing
/// the active translation provider.
///
/// A `ConfigError` is never fatal to the bot: the failed reload leaves no
/// active provider and translation features become no-ops until the next
/// successful reload.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured provider id does not match any compiled-in backend
    #[error("Unknown translation provider: {0}")]
    UnknownProvider(String),

    /// A provider argument required by the selected backend is missing
    #[error("Missing required provider argument: {0}")]
    MissingArgument(&'static str),

    /// A provider argument was present but unusable
    #[error("Invalid provider argument: {0}")]
    InvalidArgument(String),

    /// Backend construction or its post-construction step failed
    #[error("Provider initialization failed: {0}")]
    InitFailed(String),

    /// Error reading the configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing the configuration file
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur when talking to a translation backend.
///
/// Provider errors are terminal for the single request that raised them;
/// nothing is retried automatically.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// A language code outside the backend's catalog
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(error.to_string())
    }
}

/// Errors from local, non-network language identification.
///
/// Auto-translate treats any detection failure as "no action"; this type
/// only surfaces on diagnostic paths.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DetectionError {
    /// Text too short to carry a usable signal
    #[error("Text too short for reliable language detection")]
    TooShort,

    /// The detector produced nothing, or nothing with enough confidence
    #[error("Language could not be identified")]
    Unrecognized,
}

/// Main error type wrapping everything a bot operation can fail with
#[derive(Error, Debug)]
pub enum BotError {
    /// Error from configuration handling or provider construction
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a translation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from local language identification
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
