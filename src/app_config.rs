use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::auto_translate::{AutoTranslateConfig, AutoTranslateMap};
use crate::errors::ConfigError;
use crate::providers::ProviderArgs;

/// Application configuration module
/// This module handles the bot configuration including loading from a
/// JSON file and building the room policy map.
/// Root configuration for the bot
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Active translation backend
    pub provider: ProviderSettings,

    /// Per-room auto-translation entries
    #[serde(default)]
    pub auto_translate: Vec<AutoTranslateEntry>,

    /// Whether command responses thread as replies
    #[serde(default = "default_true")]
    pub response_reply: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Backend selection and backend-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
    /// Backend selector, resolved against the provider registry
    pub id: String,

    /// Backend-specific key/value settings
    #[serde(default)]
    pub args: ProviderArgs,
}

/// One room's auto-translation settings as written in the config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AutoTranslateEntry {
    /// Room identifier
    pub room_id: String,

    /// Language every message should end up in
    #[serde(default = "default_main_language")]
    pub main_language: String,

    /// Languages tolerated as-is besides the main one
    #[serde(default)]
    pub accepted_languages: Vec<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_main_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Build the room policy map from the auto-translate entries.
    ///
    /// The map is rebuilt wholesale on every reload; later entries for the
    /// same room win.
    pub fn load_auto_translate(&self) -> AutoTranslateMap {
        self.auto_translate
            .iter()
            .map(|entry| {
                (
                    entry.room_id.clone(),
                    AutoTranslateConfig::new(
                        entry.main_language.clone(),
                        entry.accepted_languages.iter().cloned().collect(),
                    ),
                )
            })
            .collect()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderSettings {
                id: "google".to_string(),
                args: ProviderArgs::new(),
            },
            auto_translate: Vec::new(),
            response_reply: true,
            log_level: LogLevel::default(),
        }
    }
}
