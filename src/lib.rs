/*!
 * # lingobot
 *
 * A Rust library implementing the core of a chat-room translation bot.
 *
 * ## Features
 *
 * - Translate messages on request via a `translate` / `tr` command
 * - Per-room auto-translation of messages not in an accepted language
 * - Pluggable translation backends behind one trait:
 *   - Google (free web-translate endpoint)
 *   - DeepL (sentence-splitting JSON-RPC endpoint)
 *   - LibreTranslate (self-hosted instance)
 * - Local language identification for the auto-translate policy
 * - Atomic configuration reload with wholesale provider/policy swap
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `command_parser`: Language-pair extraction from raw command text
 * - `auto_translate`: Per-room translation policy and suppression rules
 * - `bot`: Orchestrator tying parser, policy and provider together
 * - `language_utils`: `auto` sentinel, local detection, display names
 * - `providers`: Client implementations for translation backends:
 *   - `providers::google`: Google web-translate client
 *   - `providers::deepl`: DeepL JSON-RPC client
 *   - `providers::libretranslate`: LibreTranslate instance client
 *   - `providers::mock`: Deterministic provider for tests
 * - `errors`: Custom error types for the bot
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod auto_translate;
pub mod bot;
pub mod command_parser;
pub mod errors;
pub mod language_utils;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use auto_translate::{AutoTranslateConfig, PolicyDecision};
pub use bot::{MessageEvent, MessageKind, Reply, TranslatorBot};
pub use command_parser::{parse_language_pair, LanguagePair};
pub use errors::{BotError, ConfigError, DetectionError, ProviderError};
pub use providers::{create_provider, TranslationProvider, TranslationResult};
