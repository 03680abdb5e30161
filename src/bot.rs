use log::{debug, error, warn};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::app_config::Config;
use crate::auto_translate::{self, AutoTranslateMap, PolicyDecision};
use crate::command_parser::parse_language_pair;
use crate::language_utils::{self, AUTO_LANGUAGE};
use crate::providers::{create_provider, TranslationProvider};

/// Bot orchestrator.
///
/// Owns the active provider and the room policy map as one immutable
/// snapshot and drives the two entry points: the translate command and
/// the passive per-message auto-translation. The chat protocol itself is
/// someone else's problem; events come in as plain structs and replies go
/// out the same way.
/// Usage string for the translate command
pub const USAGE: &str = "Usage: !translate [from] <to> [text or reply to message]";

/// Kind of an inbound room message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Regular text message
    Text,
    /// Notice, typically sent by other bots
    Notice,
}

/// Inbound chat event, decoupled from any concrete chat protocol
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Room the message arrived in
    pub room_id: String,
    /// Sender identity
    pub sender: String,
    /// Message kind
    pub kind: MessageKind,
    /// Message body
    pub body: String,
    /// Body of the message this one replies to, when the chat client
    /// resolved the quoted event
    pub replied_body: Option<String>,
}

/// Outbound message produced by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Room to send to
    pub room_id: String,
    /// Message text
    pub text: String,
    /// Whether to thread as a reply to the triggering event
    pub as_reply: bool,
}

/// Immutable view of the bot's provider and policies.
///
/// Replaced wholesale on reload; in-flight handlers finish against the
/// snapshot they captured at dispatch time.
struct Snapshot {
    provider: Option<Arc<dyn TranslationProvider>>,
    auto_translate: AutoTranslateMap,
    response_reply: bool,
}

/// The bot core: command handling, passive auto-translation, reload
pub struct TranslatorBot {
    /// The bot's own sender identity, filtered out of passive handling
    user_id: String,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl TranslatorBot {
    /// Build a bot from configuration.
    ///
    /// Provider construction failure is not fatal: the bot starts with no
    /// active provider and translation features are disabled until a
    /// successful [`TranslatorBot::reload`].
    pub async fn from_config(user_id: impl Into<String>, config: &Config) -> Self {
        let bot = Self {
            user_id: user_id.into(),
            snapshot: RwLock::new(Arc::new(Snapshot {
                provider: None,
                auto_translate: AutoTranslateMap::new(),
                response_reply: true,
            })),
        };
        bot.reload(config).await;
        bot
    }

    /// Assemble a bot from already-built parts, for embedders that
    /// construct their own provider
    pub fn from_parts(
        user_id: impl Into<String>,
        provider: Option<Arc<dyn TranslationProvider>>,
        auto_translate: AutoTranslateMap,
        response_reply: bool,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            snapshot: RwLock::new(Arc::new(Snapshot {
                provider,
                auto_translate,
                response_reply,
            })),
        }
    }

    /// Rebuild the provider and room policies from `config` and swap them
    /// in atomically.
    ///
    /// A provider that fails to construct is logged and leaves translation
    /// disabled; the rest of the snapshot still takes effect.
    pub async fn reload(&self, config: &Config) {
        let provider = match create_provider(&config.provider.id, &config.provider.args).await {
            Ok(provider) => Some(provider),
            Err(e) => {
                error!("Failed to load translation provider: {}", e);
                None
            }
        };
        let snapshot = Arc::new(Snapshot {
            provider,
            auto_translate: config.load_auto_translate(),
            response_reply: config.response_reply,
        });
        *self.snapshot.write() = snapshot;
    }

    /// Whether a provider is currently loaded and routable
    pub fn has_provider(&self) -> bool {
        self.snapshot.read().provider.is_some()
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    /// Handle the `translate`/`tr` command.
    ///
    /// `raw_args` is everything after the command name. Returns the reply
    /// to send, or `None` when there is nothing to say (no provider
    /// loaded, or the translation itself failed and was logged).
    pub async fn handle_command(&self, event: &MessageEvent, raw_args: &str) -> Option<Reply> {
        let snapshot = self.snapshot();

        // With no provider loaded the parse is permissive; it never
        // reaches dispatch because of the provider check below.
        let (text, pair) = match &snapshot.provider {
            Some(provider) => {
                parse_language_pair(raw_args, |code| provider.is_supported_language(code))
            }
            None => parse_language_pair(raw_args, |_| true),
        };

        let Some(provider) = &snapshot.provider else {
            warn!("Translate command used, but translator not loaded");
            return None;
        };
        let Some(pair) = pair else {
            return Some(self.usage_reply(event, &snapshot));
        };
        // "auto" is only ever a source; a lone "auto" token parses as a
        // destination and has to be rejected here
        if language_utils::is_auto(&pair.to) {
            return Some(self.usage_reply(event, &snapshot));
        }

        let text = if text.is_empty() {
            event.replied_body.clone().unwrap_or_default()
        } else {
            text
        };
        if text.is_empty() {
            return Some(self.usage_reply(event, &snapshot));
        }

        match provider.translate(&text, &pair.to, &pair.from).await {
            Ok(result) => Some(Reply {
                room_id: event.room_id.clone(),
                text: result.text,
                as_reply: snapshot.response_reply,
            }),
            Err(e) => {
                error!("Translation to {} failed: {}", pair.to, e);
                None
            }
        }
    }

    /// Evaluate a passive room message against the auto-translate policy.
    ///
    /// Returns the attributed translation to post, or `None` when the
    /// message needs no action. Notices and the bot's own messages are
    /// never evaluated.
    pub async fn handle_message(&self, event: &MessageEvent) -> Option<Reply> {
        if event.kind == MessageKind::Notice || event.sender == self.user_id {
            return None;
        }

        let snapshot = self.snapshot();
        let config = snapshot.auto_translate.get(&event.room_id)?;
        let provider = snapshot.provider.as_ref()?;

        let to = match auto_translate::evaluate(config, &event.body) {
            PolicyDecision::Skip(reason) => {
                debug!("Leaving message in {} alone: {:?}", event.room_id, reason);
                return None;
            }
            PolicyDecision::Translate { to } => to,
        };

        let result = match provider.translate(&event.body, &to, AUTO_LANGUAGE).await {
            Ok(result) => result,
            Err(e) => {
                error!("Auto-translation in {} failed: {}", event.room_id, e);
                return None;
            }
        };

        if auto_translate::should_suppress(config, &event.body, &result) {
            debug!(
                "Suppressing redundant translation from {} in {}",
                result.source_language, event.room_id
            );
            return None;
        }

        let language_name = provider
            .get_language_name(&result.source_language)
            .ok()
            .or_else(|| language_utils::language_name(&result.source_language))
            .unwrap_or_else(|| result.source_language.clone());

        Some(Reply {
            room_id: event.room_id.clone(),
            text: format!("{} ({}): {}", event.sender, language_name, result.text),
            as_reply: false,
        })
    }

    fn usage_reply(&self, event: &MessageEvent, snapshot: &Snapshot) -> Reply {
        Reply {
            room_id: event.room_id.clone(),
            text: USAGE.to_string(),
            as_reply: snapshot.response_reply,
        }
    }
}
