/*!
 * Tests for the bot orchestrator
 */

use std::collections::HashSet;
use std::sync::Arc;

use lingobot::app_config::{Config, ProviderSettings};
use lingobot::auto_translate::{AutoTranslateConfig, AutoTranslateMap};
use lingobot::bot::{MessageEvent, MessageKind, TranslatorBot, USAGE};
use lingobot::providers::{ProviderArgs, TranslationProvider};
use lingobot::providers::mock::MockProvider;

use crate::common::{init_logging, BOT_USER, ENGLISH_TEXT, RUSSIAN_TEXT, TEST_ROOM, TEST_SENDER};

fn mock_config() -> Config {
    Config {
        provider: ProviderSettings {
            id: "mock".to_string(),
            args: ProviderArgs::new(),
        },
        ..Config::default()
    }
}

fn text_event(body: &str) -> MessageEvent {
    MessageEvent {
        room_id: TEST_ROOM.to_string(),
        sender: TEST_SENDER.to_string(),
        kind: MessageKind::Text,
        body: body.to_string(),
        replied_body: None,
    }
}

/// Bot with one auto-translated room and a caller-supplied provider
fn auto_room_bot(provider: Arc<MockProvider>, main: &str, accepted: &[&str]) -> TranslatorBot {
    let accepted: HashSet<String> = accepted.iter().map(|code| code.to_string()).collect();
    let mut rooms = AutoTranslateMap::new();
    rooms.insert(
        TEST_ROOM.to_string(),
        AutoTranslateConfig::new(main, accepted),
    );
    let provider: Arc<dyn TranslationProvider> = provider;
    TranslatorBot::from_parts(BOT_USER, Some(provider), rooms, true)
}

/// Test the command happy path with an explicit pair
#[tokio::test]
async fn test_handleCommand_withExplicitPairAndText_shouldTranslate() {
    init_logging();
    let bot = TranslatorBot::from_config(BOT_USER, &mock_config()).await;
    assert!(bot.has_provider());

    let event = text_event("!tr en hello");
    let reply = bot.handle_command(&event, "en hello world").await.unwrap();
    assert_eq!(reply.room_id, TEST_ROOM);
    assert_eq!(reply.text, "[en] hello world");
    assert!(reply.as_reply);
}

/// Test that an unknown provider id disables translation without panicking
#[tokio::test]
async fn test_handleCommand_withUnknownProviderId_shouldStayQuiet() {
    init_logging();
    let mut config = mock_config();
    config.provider.id = "babelfish".to_string();

    let bot = TranslatorBot::from_config(BOT_USER, &config).await;
    assert!(!bot.has_provider());

    let event = text_event("!tr en hello");
    assert!(bot.handle_command(&event, "en hello world").await.is_none());
    assert!(bot.handle_message(&text_event(RUSSIAN_TEXT)).await.is_none());
}

/// Test that a later valid reload restores translation
#[tokio::test]
async fn test_reload_withValidConfigAfterFailure_shouldRestoreTranslation() {
    let mut config = mock_config();
    config.provider.id = "babelfish".to_string();
    let bot = TranslatorBot::from_config(BOT_USER, &config).await;
    assert!(!bot.has_provider());

    bot.reload(&mock_config()).await;
    assert!(bot.has_provider());

    let reply = bot
        .handle_command(&text_event("!tr de hi"), "de hi there")
        .await
        .unwrap();
    assert_eq!(reply.text, "[de] hi there");
}

/// Test the usage message when no language pair is recognized
#[tokio::test]
async fn test_handleCommand_withoutLanguagePair_shouldReturnUsage() {
    let bot = TranslatorBot::from_config(BOT_USER, &mock_config()).await;

    let reply = bot
        .handle_command(&text_event("!tr banana"), "banana something")
        .await
        .unwrap();
    assert_eq!(reply.text, USAGE);
}

/// Test the usage message when a pair parses but no text is available
#[tokio::test]
async fn test_handleCommand_withPairButNoText_shouldReturnUsage() {
    let bot = TranslatorBot::from_config(BOT_USER, &mock_config()).await;

    let reply = bot.handle_command(&text_event("!tr de"), "de").await.unwrap();
    assert_eq!(reply.text, USAGE);
}

/// Test that a lone `auto` token is not accepted as a destination
#[tokio::test]
async fn test_handleCommand_withAutoAsDestination_shouldReturnUsage() {
    let bot = TranslatorBot::from_config(BOT_USER, &mock_config()).await;

    let reply = bot
        .handle_command(&text_event("!tr auto"), "auto some text")
        .await
        .unwrap();
    assert_eq!(reply.text, USAGE);
}

/// Test falling back to the quoted message body
#[tokio::test]
async fn test_handleCommand_withReplyFallback_shouldTranslateQuotedMessage() {
    let bot = TranslatorBot::from_config(BOT_USER, &mock_config()).await;

    let mut event = text_event("!tr de");
    event.replied_body = Some("hello from upthread".to_string());
    let reply = bot.handle_command(&event, "de").await.unwrap();
    assert_eq!(reply.text, "[de] hello from upthread");
}

/// Test the passive path emitting an attributed translation
#[tokio::test]
async fn test_handleMessage_withForeignText_shouldEmitAttributedTranslation() {
    init_logging();
    let provider = Arc::new(MockProvider::tagged().with_detected_language("ru"));
    let bot = auto_room_bot(provider.clone(), "en", &["fi"]);

    let reply = bot.handle_message(&text_event(RUSSIAN_TEXT)).await.unwrap();
    assert_eq!(reply.room_id, TEST_ROOM);
    assert!(!reply.as_reply);
    assert_eq!(
        reply.text,
        format!("{} (Russian): [en] {}", TEST_SENDER, RUSSIAN_TEXT)
    );
    assert_eq!(provider.call_count(), 1);
}

/// Test that acceptable messages never reach the provider
#[tokio::test]
async fn test_handleMessage_withAcceptableLanguage_shouldSkipWithoutProviderCall() {
    let provider = Arc::new(MockProvider::tagged());
    let bot = auto_room_bot(provider.clone(), "en", &[]);

    assert!(bot.handle_message(&text_event(ENGLISH_TEXT)).await.is_none());
    assert_eq!(provider.call_count(), 0);
}

/// Test suppression when the provider's detection overrides the local one
#[tokio::test]
async fn test_handleMessage_withProviderReportedAcceptableSource_shouldSuppress() {
    let provider = Arc::new(MockProvider::tagged().with_detected_language("en"));
    let bot = auto_room_bot(provider.clone(), "en", &[]);

    assert!(bot.handle_message(&text_event(RUSSIAN_TEXT)).await.is_none());
    assert_eq!(provider.call_count(), 1);
}

/// Test suppression when the backend returned the input unchanged
#[tokio::test]
async fn test_handleMessage_withIdenticalTranslation_shouldSuppress() {
    let provider = Arc::new(MockProvider::identity().with_detected_language("ru"));
    let bot = auto_room_bot(provider.clone(), "en", &[]);

    assert!(bot.handle_message(&text_event(RUSSIAN_TEXT)).await.is_none());
    assert_eq!(provider.call_count(), 1);
}

/// Test the passive-path filters: notices, own messages, other rooms
#[tokio::test]
async fn test_handleMessage_withFilteredEvents_shouldIgnore() {
    let provider = Arc::new(MockProvider::tagged().with_detected_language("ru"));
    let bot = auto_room_bot(provider.clone(), "en", &[]);

    let mut notice = text_event(RUSSIAN_TEXT);
    notice.kind = MessageKind::Notice;
    assert!(bot.handle_message(&notice).await.is_none());

    let mut own = text_event(RUSSIAN_TEXT);
    own.sender = BOT_USER.to_string();
    assert!(bot.handle_message(&own).await.is_none());

    let mut elsewhere = text_event(RUSSIAN_TEXT);
    elsewhere.room_id = "!other:example.com".to_string();
    assert!(bot.handle_message(&elsewhere).await.is_none());

    assert_eq!(provider.call_count(), 0);
}

/// Test that a provider failure on the passive path stays quiet
#[tokio::test]
async fn test_handleMessage_withFailingProvider_shouldStayQuiet() {
    init_logging();
    let provider = Arc::new(MockProvider::failing());
    let bot = auto_room_bot(provider.clone(), "en", &[]);

    assert!(bot.handle_message(&text_event(RUSSIAN_TEXT)).await.is_none());
    assert_eq!(provider.call_count(), 1);
}
