/*!
 * Tests for the provider implementations
 */

use lingobot::errors::{ConfigError, ProviderError};
use lingobot::providers::deepl::DeepL;
use lingobot::providers::google::GoogleTranslate;
use lingobot::providers::mock::MockProvider;
use lingobot::providers::{create_provider, ProviderArgs, TranslationProvider};

/// Test the catalog contract: every listed code is supported and has a name
#[test]
fn test_catalogContract_withAllListedCodes_shouldSupportAndName() {
    let providers: Vec<Box<dyn TranslationProvider>> = vec![
        Box::new(GoogleTranslate::new()),
        Box::new(DeepL::new()),
        Box::new(MockProvider::tagged()),
    ];

    for provider in providers {
        for code in provider.supported_languages().keys() {
            assert!(
                provider.is_supported_language(code),
                "{:?} does not support its own catalog code {}",
                provider,
                code
            );
            assert!(
                provider.get_language_name(code).is_ok(),
                "{:?} has no name for its own catalog code {}",
                provider,
                code
            );
        }
        assert!(provider.is_supported_language("auto"));
    }
}

/// Test the Google catalog, matched exactly as listed
#[test]
fn test_googleProvider_withCatalogLookups_shouldMatchExactCase() {
    let provider = GoogleTranslate::new();

    assert!(provider.is_supported_language("en"));
    assert!(provider.is_supported_language("zh-CN"));
    assert!(!provider.is_supported_language("EN"));
    assert!(!provider.is_supported_language("xx"));

    assert_eq!(provider.get_language_name("fr").unwrap(), "French");
    assert!(matches!(
        provider.get_language_name("xx"),
        Err(ProviderError::UnsupportedLanguage(_))
    ));
}

/// Test the DeepL catalog, folded to uppercase
#[test]
fn test_deeplProvider_withCatalogLookups_shouldFoldToUppercase() {
    let provider = DeepL::new();

    assert!(provider.is_supported_language("de"));
    assert!(provider.is_supported_language("DE"));
    assert!(provider.is_supported_language("auto"));
    assert!(!provider.is_supported_language("fi"));

    assert_eq!(provider.get_language_name("de").unwrap(), "German");
    assert_eq!(provider.get_language_name("DE").unwrap(), "German");
    assert!(matches!(
        provider.get_language_name("fi"),
        Err(ProviderError::UnsupportedLanguage(_))
    ));
}

/// Test the mock provider's tagged translation shape
#[tokio::test]
async fn test_mockProvider_withTaggedBehavior_shouldReportCallShape() {
    let provider = MockProvider::tagged();

    let result = provider.translate("hello world", "de", "auto").await.unwrap();
    assert_eq!(result.text, "[de] hello world");
    assert_eq!(result.source_language, "xx");
    assert_eq!(provider.call_count(), 1);

    let result = provider.translate("hello world", "de", "en").await.unwrap();
    assert_eq!(result.source_language, "en");
    assert_eq!(provider.call_count(), 2);
}

/// Test the mock provider's identity and failure behaviors
#[tokio::test]
async fn test_mockProvider_withIdentityAndFailingBehaviors_shouldEchoOrError() {
    let identity = MockProvider::identity().with_detected_language("fi");
    let result = identity.translate("sama teksti", "en", "auto").await.unwrap();
    assert_eq!(result.text, "sama teksti");
    assert_eq!(result.source_language, "fi");

    let failing = MockProvider::failing();
    assert!(matches!(
        failing.translate("hello", "en", "auto").await,
        Err(ProviderError::RequestFailed(_))
    ));
}

/// Test that a there-and-back translation only honors the call contract;
/// text equality is explicitly not guaranteed, translation is lossy
#[tokio::test]
async fn test_mockProvider_withRoundTrip_shouldOnlyGuaranteeShapes() {
    let provider = MockProvider::tagged();

    let forward = provider.translate("hello", "de", "en").await.unwrap();
    let back = provider
        .translate(&forward.text, "en", "de")
        .await
        .unwrap();

    assert!(!back.text.is_empty());
    assert!(!back.source_language.is_empty());
    assert_ne!(back.text, "hello");
}

/// Test registry resolution of known and unknown provider ids
#[tokio::test]
async fn test_createProvider_withRegistryIds_shouldResolveOrFail() {
    let args = ProviderArgs::new();

    assert!(create_provider("mock", &args).await.is_ok());
    assert!(create_provider("google", &args).await.is_ok());
    assert!(create_provider("deepl", &args).await.is_ok());

    match create_provider("babelfish", &args).await {
        Err(ConfigError::UnknownProvider(id)) => assert_eq!(id, "babelfish"),
        other => panic!("expected UnknownProvider, got {:?}", other.map(|_| ())),
    }
}

/// Test that libretranslate refuses to construct without an instance url
#[tokio::test]
async fn test_createProvider_withLibretranslateMissingUrl_shouldFail() {
    let args = ProviderArgs::new();

    assert!(matches!(
        create_provider("libretranslate", &args).await,
        Err(ConfigError::MissingArgument("url"))
    ));
}

/// Test a live Google translation
#[tokio::test]
#[ignore]
async fn test_googleProvider_withLiveEndpoint_shouldTranslate() {
    let provider = GoogleTranslate::new();

    let result = provider.translate("Hallo Welt", "en", "auto").await.unwrap();
    assert!(!result.text.is_empty());
    assert_eq!(result.source_language, "de");
}

/// Test a live LibreTranslate instance given via LIBRETRANSLATE_URL
#[tokio::test]
#[ignore]
async fn test_libretranslateProvider_withLiveInstance_shouldLoadCatalog() {
    let url = std::env::var("LIBRETRANSLATE_URL").unwrap_or_default();
    if url.is_empty() {
        return;
    }

    let mut args = ProviderArgs::new();
    args.insert("url".to_string(), url);
    let provider = create_provider("libretranslate", &args).await.unwrap();
    assert!(provider.is_supported_language("auto"));
    assert!(provider.is_supported_language("en"));
}
