/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use xlifflow::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use xlifflow::batching::SplitStrategy;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "zh-CN");
    assert_eq!(config.split.batch_size, 50);
    assert_eq!(config.split.strategy, SplitStrategy::Fixed);
    assert!(!config.split.extract_all);
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.log_level, LogLevel::Info);

    let openai = config
        .translation
        .get_provider_config(&TranslationProvider::OpenAI)
        .expect("OpenAI provider config should exist");
    assert_eq!(openai.endpoint, "https://api.openai.com/v1");
    assert_eq!(openai.timeout_secs, 120);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "zz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    config.target_language = "".to_string();
    assert!(config.validate().is_err());
    config.target_language = "de-AT".to_string();
    assert!(config.validate().is_ok());

    config.split.batch_size = 0;
    assert!(config.validate().is_err());
    config.split.batch_size = 10;

    config.translation.active_provider_config_mut().endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

/// Remote providers need a key, local OpenAI-compatible servers do not
#[test]
fn test_validate_for_translation_withLocalEndpoint_shouldNotRequireKey() {
    let mut config = Config::default();
    config.translation.available_providers = vec![ProviderConfig::new(TranslationProvider::Anthropic)];
    config.translation.provider = TranslationProvider::Anthropic;
    if std::env::var("XLIFFLOW_API_KEY").is_err() {
        assert!(config.validate_for_translation().is_err());
    }

    config.translation.provider = TranslationProvider::OpenAI;
    config.translation.active_provider_config_mut().endpoint = "http://localhost:1234/v1".to_string();
    assert!(config.validate_for_translation().is_ok());
}

/// Test provider accessors fall back to defaults
#[test]
fn test_provider_accessors_withMissingEntry_shouldUseDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();

    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.translation.get_endpoint(), "https://api.openai.com/v1");
    assert_eq!(config.translation.get_max_tokens(), 8192);

    config.translation.active_provider_config_mut().model = "deepseek-chat".to_string();
    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_model(), "deepseek-chat");
}

/// Test provider names parse case-insensitively
#[test]
fn test_translation_provider_fromStr_shouldParseKnownNames() {
    assert_eq!("OpenAI".parse::<TranslationProvider>().unwrap(), TranslationProvider::OpenAI);
    assert_eq!("anthropic".parse::<TranslationProvider>().unwrap(), TranslationProvider::Anthropic);
    assert!("ollama".parse::<TranslationProvider>().is_err());
}

/// Test load_or_create writes defaults and reads them back
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let mut edited = created.clone();
    edited.split.batch_size = 40;
    edited.split.strategy = SplitStrategy::Balanced;
    edited.save(&path)?;

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.split.batch_size, 40);
    assert_eq!(loaded.split.strategy, SplitStrategy::Balanced);
    Ok(())
}

/// Test partial config files are completed with defaults
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"source_language":"en","target_language":"ja"}"#)?;
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.split.batch_size, 50);
    assert_eq!(config.translation.common.retry_count, 3);
    Ok(())
}

/// Test the default system prompt is the document translator template
#[test]
fn test_default_system_prompt_shouldUseDocumentTranslatorTemplate() {
    let config = Config::default();
    assert_eq!(
        config.translation.common.system_prompt,
        xlifflow::translation::PromptTemplate::DOCUMENT_TRANSLATOR
    );
}
