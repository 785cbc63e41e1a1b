/*!
 * Tests for provider implementations
 */

use xlifflow::batching::BatchFile;
use xlifflow::document::Segment;
use xlifflow::errors::TranslationError;
use xlifflow::glossary::Glossary;
use xlifflow::providers::mock::MockProvider;
use xlifflow::providers::{CompletionRequest, Provider};
use xlifflow::translation::response::map_translations;
use xlifflow::translation::TranslationService;
use xlifflow::Config;

fn batch(segments: Vec<Segment>) -> BatchFile {
    BatchFile {
        batch_number: 1,
        total_batches: 1,
        segment_count: segments.len(),
        segments,
    }
}

/// Test the mock provider through the trait object
#[tokio::test]
async fn test_mock_provider_asTraitObject_shouldCompleteRequests() {
    let provider: Box<dyn Provider> = Box::new(MockProvider::working());
    assert_eq!(provider.name(), "mock");
    assert!(provider.test_connection().await.is_ok());

    let response = provider
        .complete(CompletionRequest {
            system: "system".to_string(),
            prompt: "[ID: 10]\nPress the button".to_string(),
            temperature: 0.3,
            max_tokens: 100,
        })
        .await
        .unwrap();

    let mapped = map_translations(&[Segment::new("10", "Press the button")], &response.text);
    assert_eq!(mapped.items[0].target, "[translated] Press the button");
}

/// Test the service sends only relevant glossary terms
#[tokio::test]
async fn test_translation_service_withGlossary_shouldSendRelevantTermsOnly() {
    let mock = MockProvider::working();
    let service = TranslationService::new(Box::new(mock.clone()), &Config::default());

    let mut glossary = Glossary::new();
    glossary.insert("coke oven", "焦炉");
    glossary.insert("turbine", "汽轮机");

    let output = service
        .translate_batch(&batch(vec![Segment::new("1", "Close the coke oven door")]), &glossary)
        .await
        .unwrap();
    assert_eq!(output.translations.len(), 1);

    let prompt = &mock.requests()[0].prompt;
    assert!(prompt.contains("coke oven -> 焦炉"));
    assert!(!prompt.contains("汽轮机"));
}

/// Test a provider failure surfaces as a translation error
#[tokio::test]
async fn test_translation_service_withFailingProvider_shouldReturnProviderError() {
    let service = TranslationService::new(Box::new(MockProvider::failing()), &Config::default());
    let err = service
        .translate_batch(&batch(vec![Segment::new("1", "x")]), &Glossary::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Provider(_)));
}

/// Test partial answers leave the missing segments empty
#[tokio::test]
async fn test_translation_service_withPartialAnswer_shouldLeaveMissingTargetsEmpty() {
    fn drop_second(source: &str) -> String {
        if source == "two" {
            String::new()
        } else {
            source.to_uppercase()
        }
    }

    let provider = MockProvider::working().with_custom_translation(drop_second);
    let service = TranslationService::new(Box::new(provider), &Config::default());
    let output = service
        .translate_batch(
            &batch(vec![Segment::new("a", "one"), Segment::new("b", "two"), Segment::new("c", "three")]),
            &Glossary::new(),
        )
        .await
        .unwrap();

    let targets: Vec<&str> = output.translations.iter().map(|t| t.target.as_str()).collect();
    assert_eq!(targets, vec!["ONE", "", "THREE"]);
}
