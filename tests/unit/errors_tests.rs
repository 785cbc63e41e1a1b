/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use xlifflow::errors::{AppError, DocumentError, MergeError, ProviderError, TranslationError, WorkspaceError};

/// Test provider error messages and retry classification
#[test]
fn test_provider_error_withEachVariant_shouldFormatAndClassify() {
    let api = ProviderError::ApiError {
        status_code: 503,
        message: "overloaded".to_string(),
    };
    assert_eq!(api.to_string(), "API responded with error: 503 - overloaded");
    assert!(api.is_retryable());

    let bad_request = ProviderError::ApiError {
        status_code: 400,
        message: "bad".to_string(),
    };
    assert!(!bad_request.is_retryable());

    assert!(ProviderError::RateLimitExceeded("slow down".to_string()).is_retryable());
    assert!(ProviderError::ConnectionError("reset".to_string()).is_retryable());
    assert!(!ProviderError::AuthenticationError("no key".to_string()).is_retryable());
    assert!(!ProviderError::ParseError("eof".to_string()).is_retryable());
}

/// Test the missing-output message lists every batch
#[test]
fn test_merge_error_withMissingOutputs_shouldNameAllBatches() {
    let err = MergeError::MissingOutputs(vec![2, 5, 7]);
    assert_eq!(err.to_string(), "Missing output for batch(es): 2, 5, 7");
}

/// Test count mismatch message
#[test]
fn test_merge_error_withCountMismatch_shouldDescribeBothCounts() {
    let err = MergeError::SegmentCountMismatch {
        batch: 3,
        expected: 50,
        actual: 49,
    };
    assert_eq!(
        err.to_string(),
        "Segment count mismatch in batch 3: batch has 50, output has 49"
    );
}

/// Test conversions into AppError
#[test]
fn test_app_error_fromDomainErrors_shouldWrapWithPrefix() {
    let app: AppError = DocumentError::DuplicateSegmentId("u1".to_string()).into();
    assert_eq!(app.to_string(), "Document error: Duplicate segment id: u1");

    let app: AppError = WorkspaceError::ProjectNotFound("p".to_string()).into();
    assert!(matches!(app, AppError::Workspace(_)));

    let app: AppError = TranslationError::EmptyResponse(4).into();
    assert_eq!(app.to_string(), "Translation error: Empty response for batch 4");

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(app.to_string(), "Unknown error: boom");
}

/// Test errors survive a trip through anyhow and can be downcast
#[test]
fn test_merge_error_throughAnyhow_shouldDowncast() {
    let err: anyhow::Error = MergeError::SourceChanged(PathBuf::from("source/a.xlf")).into();
    assert!(matches!(
        err.downcast_ref::<MergeError>(),
        Some(MergeError::SourceChanged(_))
    ));
}

/// Test merge errors for outputs that do not fit the current split
#[test]
fn test_merge_error_forForeignOutputs_shouldNameSegments() {
    let err = MergeError::SourceMismatch {
        batch: 1,
        id: "2".to_string(),
    };
    assert!(err.to_string().contains("batch 1"));
    assert!(err.to_string().contains("segment 2"));

    let err = MergeError::UnplacedTranslations(vec!["f1:3".to_string(), "9".to_string()]);
    assert!(err.to_string().ends_with("f1:3, 9"));
}
