/*!
 * Tests for direct translation of a project's batches
 */

use anyhow::Result;
use xlifflow::batching::{batch_file_name, BatchFile, OutputFile};
use xlifflow::file_utils::FileManager;
use xlifflow::providers::mock::MockProvider;

use crate::common;

/// Test translating every pending batch and merging the result
#[tokio::test]
async fn test_translate_withWorkingProvider_shouldWriteOutputsAndMerge() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::create_test_controller(temp_dir.path())?;
    let project = controller.new_project("p")?;
    let source = common::create_test_xliff(temp_dir.path(), "doc.xlf", 120)?;
    controller.split("p", &source)?;

    let mock = MockProvider::working();
    let summary = controller
        .translate_with_provider("p", None, Box::new(mock.clone()))
        .await?;

    assert!(summary.is_success());
    assert_eq!(summary.translated, vec![1, 2, 3]);
    assert_eq!(summary.untranslated_segments, 0);
    assert_eq!(mock.request_count(), 3);

    let output: OutputFile = FileManager::read_json(project.output_dir().join(batch_file_name(3)))?;
    assert_eq!(output.batch_number, 3);
    assert_eq!(output.translations.len(), 20);
    assert_eq!(output.translations[0].id, "u101");
    assert_eq!(output.translations[0].target, "[translated] Segment & text 101");

    let report = controller.merge("p")?;
    assert_eq!(report.merged, 120);
    Ok(())
}

/// Test only batches without output are translated by default
#[tokio::test]
async fn test_translate_withExistingOutput_shouldSkipCompletedBatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::create_test_controller(temp_dir.path())?;
    let project = controller.new_project("p")?;
    let source = common::create_test_xliff(temp_dir.path(), "doc.xlf", 120)?;
    controller.split("p", &source)?;

    let batch: BatchFile = FileManager::read_json(project.batches_dir().join(batch_file_name(2)))?;
    FileManager::write_json(
        project.output_dir().join(batch_file_name(2)),
        &common::translate_batch_file(&batch, |s| format!("human {}", s)),
    )?;

    let summary = controller
        .translate_with_provider("p", None, Box::new(MockProvider::working()))
        .await?;
    assert_eq!(summary.translated, vec![1, 3]);

    let kept: OutputFile = FileManager::read_json(project.output_dir().join(batch_file_name(2)))?;
    assert!(kept.translations[0].target.starts_with("human "));

    // An explicit selection translates again
    let summary = controller
        .translate_with_provider("p", Some(&[2][..]), Box::new(MockProvider::working()))
        .await?;
    assert_eq!(summary.translated, vec![2]);
    let replaced: OutputFile = FileManager::read_json(project.output_dir().join(batch_file_name(2)))?;
    assert!(replaced.translations[0].target.starts_with("[translated] "));
    Ok(())
}

/// Test a failing batch is reported and the run continues
#[tokio::test]
async fn test_translate_withIntermittentProvider_shouldReportFailedBatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::create_test_controller(temp_dir.path())?;
    let project = controller.new_project("p")?;
    let source = common::create_test_xliff(temp_dir.path(), "doc.xlf", 120)?;
    controller.split("p", &source)?;

    let summary = controller
        .translate_with_provider("p", None, Box::new(MockProvider::intermittent(2)))
        .await?;

    assert!(!summary.is_success());
    assert_eq!(summary.translated, vec![1, 3]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, 2);
    assert!(!FileManager::file_exists(project.output_dir().join(batch_file_name(2))));

    assert!(controller.merge("p").is_err());
    Ok(())
}

/// Test selecting an unknown batch number
#[tokio::test]
async fn test_translate_withUnknownBatch_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::create_test_controller(temp_dir.path())?;
    controller.new_project("p")?;
    let source = common::create_test_xliff(temp_dir.path(), "doc.xlf", 3)?;
    controller.split("p", &source)?;

    let result = controller
        .translate_with_provider("p", Some(&[4][..]), Box::new(MockProvider::working()))
        .await;
    assert!(result.is_err());
    Ok(())
}

/// Test an unreachable provider stops the run before any batch is sent
#[test]
fn test_translate_withUnreachableProvider_shouldFailBeforeTranslating() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::create_test_controller(temp_dir.path())?;
    controller.new_project("p")?;
    let source = common::create_test_xliff(temp_dir.path(), "doc.xlf", 60)?;
    controller.split("p", &source)?;

    let mock = MockProvider::failing();
    let result = tokio_test::block_on(async {
        controller
            .translate_with_provider("p", None, Box::new(mock.clone()))
            .await
    });

    let err = result.unwrap_err();
    assert!(err.to_string().contains("not reachable"));
    assert_eq!(mock.request_count(), 0);
    assert_eq!(controller.status("p")?.pending, vec![1, 2]);
    Ok(())
}
