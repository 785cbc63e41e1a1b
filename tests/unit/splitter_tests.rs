/*!
 * Tests for batch splitting
 */

use anyhow::Result;
use xlifflow::batching::{batch_file_name, plan_batch_sizes, BatchFile, SplitStrategy, Splitter};
use xlifflow::document::Segment;
use xlifflow::file_utils::FileManager;

use crate::common;

fn segments(count: usize) -> Vec<Segment> {
    (1..=count)
        .map(|i| Segment::new(format!("u{}", i), format!("text {}", i)))
        .collect()
}

/// Test the reference example of 120 segments in batches of 50
#[test]
fn test_plan_batch_sizes_with120Segments_shouldGive50_50_20() {
    assert_eq!(plan_batch_sizes(120, 50, SplitStrategy::Fixed), vec![50, 50, 20]);
}

/// Test edge sizes
#[test]
fn test_plan_batch_sizes_withEdgeCases_shouldCoverEverySegment() {
    assert!(plan_batch_sizes(0, 50, SplitStrategy::Fixed).is_empty());
    assert_eq!(plan_batch_sizes(1, 50, SplitStrategy::Fixed), vec![1]);
    assert_eq!(plan_batch_sizes(50, 50, SplitStrategy::Fixed), vec![50]);
    assert_eq!(plan_batch_sizes(51, 50, SplitStrategy::Balanced), vec![26, 25]);
    assert_eq!(plan_batch_sizes(3, 0, SplitStrategy::Fixed), vec![1, 1, 1]);
}

/// Test the sum of batch sizes always equals the segment count
#[test]
fn test_plan_batch_sizes_withManyInputs_shouldSumToTotal() {
    for total in 0..300 {
        for batch_size in [1, 7, 40, 50, 120] {
            for strategy in [SplitStrategy::Fixed, SplitStrategy::Balanced] {
                let sizes = plan_batch_sizes(total, batch_size, strategy);
                assert_eq!(sizes.iter().sum::<usize>(), total);
                assert!(sizes.iter().all(|s| *s >= 1 && *s <= batch_size));
            }
        }
    }
}

/// Test split keeps order and numbers batches contiguously from 1
#[test]
fn test_split_withSegments_shouldNumberContiguouslyAndKeepOrder() {
    let batches = Splitter::new(50, SplitStrategy::Fixed).split(segments(120));

    let numbers: Vec<u32> = batches.iter().map(|b| b.batch_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(batches.iter().all(|b| b.total_batches == 3));
    assert!(batches.iter().all(|b| b.segment_count == b.segments.len()));

    let ids: Vec<String> = batches
        .iter()
        .flat_map(|b| b.segments.iter().map(|s| s.id.clone()))
        .collect();
    let expected: Vec<String> = (1..=120).map(|i| format!("u{}", i)).collect();
    assert_eq!(ids, expected);
}

/// Test writing batches replaces the files of an earlier split
#[test]
fn test_write_batches_afterEarlierSplit_shouldRemoveStaleFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().join("batches");

    let splitter = Splitter::new(10, SplitStrategy::Fixed);
    let first = splitter.write_batches(&dir, &splitter.split(segments(35)))?;
    assert_eq!(first.len(), 4);

    let second = splitter.write_batches(&dir, &splitter.split(segments(12)))?;
    assert_eq!(second, vec![batch_file_name(1), batch_file_name(2)]);
    assert!(!FileManager::file_exists(dir.join("batch_003.json")));
    assert!(!FileManager::file_exists(dir.join("batch_004.json")));

    let batch: BatchFile = FileManager::read_json(dir.join("batch_002.json"))?;
    assert_eq!(batch.segment_count, 2);
    assert_eq!(batch.total_batches, 2);
    Ok(())
}

/// Test the batch file JSON layout expected by external translators
#[test]
fn test_batch_file_json_shouldUseWorkflowFieldNames() -> Result<()> {
    let batch = Splitter::new(2, SplitStrategy::Fixed)
        .split(segments(1))
        .remove(0);
    let json = serde_json::to_value(&batch)?;

    assert_eq!(json["batch_number"], 1);
    assert_eq!(json["total_batches"], 1);
    assert_eq!(json["segment_count"], 1);
    assert_eq!(json["segments"][0]["id"], "u1");
    assert_eq!(json["segments"][0]["source"], "text 1");
    Ok(())
}
