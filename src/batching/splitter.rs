/*!
 * Splitting segments into batches.
 *
 * Batches are numbered from 1 without gaps, keep document order, and
 * together hold every segment exactly once.
 */

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{batch_file_name, parse_batch_number, BatchFile, Manifest, MANIFEST_FILE};
use crate::document::Segment;
use crate::file_utils::FileManager;

/// How segments are distributed over batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Full batches of `batch_size`, the remainder in the last one
    #[default]
    Fixed,
    /// Same batch count as `Fixed`, with sizes differing by at most one
    Balanced,
}

impl std::fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Sizes of the batches for `total` segments
///
/// A `batch_size` of zero is treated as one.
pub fn plan_batch_sizes(total: usize, batch_size: usize, strategy: SplitStrategy) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let batch_size = batch_size.max(1);
    let batch_count = total.div_ceil(batch_size);

    match strategy {
        SplitStrategy::Fixed => (0..batch_count)
            .map(|i| batch_size.min(total - i * batch_size))
            .collect(),
        SplitStrategy::Balanced => {
            let base = total / batch_count;
            let remainder = total % batch_count;
            (0..batch_count)
                .map(|i| base + usize::from(i < remainder))
                .collect()
        }
    }
}

/// Partition segments into batch files
pub fn split_segments(segments: Vec<Segment>, batch_size: usize, strategy: SplitStrategy) -> Vec<BatchFile> {
    let sizes = plan_batch_sizes(segments.len(), batch_size, strategy);
    let total_batches = sizes.len() as u32;
    let mut remaining = segments.into_iter();

    sizes
        .into_iter()
        .enumerate()
        .map(|(index, size)| {
            let batch_segments: Vec<Segment> = remaining.by_ref().take(size).collect();
            BatchFile {
                batch_number: index as u32 + 1,
                total_batches,
                segment_count: batch_segments.len(),
                segments: batch_segments,
            }
        })
        .collect()
}

/// Writes batch files and their manifest into a `batches/` directory
pub struct Splitter {
    batch_size: usize,
    strategy: SplitStrategy,
}

impl Splitter {
    pub fn new(batch_size: usize, strategy: SplitStrategy) -> Self {
        Self { batch_size, strategy }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    /// Partition segments using this splitter's settings
    pub fn split(&self, segments: Vec<Segment>) -> Vec<BatchFile> {
        split_segments(segments, self.batch_size, self.strategy)
    }

    /// Write batches to `dir`, replacing any batch files from an earlier split
    ///
    /// Returns the written file names in batch order.
    pub fn write_batches(&self, dir: &Path, batches: &[BatchFile]) -> Result<Vec<String>> {
        FileManager::ensure_dir(dir)?;
        Self::remove_stale_batches(dir)?;

        let mut names = Vec::with_capacity(batches.len());
        for batch in batches {
            let name = batch_file_name(batch.batch_number);
            FileManager::write_json(dir.join(&name), batch)?;
            info!(
                "Batch {}/{}: {} segment(s) -> {}",
                batch.batch_number, batch.total_batches, batch.segment_count, name
            );
            names.push(name);
        }
        Ok(names)
    }

    /// Write the manifest next to the batches
    pub fn write_manifest(&self, dir: &Path, manifest: &Manifest) -> Result<()> {
        FileManager::write_json(dir.join(MANIFEST_FILE), manifest)
    }

    fn remove_stale_batches(dir: &Path) -> Result<()> {
        for path in FileManager::list_files(dir)? {
            let is_batch = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| parse_batch_number(n).is_some() || n == MANIFEST_FILE);
            if is_batch {
                debug!("Removing stale {:?}", path);
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove stale batch file: {:?}", path))?;
            }
        }
        Ok(())
    }
}
