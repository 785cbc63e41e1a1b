/*!
 * Batch files and the split/merge steps built on them.
 *
 * - `splitter`: partitions a document's segments into numbered batch files
 * - `merge`: verifies outputs against their batches and rebuilds the document
 *
 * On-disk layout inside a project:
 * - `batches/batch_NNN.json`: [`BatchFile`]
 * - `batches/manifest.json`: [`Manifest`]
 * - `output/batch_NNN.json`: [`OutputFile`]
 */

use serde::{Deserialize, Serialize};

use crate::document::Segment;
use crate::file_utils::FileType;

pub mod merge;
pub mod splitter;

pub use merge::{MergeReport, Merger};
pub use splitter::{plan_batch_sizes, split_segments, SplitStrategy, Splitter};

/// Name of the manifest written next to the batch files
pub const MANIFEST_FILE: &str = "manifest.json";

/// File name for a batch number, e.g. `batch_007.json`
pub fn batch_file_name(batch_number: u32) -> String {
    format!("batch_{:03}.json", batch_number)
}

/// Inverse of [`batch_file_name`]
pub fn parse_batch_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("batch_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// One batch of segments handed to a translator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchFile {
    pub batch_number: u32,
    pub total_batches: u32,
    pub segment_count: usize,
    pub segments: Vec<Segment>,
}

/// A translated segment as written by the translator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationItem {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
}

/// The translator's answer for one batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputFile {
    pub batch_number: u32,
    pub translations: Vec<TranslationItem>,
}

/// Record of one split, read back by merge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub project: String,
    /// File name of the source document inside `source/`
    pub source_file: String,
    pub format: FileType,
    pub source_sha256: String,
    pub batch_size: usize,
    pub strategy: SplitStrategy,
    #[serde(default)]
    pub extract_all: bool,
    pub total_segments: usize,
    pub total_batches: u32,
    pub batch_files: Vec<String>,
    pub created_at: String,
}

impl Manifest {
    /// Batch numbers listed in the manifest, in order
    pub fn batch_numbers(&self) -> Vec<u32> {
        self.batch_files
            .iter()
            .filter_map(|f| parse_batch_number(f))
            .collect()
    }
}
