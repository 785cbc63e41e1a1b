/*!
 * Merging translated batches back into the source document.
 *
 * Every check runs before anything is written: a merge either produces a
 * complete final artifact or refuses with a [`MergeError`].
 */

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use super::{batch_file_name, BatchFile, Manifest, OutputFile, MANIFEST_FILE};
use crate::document::SourceDocument;
use crate::errors::MergeError;
use crate::file_utils::FileManager;
use crate::workspace::Project;

/// Outcome of a successful merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Segments whose translation was written into the document
    pub merged: usize,
    /// Segments whose output target was empty
    pub untranslated: usize,
    /// Path of the final artifact
    pub output_path: PathBuf,
}

/// Check a complete set of outputs against their batches
///
/// Batches without an output are reported together, in batch order.
pub fn verify_outputs(
    batches: &[BatchFile],
    outputs: &BTreeMap<u32, OutputFile>,
) -> Result<(), MergeError> {
    let missing: Vec<u32> = batches
        .iter()
        .map(|b| b.batch_number)
        .filter(|n| !outputs.contains_key(n))
        .collect();
    if !missing.is_empty() {
        return Err(MergeError::MissingOutputs(missing));
    }

    for batch in batches {
        let output = &outputs[&batch.batch_number];

        if output.batch_number != batch.batch_number {
            return Err(MergeError::BatchNumberMismatch {
                file: batch_file_name(batch.batch_number),
                declared: output.batch_number,
                expected: batch.batch_number,
            });
        }

        if output.translations.len() != batch.segments.len() {
            return Err(MergeError::SegmentCountMismatch {
                batch: batch.batch_number,
                expected: batch.segments.len(),
                actual: output.translations.len(),
            });
        }

        let batch_sources: HashMap<&str, &str> = batch
            .segments
            .iter()
            .map(|s| (s.id.as_str(), s.source.as_str()))
            .collect();
        let mut output_ids = HashSet::new();
        for item in &output.translations {
            let Some(source) = batch_sources.get(item.id.as_str()) else {
                return Err(MergeError::UnknownSegment {
                    batch: batch.batch_number,
                    id: item.id.clone(),
                });
            };
            // Outputs may omit the source; when present it must be the batch's
            if !item.source.trim().is_empty() && item.source.trim() != source.trim() {
                return Err(MergeError::SourceMismatch {
                    batch: batch.batch_number,
                    id: item.id.clone(),
                });
            }
            output_ids.insert(item.id.as_str());
        }

        // Same length but repeated ids means some segment has no translation
        if output_ids.len() != batch_sources.len() {
            return Err(MergeError::SegmentCountMismatch {
                batch: batch.batch_number,
                expected: batch_sources.len(),
                actual: output_ids.len(),
            });
        }
    }

    Ok(())
}

/// Merges a project's outputs into `final/`
pub struct Merger<'a> {
    project: &'a Project,
}

impl<'a> Merger<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Read the manifest written by the last split
    pub fn load_manifest(&self) -> Result<Manifest> {
        let path = self.project.batches_dir().join(MANIFEST_FILE);
        if !FileManager::file_exists(&path) {
            return Err(MergeError::MissingManifest(path).into());
        }
        FileManager::read_json(&path)
    }

    /// Read every batch listed in the manifest
    pub fn load_batches(&self, manifest: &Manifest) -> Result<Vec<BatchFile>> {
        manifest
            .batch_files
            .iter()
            .map(|name| FileManager::read_json(self.project.batches_dir().join(name)))
            .collect()
    }

    /// Read the outputs that exist for the given batches
    pub fn load_outputs(&self, batches: &[BatchFile]) -> Result<BTreeMap<u32, OutputFile>> {
        let mut outputs = BTreeMap::new();
        for batch in batches {
            let path = self.project.output_dir().join(batch_file_name(batch.batch_number));
            if FileManager::file_exists(&path) {
                let output: OutputFile = FileManager::read_json(&path)?;
                outputs.insert(batch.batch_number, output);
            }
        }
        Ok(outputs)
    }

    /// Verify everything, then write `final/<stem>.<target_language>.<ext>`
    pub fn merge(&self, target_language: &str) -> Result<MergeReport> {
        let manifest = self.load_manifest()?;
        let source_path = self.project.source_dir().join(&manifest.source_file);

        let digest = FileManager::sha256_hex(&source_path)?;
        if digest != manifest.source_sha256 {
            return Err(MergeError::SourceChanged(source_path).into());
        }

        let batches = self.load_batches(&manifest)?;
        let outputs = self.load_outputs(&batches)?;
        verify_outputs(&batches, &outputs)?;

        let mut translations = HashMap::new();
        let mut untranslated = 0;
        for item in outputs.into_values().flat_map(|o| o.translations) {
            if item.target.trim().is_empty() {
                untranslated += 1;
                continue;
            }
            translations.insert(item.id, item.target);
        }
        if untranslated > 0 {
            warn!("{} segment(s) have an empty translation and keep their original target", untranslated);
        }

        let document = SourceDocument::open(&source_path)
            .with_context(|| format!("Failed to read source document: {:?}", source_path))?;
        let applied = document.apply_translations(&translations)?;
        if !applied.unplaced.is_empty() {
            return Err(MergeError::UnplacedTranslations(applied.unplaced).into());
        }

        let output_path =
            FileManager::generate_output_path(&source_path, self.project.final_dir(), target_language);
        FileManager::write_to_file(&output_path, &applied.content)?;

        info!("Merged {} segment(s) into {:?}", applied.replaced, output_path);

        Ok(MergeReport {
            merged: applied.replaced,
            untranslated,
            output_path,
        })
    }
}
