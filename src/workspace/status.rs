use std::fmt;

use anyhow::Result;

use super::Project;
use crate::batching::{batch_file_name, Manifest, MANIFEST_FILE};
use crate::file_utils::FileManager;

/// Where a project stands in the split → translate → merge workflow
#[derive(Debug, Clone)]
pub struct ProjectStatus {
    pub name: String,
    /// File names in `source/`
    pub sources: Vec<String>,
    /// Manifest of the last split, if any
    pub manifest: Option<Manifest>,
    /// Batches that have an output file
    pub completed: Vec<u32>,
    /// Batches still waiting for an output file
    pub pending: Vec<u32>,
    /// File names in `final/`
    pub finals: Vec<String>,
}

fn file_names(paths: Vec<std::path::PathBuf>) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .collect()
}

impl ProjectStatus {
    pub(crate) fn collect(project: &Project) -> Result<Self> {
        let manifest_path = project.batches_dir().join(MANIFEST_FILE);
        let manifest: Option<Manifest> = if FileManager::file_exists(&manifest_path) {
            Some(FileManager::read_json(&manifest_path)?)
        } else {
            None
        };

        let (completed, pending): (Vec<u32>, Vec<u32>) = match &manifest {
            Some(manifest) => manifest.batch_numbers().into_iter().partition(|n| {
                FileManager::file_exists(project.output_dir().join(batch_file_name(*n)))
            }),
            None => (Vec::new(), Vec::new()),
        };

        Ok(Self {
            name: project.name().to_string(),
            sources: file_names(FileManager::list_files(project.source_dir())?),
            manifest,
            completed,
            pending,
            finals: file_names(FileManager::list_files(project.final_dir())?),
        })
    }

    /// True once every batch of the last split has an output
    pub fn ready_to_merge(&self) -> bool {
        self.manifest.is_some() && self.pending.is_empty()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Project: {}", self.name)?;
        if self.sources.is_empty() {
            writeln!(f, "  Sources: none")?;
        } else {
            writeln!(f, "  Sources: {}", self.sources.join(", "))?;
        }

        match &self.manifest {
            Some(manifest) => {
                writeln!(
                    f,
                    "  Split: {} -> {} segment(s) in {} batch(es) ({}, size {})",
                    manifest.source_file,
                    manifest.total_segments,
                    manifest.total_batches,
                    manifest.strategy,
                    manifest.batch_size
                )?;
                writeln!(
                    f,
                    "  Translated: {}/{} batch(es)",
                    self.completed.len(),
                    manifest.total_batches
                )?;
                if !self.pending.is_empty() {
                    let pending: Vec<String> = self.pending.iter().map(|n| n.to_string()).collect();
                    writeln!(f, "  Pending: {}", pending.join(", "))?;
                }
            }
            None => writeln!(f, "  Split: not yet")?,
        }

        if !self.finals.is_empty() {
            writeln!(f, "  Final: {}", self.finals.join(", "))?;
        }
        Ok(())
    }
}
