/*!
 * Batch translation processing.
 *
 * Batches are translated strictly one after another. A failed batch is
 * recorded and the run moves on; the caller decides how to report it.
 */

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

use crate::batching::{batch_file_name, BatchFile, Merger};
use crate::file_utils::FileManager;
use crate::glossary::Glossary;
use crate::workspace::Project;

use super::core::{TokenUsageStats, TranslationService};

/// Outcome of one translate run
#[derive(Debug, Clone)]
pub struct TranslationRunSummary {
    /// Batches that got an output file
    pub translated: Vec<u32>,
    /// Batches that failed, with the reason
    pub failed: Vec<(u32, String)>,
    /// Segments written with an empty target
    pub untranslated_segments: usize,
    pub token_usage: TokenUsageStats,
}

impl TranslationRunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sequential batch translator for a project
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Whether to draw a progress bar on stderr
    show_progress: bool,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService) -> Self {
        Self {
            service,
            show_progress: true,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Pick the batches to translate
    ///
    /// With an explicit selection those batches are translated again even if
    /// they already have an output; otherwise only batches without one.
    pub fn select_batches(project: &Project, selection: Option<&[u32]>) -> Result<Vec<BatchFile>> {
        let merger = Merger::new(project);
        let manifest = merger.load_manifest()?;
        let batches = merger.load_batches(&manifest)?;

        match selection {
            Some(numbers) => {
                let mut selected = Vec::with_capacity(numbers.len());
                for number in numbers {
                    let batch = batches
                        .iter()
                        .find(|b| b.batch_number == *number)
                        .ok_or_else(|| {
                            anyhow!(
                                "Batch {} does not exist (project {} has {} batch(es))",
                                number,
                                project.name(),
                                manifest.total_batches
                            )
                        })?;
                    selected.push(batch.clone());
                }
                Ok(selected)
            }
            None => Ok(batches
                .into_iter()
                .filter(|b| {
                    !FileManager::file_exists(project.output_dir().join(batch_file_name(b.batch_number)))
                })
                .collect()),
        }
    }

    /// Translate the selected batches of a project and write their outputs
    pub async fn translate_project(
        &self,
        project: &Project,
        glossary: &Glossary,
        selection: Option<&[u32]>,
    ) -> Result<TranslationRunSummary> {
        let batches = Self::select_batches(project, selection)?;
        info!(
            "Translating {} batch(es) of project {} with {}",
            batches.len(),
            project.name(),
            self.service.provider_name()
        );

        // Fail fast instead of failing every batch against an unreachable provider
        if !batches.is_empty() {
            self.service.test_connection().await.map_err(|e| {
                anyhow!("Provider {} is not reachable: {}", self.service.provider_name(), e)
            })?;
        }

        let progress_bar = if self.show_progress {
            let bar = ProgressBar::new(batches.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style.progress_chars("=> "));
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut translated = Vec::new();
        let mut failed = Vec::new();
        let mut untranslated_segments = 0;

        for batch in &batches {
            progress_bar.set_message(batch_file_name(batch.batch_number));

            match self.service.translate_batch(batch, glossary).await {
                Ok(output) => {
                    let path = project.output_dir().join(batch_file_name(batch.batch_number));
                    FileManager::write_json(&path, &output)?;
                    untranslated_segments += output
                        .translations
                        .iter()
                        .filter(|t| t.target.trim().is_empty())
                        .count();
                    info!("Batch {} written to {:?}", batch.batch_number, path);
                    translated.push(batch.batch_number);
                }
                Err(e) => {
                    error!("Batch {} failed: {}", batch.batch_number, e);
                    failed.push((batch.batch_number, e.to_string()));
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("done");

        Ok(TranslationRunSummary {
            translated,
            failed,
            untranslated_segments,
            token_usage: self.service.token_usage(),
        })
    }
}
