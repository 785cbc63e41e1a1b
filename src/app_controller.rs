/*!
 * Application controller.
 *
 * Ties the workspace, the document codecs, batching, the glossary and the
 * translation service together behind one method per CLI command.
 */

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};

use crate::app_config::Config;
use crate::batching::{batch_file_name, parse_batch_number, Manifest, MergeReport, Merger, Splitter};
use crate::document::SourceDocument;
use crate::file_utils::FileManager;
use crate::glossary::Glossary;
use crate::providers::Provider;
use crate::translation::{AgentTask, BatchTranslator, TranslationRunSummary, TranslationService};
use crate::workspace::{Project, ProjectStatus, Workspace};

/// Main application controller for the split → translate → merge workflow
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Workspace the commands operate on
    workspace: Workspace,
    // @field: Draw progress bars during direct translation
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, workspace: Workspace) -> Self {
        Self {
            config,
            workspace,
            show_progress: true,
        }
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Create the workspace folders
    pub fn init(&self) -> Result<()> {
        self.workspace.init()
    }

    /// Create a new project
    pub fn new_project(&self, name: &str) -> Result<Project> {
        self.workspace.init()?;
        self.workspace.create_project(name)
    }

    /// Split a source document of a project into batch files
    ///
    /// `source` is either a file name already in the project's `source/`
    /// folder or a path that is imported into it.
    pub fn split(&self, project_name: &str, source: &Path) -> Result<Manifest> {
        self.config.validate().context("Configuration validation failed")?;
        let project = self.workspace.project(project_name)?;
        let source_path = project.resolve_source(source)?;

        let document = SourceDocument::open(&source_path)
            .with_context(|| format!("Failed to open source document: {:?}", source_path))?;
        let segments = document.segments(self.config.split.extract_all)?;
        let total_segments = segments.len();
        info!(
            "Extracted {} segment(s) from {:?} ({})",
            total_segments,
            source_path,
            document.file_type()
        );

        Self::archive_outputs(&project)?;

        let splitter = Splitter::new(self.config.split.batch_size, self.config.split.strategy);
        let batches = splitter.split(segments);
        let batch_files = splitter.write_batches(&project.batches_dir(), &batches)?;

        let source_file = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Source path has no file name: {:?}", source_path))?;

        let manifest = Manifest {
            project: project.name().to_string(),
            source_file,
            format: document.file_type(),
            source_sha256: FileManager::sha256_hex(&source_path)?,
            batch_size: splitter.batch_size(),
            strategy: splitter.strategy(),
            extract_all: self.config.split.extract_all,
            total_segments,
            total_batches: batch_files.len() as u32,
            batch_files,
            created_at: chrono::Local::now().to_rfc3339(),
        };
        splitter.write_manifest(&project.batches_dir(), &manifest)?;

        info!(
            "Split {} segment(s) into {} batch(es) in {:?}",
            manifest.total_segments,
            manifest.total_batches,
            project.batches_dir()
        );
        Ok(manifest)
    }

    /// Move batch outputs of an earlier split into `output/superseded_<timestamp>/`
    ///
    /// They no longer match the new batches, so neither translate nor merge
    /// may pick them up.
    fn archive_outputs(project: &Project) -> Result<()> {
        let stale: Vec<_> = FileManager::list_files(project.output_dir())?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(parse_batch_number)
                    .is_some()
            })
            .collect();
        if stale.is_empty() {
            return Ok(());
        }

        let archive = project
            .output_dir()
            .join(format!("superseded_{}", chrono::Local::now().format("%Y%m%d-%H%M%S%.3f")));
        for path in &stale {
            if let Some(name) = path.file_name() {
                FileManager::move_file(path, archive.join(name))?;
            }
        }
        warn!(
            "Moved {} output file(s) of the earlier split to {:?}",
            stale.len(),
            archive
        );
        Ok(())
    }

    /// Describe one batch as a task for an external agent
    pub fn task(&self, project_name: &str, batch_number: u32) -> Result<AgentTask> {
        let project = self.workspace.project(project_name)?;
        let name = batch_file_name(batch_number);
        let input_file = project.batches_dir().join(&name);
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!(
                "Batch {} not found in project {}: {:?}",
                batch_number,
                project_name,
                input_file
            ));
        }

        let batch = FileManager::read_json(&input_file)?;
        let glossary = self.glossary()?;
        Ok(AgentTask::new(
            &batch,
            &input_file,
            &project.output_dir().join(&name),
            &self.config.source_language,
            &self.config.target_language,
            &glossary,
            self.config.translation.common.domain_hint.as_deref(),
        ))
    }

    /// Translate a project's batches with the configured provider
    pub async fn translate(&self, project_name: &str, selection: Option<&[u32]>) -> Result<TranslationRunSummary> {
        let service = TranslationService::from_config(&self.config)?;
        self.run_translation(project_name, selection, service).await
    }

    /// Translate a project's batches with an explicit provider
    pub async fn translate_with_provider(
        &self,
        project_name: &str,
        selection: Option<&[u32]>,
        provider: Box<dyn Provider>,
    ) -> Result<TranslationRunSummary> {
        self.config.validate().context("Configuration validation failed")?;
        let service = TranslationService::new(provider, &self.config);
        self.run_translation(project_name, selection, service).await
    }

    async fn run_translation(
        &self,
        project_name: &str,
        selection: Option<&[u32]>,
        service: TranslationService,
    ) -> Result<TranslationRunSummary> {
        let project = self.workspace.project(project_name)?;
        let glossary = self.glossary()?;
        let translator = BatchTranslator::new(service).with_progress(self.show_progress);

        let summary = translator.translate_project(&project, &glossary, selection).await?;
        info!(
            "Translated {} batch(es), {} failed",
            summary.translated.len(),
            summary.failed.len()
        );
        if summary.untranslated_segments > 0 {
            warn!("{} segment(s) came back without a translation", summary.untranslated_segments);
        }
        info!("{}", summary.token_usage.summary());
        Ok(summary)
    }

    /// Merge a project's outputs into its final artifact
    pub fn merge(&self, project_name: &str) -> Result<MergeReport> {
        let project = self.workspace.project(project_name)?;
        Merger::new(&project).merge(&self.config.target_language)
    }

    /// Report where a project stands
    pub fn status(&self, project_name: &str) -> Result<ProjectStatus> {
        self.workspace.project(project_name)?.status()
    }

    /// Names of all projects
    pub fn projects(&self) -> Result<Vec<String>> {
        self.workspace.list_projects()
    }

    /// Load the shared glossary
    pub fn glossary(&self) -> Result<Glossary> {
        Glossary::load(&self.workspace.glossary_path())
    }

    /// Look up a glossary term
    pub fn glossary_lookup(&self, term: &str) -> Result<Option<String>> {
        Ok(self.glossary()?.lookup(term).map(str::to_string))
    }

    /// Add or replace a glossary term, returning the previous translation
    pub fn glossary_set(&self, term: &str, translation: &str) -> Result<Option<String>> {
        if term.trim().is_empty() {
            return Err(anyhow!("Glossary term must not be empty"));
        }
        let mut glossary = self.glossary()?;
        let previous = glossary.insert(term.trim(), translation.trim());
        glossary.save(&self.workspace.glossary_path())?;
        Ok(previous)
    }
}
