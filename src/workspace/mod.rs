/*!
 * Workspace directory layout.
 *
 * ```text
 * <root>/
 *   projects/<name>/{source,batches,output,final}/
 *   tools/
 *   glossary/technical_terms.json
 * ```
 *
 * External agents rely on this layout, so the names here are fixed.
 */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::errors::WorkspaceError;
use crate::file_utils::FileManager;

pub mod status;

pub use status::ProjectStatus;

pub const PROJECTS_DIR: &str = "projects";
pub const TOOLS_DIR: &str = "tools";
pub const GLOSSARY_DIR: &str = "glossary";
pub const GLOSSARY_FILE: &str = "technical_terms.json";

pub const SOURCE_DIR: &str = "source";
pub const BATCHES_DIR: &str = "batches";
pub const OUTPUT_DIR: &str = "output";
pub const FINAL_DIR: &str = "final";

/// Root of a translation workspace
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join(PROJECTS_DIR)
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root.join(TOOLS_DIR)
    }

    pub fn glossary_path(&self) -> PathBuf {
        self.root.join(GLOSSARY_DIR).join(GLOSSARY_FILE)
    }

    /// Create the top-level folders and an empty glossary; safe to run again
    pub fn init(&self) -> Result<()> {
        FileManager::ensure_dir(self.projects_dir())?;
        FileManager::ensure_dir(self.tools_dir())?;

        let glossary_path = self.glossary_path();
        if !FileManager::file_exists(&glossary_path) {
            FileManager::write_to_file(&glossary_path, "{}\n")?;
            debug!("Created empty glossary at {:?}", glossary_path);
        }

        info!("Workspace ready at {:?}", self.root);
        Ok(())
    }

    /// Check that a project name is a single, visible path component
    pub fn validate_project_name(name: &str) -> Result<(), WorkspaceError> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(())
        } else {
            Err(WorkspaceError::InvalidProjectName(name.to_string()))
        }
    }

    /// Create a project with its four stage folders
    pub fn create_project(&self, name: &str) -> Result<Project> {
        Self::validate_project_name(name)?;
        let project = Project::new(name, self.projects_dir().join(name));
        if project.root().exists() {
            return Err(WorkspaceError::ProjectExists(name.to_string()).into());
        }

        for dir in project.stage_dirs() {
            FileManager::ensure_dir(&dir)?;
        }

        info!("Created project {} at {:?}", name, project.root());
        Ok(project)
    }

    /// Open an existing project
    pub fn project(&self, name: &str) -> Result<Project> {
        Self::validate_project_name(name)?;
        let project = Project::new(name, self.projects_dir().join(name));
        if !FileManager::dir_exists(project.root()) {
            return Err(WorkspaceError::ProjectNotFound(name.to_string()).into());
        }
        Ok(project)
    }

    /// Names of all projects, sorted
    pub fn list_projects(&self) -> Result<Vec<String>> {
        let dir = self.projects_dir();
        if !FileManager::dir_exists(&dir) {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir).with_context(|| format!("Failed to read {:?}", dir))? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// A single translation project
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    root: PathBuf,
}

impl Project {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    pub fn batches_dir(&self) -> PathBuf {
        self.root.join(BATCHES_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    pub fn final_dir(&self) -> PathBuf {
        self.root.join(FINAL_DIR)
    }

    fn stage_dirs(&self) -> [PathBuf; 4] {
        [
            self.source_dir(),
            self.batches_dir(),
            self.output_dir(),
            self.final_dir(),
        ]
    }

    /// Resolve a source argument to a file inside `source/`
    ///
    /// A bare file name is looked up in `source/`; any other existing path is
    /// copied into `source/` first. An existing file of the same name in
    /// `source/` is left alone so the immutable input never changes under a split.
    pub fn resolve_source(&self, source: &Path) -> Result<PathBuf> {
        let in_source_dir = self.source_dir().join(source);
        if source.components().count() == 1 && FileManager::file_exists(&in_source_dir) {
            return Ok(in_source_dir);
        }

        if !FileManager::file_exists(source) {
            return Err(anyhow::anyhow!("Source file does not exist: {:?}", source));
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Source path has no file name: {:?}", source))?;
        let destination = self.source_dir().join(file_name);

        let already_inside = destination.canonicalize().ok() == source.canonicalize().ok()
            && destination.exists();
        if already_inside {
            return Ok(destination);
        }

        if FileManager::file_exists(&destination) {
            if FileManager::sha256_hex(&destination)? != FileManager::sha256_hex(source)? {
                return Err(anyhow::anyhow!(
                    "A different file named {:?} already exists in {:?}",
                    file_name,
                    self.source_dir()
                ));
            }
            return Ok(destination);
        }

        FileManager::copy_file(source, &destination)?;
        info!("Imported {:?} into {:?}", source, self.source_dir());
        Ok(destination)
    }

    /// Summarize the project's progress through the workflow
    pub fn status(&self) -> Result<ProjectStatus> {
        ProjectStatus::collect(self)
    }
}
