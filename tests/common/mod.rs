/*!
 * Common test utilities for the xlifflow test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use xlifflow::app_config::Config;
use xlifflow::app_controller::Controller;
use xlifflow::batching::{BatchFile, OutputFile, TranslationItem};
use xlifflow::workspace::Workspace;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds an SDLXLIFF-style document with `count` translation units
///
/// Every unit carries an empty `<target/>`, an `mrk` segment marker and a
/// note, so merges can be checked for untouched structure.
pub fn sample_xliff(count: usize) -> String {
    let mut units = String::new();
    for i in 1..=count {
        units.push_str(&format!(
            "      <trans-unit id=\"u{i}\">\n        <source>Segment &amp; text {i}</source>\n        <target/>\n        <note>keep {i}</note>\n      </trans-unit>\n"
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<xliff version=\"1.2\" xmlns=\"urn:oasis:names:tc:xliff:document:1.2\">\n\
  <file original=\"manual.docx\" source-language=\"en-US\" target-language=\"zh-CN\" datatype=\"x-sdlfilterframework2\">\n\
    <body>\n{units}    </body>\n\
  </file>\n\
</xliff>\n"
    )
}

/// Writes [`sample_xliff`] to a file
pub fn create_test_xliff(dir: &Path, filename: &str, count: usize) -> Result<PathBuf> {
    create_test_file(dir, filename, &sample_xliff(count))
}

/// A controller over a fresh workspace in `dir`, without progress bars
pub fn create_test_controller(dir: &Path) -> Result<Controller> {
    let controller = Controller::with_config(Config::default(), Workspace::new(dir)).with_progress(false);
    controller.init()?;
    Ok(controller)
}

/// The output a translator would write for a batch
pub fn translate_batch_file(batch: &BatchFile, translate: impl Fn(&str) -> String) -> OutputFile {
    OutputFile {
        batch_number: batch.batch_number,
        translations: batch
            .segments
            .iter()
            .map(|s| TranslationItem {
                id: s.id.clone(),
                source: s.source.clone(),
                target: translate(&s.source),
            })
            .collect(),
    }
}
