/*!
 * Source documents and their translatable segments.
 *
 * A source document is read once, broken into segments for splitting, and
 * read again at merge time to substitute translations. Each format
 * implements [`SegmentCodec`]:
 * - `xliff`: XLIFF 1.2 and SDLXLIFF translation units
 * - `plain_text`: one segment per non-blank line
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::DocumentError;
use crate::file_utils::{FileManager, FileType};

pub mod plain_text;
pub mod xliff;

pub use plain_text::PlainTextCodec;
pub use xliff::XliffCodec;

/// A minimal translatable unit of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Identifier that locates the segment in its source document
    pub id: String,
    /// Source text
    pub source: String,
}

impl Segment {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

/// Result of writing translations into a document
#[derive(Debug, Clone)]
pub struct AppliedDocument {
    /// The document text with translations substituted
    pub content: String,
    /// Number of segments that received a translation
    pub replaced: usize,
    /// Ids with a translation that could not be written into the document
    pub unplaced: Vec<String>,
}

/// Reads segments out of a document format and writes translations back
pub trait SegmentCodec: Send + Sync {
    /// Extract segments in document order
    ///
    /// With `extract_all` unset, segments that already carry a translation are skipped.
    fn extract(&self, content: &str, extract_all: bool) -> Result<Vec<Segment>, DocumentError>;

    /// Substitute translations keyed by segment id, leaving every other byte untouched
    fn apply(
        &self,
        content: &str,
        translations: &HashMap<String, String>,
    ) -> Result<AppliedDocument, DocumentError>;
}

/// Get the codec for a file type, if the format is supported
pub fn codec_for(file_type: FileType) -> Option<Box<dyn SegmentCodec>> {
    match file_type {
        FileType::Xliff => Some(Box::new(XliffCodec)),
        FileType::PlainText => Some(Box::new(PlainTextCodec)),
        FileType::Unknown => None,
    }
}

/// A source document loaded into memory
pub struct SourceDocument {
    path: PathBuf,
    file_type: FileType,
    content: String,
    codec: Box<dyn SegmentCodec>,
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("path", &self.path)
            .field("file_type", &self.file_type)
            .field("len", &self.content.len())
            .finish()
    }
}

impl SourceDocument {
    /// Read a document and pick its codec
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        let file_type = FileManager::detect_file_type(path).unwrap_or(FileType::Unknown);
        let codec = codec_for(file_type)
            .ok_or_else(|| DocumentError::UnsupportedFormat(path.to_path_buf()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file_type,
            content,
            codec,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Extract the translatable segments
    ///
    /// Fails when the document yields no segments at all.
    pub fn segments(&self, extract_all: bool) -> Result<Vec<Segment>, DocumentError> {
        let segments = self.codec.extract(&self.content, extract_all)?;
        if segments.is_empty() {
            return Err(DocumentError::NoSegments(self.path.clone()));
        }
        Ok(segments)
    }

    /// Substitute translations into a copy of the document
    pub fn apply_translations(
        &self,
        translations: &HashMap<String, String>,
    ) -> Result<AppliedDocument, DocumentError> {
        self.codec.apply(&self.content, translations)
    }
}

/// Escape text for use as XML character data
pub(crate) fn escape_xml_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
