/*!
 * Error types for the xlifflow application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether a later attempt of the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RateLimitExceeded(_) | Self::RequestFailed(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

/// Errors raised while reading a source document into segments
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file extension does not map to a known document format
    #[error("Unsupported document format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// The document could not be parsed
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Two translation units share an id, so merge could not address them
    #[error("Duplicate segment id: {0}")]
    DuplicateSegmentId(String),

    /// Nothing left to translate
    #[error("No translatable segments found in {0:?}")]
    NoSegments(PathBuf),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a merge is refused
///
/// All of these are detected before the final artifact is written.
#[derive(Error, Debug)]
pub enum MergeError {
    /// No split has been recorded for the project
    #[error("No manifest found at {0:?}; split the source first")]
    MissingManifest(PathBuf),

    /// One or more batches have no output file
    #[error("Missing output for batch(es): {}", format_batch_list(.0))]
    MissingOutputs(Vec<u32>),

    /// A batch and its output disagree on the number of segments
    #[error("Segment count mismatch in batch {batch}: batch has {expected}, output has {actual}")]
    SegmentCountMismatch {
        batch: u32,
        expected: usize,
        actual: usize,
    },

    /// An output carries a segment id its batch never contained
    #[error("Output for batch {batch} contains unknown segment id {id}")]
    UnknownSegment { batch: u32, id: String },

    /// The output file belongs to a different batch
    #[error("Output file {file} declares batch {declared}, expected {expected}")]
    BatchNumberMismatch {
        file: String,
        declared: u32,
        expected: u32,
    },

    /// The source document changed after it was split
    #[error("Source document {0:?} no longer matches the manifest digest")]
    SourceChanged(PathBuf),

    /// An output translates different text than its batch holds
    #[error("Output for batch {batch} translates a different source for segment {id}; it may belong to an earlier split")]
    SourceMismatch { batch: u32, id: String },

    /// Verified translations that the document had no place for
    #[error("Could not place translation(s) for segment(s): {}", .0.join(", "))]
    UnplacedTranslations(Vec<String>),
}

/// Errors about the workspace directory layout
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// The project name is not usable as a directory name
    #[error("Invalid project name: {0:?}")]
    InvalidProjectName(String),

    /// The project already exists
    #[error("Project already exists: {0}")]
    ProjectExists(String),

    /// The project does not exist
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider answered but nothing usable came back
    #[error("Empty response for batch {0}")]
    EmptyResponse(u32),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document parsing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from merging
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    /// Error from the workspace layout
    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

fn format_batch_list(batches: &[u32]) -> String {
    batches
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
