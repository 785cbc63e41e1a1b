use std::path::Path;

use serde::{Deserialize, Serialize};

use super::TranslationPromptBuilder;
use crate::batching::{BatchFile, OutputFile, TranslationItem};
use crate::glossary::Glossary;

/// A self-contained work order for an external agent
///
/// The agent reads `input_file`, translates every segment and writes
/// `output_file` in the shape of `expected_output_format`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTask {
    pub description: String,
    pub input_file: String,
    pub output_file: String,
    pub prompt: String,
    pub expected_output_format: OutputFile,
}

impl AgentTask {
    pub fn new(
        batch: &BatchFile,
        input_file: &Path,
        output_file: &Path,
        source_language: &str,
        target_language: &str,
        glossary: &Glossary,
        domain_hint: Option<&str>,
    ) -> Self {
        let prompt =
            TranslationPromptBuilder::for_batch(batch, source_language, target_language, glossary, domain_hint)
                .build();

        Self {
            description: format!(
                "Translate batch {}/{} ({} segment(s)) from {} to {}",
                batch.batch_number,
                batch.total_batches,
                batch.segment_count,
                source_language,
                target_language
            ),
            input_file: input_file.to_string_lossy().to_string(),
            output_file: output_file.to_string_lossy().to_string(),
            prompt,
            expected_output_format: OutputFile {
                batch_number: batch.batch_number,
                translations: vec![TranslationItem {
                    id: "segment_id".to_string(),
                    source: "original text".to_string(),
                    target: "translated text".to_string(),
                }],
            },
        }
    }
}
