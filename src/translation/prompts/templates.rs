/*!
 * Prompt templates for batch translation.
 *
 * The user prompt lists every segment as an `[ID: <id>]` block so the
 * answer can be mapped back to segment ids without relying on order.
 */

use crate::batching::BatchFile;
use crate::document::Segment;
use crate::glossary::Glossary;

/// System prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default system prompt for document translation.
    pub const DOCUMENT_TRANSLATOR: &'static str = "You are a professional translator. \
Translate from {source_language} to {target_language}. \
Keep numbering and formatting, and do not add explanations.";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default document translator template.
    pub fn document_translator() -> Self {
        Self::new(Self::DOCUMENT_TRANSLATOR)
    }

    /// Render the template with the given variables.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::document_translator()
    }
}

/// Builder for the user prompt of one batch.
#[derive(Debug, Clone)]
pub struct TranslationPromptBuilder<'a> {
    source_language: String,
    target_language: String,
    segments: &'a [Segment],
    glossary_terms: Vec<(String, String)>,
    domain_hint: Option<String>,
}

impl<'a> TranslationPromptBuilder<'a> {
    /// Create a new prompt builder.
    pub fn new(source_language: &str, target_language: &str, segments: &'a [Segment]) -> Self {
        Self {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            segments,
            glossary_terms: Vec::new(),
            domain_hint: None,
        }
    }

    /// Prompt for a whole batch with the glossary entries that occur in it.
    ///
    /// Agent tasks and direct translation both build their prompt here.
    pub fn for_batch(
        batch: &'a BatchFile,
        source_language: &str,
        target_language: &str,
        glossary: &Glossary,
        domain_hint: Option<&str>,
    ) -> Self {
        let terms = glossary.relevant_terms(batch.segments.iter().map(|s| s.source.as_str()));
        Self::new(source_language, target_language, &batch.segments)
            .with_glossary_terms(terms)
            .with_domain_hint(domain_hint)
    }

    /// Set the glossary entries the translation must follow.
    pub fn with_glossary_terms<I, K, V>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.glossary_terms = terms.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Describe the subject of the document.
    pub fn with_domain_hint(mut self, hint: Option<&str>) -> Self {
        self.domain_hint = hint.filter(|h| !h.trim().is_empty()).map(str::to_string);
        self
    }

    /// Build the user prompt.
    pub fn build(&self) -> String {
        let mut prompt = format!(
            "Translate the following content from {} to {}.\n",
            self.source_language, self.target_language
        );

        if let Some(hint) = &self.domain_hint {
            prompt.push_str(&format!("\nSubject: {}\n", hint));
        }

        if !self.glossary_terms.is_empty() {
            prompt.push_str("\nGlossary (must follow):\n");
            for (term, translation) in &self.glossary_terms {
                prompt.push_str(&format!("  - {} -> {}\n", term, translation));
            }
        }

        prompt.push_str(
            "\nRequirements:\n\
             1. Translate accurately and naturally\n\
             2. Keep the original formatting and paragraph structure\n\
             3. Glossary terms must use the given translation\n\
             4. For each segment, output [ID: xxx] on its own line followed by the translation\n\
             5. Output only the translations, without explanations or notes\n",
        );

        prompt.push_str("\nContent to translate:\n");
        for segment in self.segments {
            prompt.push_str(&format!("\n[ID: {}]\n{}\n", segment.id, segment.source));
        }

        prompt
    }
}
