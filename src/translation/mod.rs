/*!
 * Direct translation of batches through an AI provider.
 *
 * This module is an alternative to handing batches to an external agent.
 * It is split into several submodules:
 *
 * - `core`: The translation service and provider construction
 * - `batch`: Sequential translation of a project's batches
 * - `prompts`: Prompt templates, builders and agent task descriptions
 * - `response`: Parsing of `[ID: ..]` formatted answers
 */

// Re-export main types for easier usage
pub use self::batch::{BatchTranslator, TranslationRunSummary};
pub use self::core::{build_provider, TokenUsageStats, TranslationService};
pub use self::prompts::{AgentTask, PromptTemplate, TranslationPromptBuilder};

// Submodules
pub mod batch;
pub mod core;
pub mod prompts;
pub mod response;
