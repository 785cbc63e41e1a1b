/*!
 * Prompt construction for batch translation.
 *
 * This module provides:
 * - The system prompt template
 * - The per-batch user prompt with glossary and `[ID: ..]` blocks
 * - The task description handed to an external agent
 */

pub mod task;
pub mod templates;

// Re-export main types
pub use task::AgentTask;
pub use templates::{PromptTemplate, TranslationPromptBuilder};
