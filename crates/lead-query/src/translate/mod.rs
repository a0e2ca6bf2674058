//! Natural-language to SQL translation.

mod client;
mod prompt;

pub use client::{ChatCompletionTranslator, TranslatorConfig};
pub use prompt::render_system_prompt;

use lead_model::SchemaDescriptor;

use crate::error::TranslationError;

/// Turns a question about the leads table into one SQL statement.
pub trait SqlTranslator {
    /// Translates `question` against `schema`. No retries; no fallback SQL.
    fn translate(
        &self,
        question: &str,
        schema: &SchemaDescriptor,
    ) -> Result<String, TranslationError>;
}

/// Removes markdown code-fence markup from a completion and trims it.
pub fn strip_code_fences(completion: &str) -> String {
    completion
        .replace("```sql", "")
        .replace("```", "")
        .trim()
        .to_string()
}
