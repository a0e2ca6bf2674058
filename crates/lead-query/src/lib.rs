//! Natural-language queries over a normalized lead table.
//!
//! A [`LeadSession`] owns the loaded table and a private Polars
//! [`SQLContext`](polars::sql::SQLContext) where it is registered as
//! `leads`. Each question is described ([`describe_table`]), translated to
//! SQL by a [`SqlTranslator`], and executed by the [`LeadStore`].
//!
//! # Example
//!
//! ```ignore
//! use lead_query::{ChatCompletionTranslator, LeadSession, TranslatorConfig};
//!
//! let translator = ChatCompletionTranslator::new(TranslatorConfig::default(), api_key)?;
//! let mut session = LeadSession::with_table(normalized);
//! let answer = session.ask(&translator, "leads with revenue over 1 million")?;
//! println!("{}", answer.outcome.summary());
//! ```

mod error;
mod export;
mod overview;
mod schema;
mod session;
mod store;
mod translate;

// === Error Types ===
pub use error::{AskError, ExecutionError, ExportError, TranslationError};

// === Schema & Translation ===
pub use schema::describe_table;
pub use translate::{
    ChatCompletionTranslator, SqlTranslator, TranslatorConfig, render_system_prompt,
    strip_code_fences,
};

// === Execution ===
pub use session::{Answer, LeadSession, QuestionState};
pub use store::{LeadStore, QueryOutcome};

// === Results ===
pub use export::{export_results, results_to_csv};
pub use overview::DatasetOverview;
