//! Error types for translation, execution and export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the remote natural-language-to-SQL service.
///
/// Every variant that involves a response carries the raw payload so the
/// diagnostic can be shown or logged as received.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslationError {
    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The service did not answer within the configured timeout.
    #[error("translation service timed out after {seconds} seconds")]
    Timeout {
        /// Configured timeout.
        seconds: u64,
    },

    /// The service answered with a non-success status.
    #[error("translation service error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as received.
        body: String,
    },

    /// The response body was not a chat-completion document.
    #[error("malformed translation response: {body}")]
    MalformedResponse {
        /// Response body as received.
        body: String,
    },

    /// The response had no `choices[0].message.content`.
    #[error("translation response contained no completion")]
    EmptyCompletion,

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl TranslationError {
    /// Returns a short message suitable for the end user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) | Self::Client(_) => {
                "Could not reach the translation service. Please check your connection."
            }
            Self::Timeout { .. } => "The translation service took too long to answer.",
            Self::Status { .. } => "The translation service rejected the request.",
            Self::MalformedResponse { .. } | Self::EmptyCompletion => {
                "The translation service returned an unexpected answer."
            }
        }
    }
}

/// Errors from running SQL against the registered relation.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// No table has been registered yet.
    #[error("no lead table is loaded")]
    NoData,

    /// The engine rejected or failed to run the statement.
    #[error("query failed: {message}")]
    Engine {
        /// Engine diagnostic.
        message: String,
    },
}

impl From<polars::error::PolarsError> for ExecutionError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::Engine {
            message: err.to_string(),
        }
    }
}

/// Failure of one question, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum AskError {
    /// No lead table is loaded; nothing was translated.
    #[error("no lead table is loaded")]
    NoData,

    /// Translating the question failed; nothing was executed.
    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// The generated SQL failed to execute.
    #[error("execution of `{sql}` failed: {source}")]
    Execution {
        /// SQL that was attempted.
        sql: String,
        /// Engine failure.
        source: ExecutionError,
    },
}

impl AskError {
    /// Returns a short message suitable for the end user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::NoData => "Please load a CSV or Excel file first.",
            Self::Translation(err) => err.user_message(),
            Self::Execution { .. } => "The generated query could not be run against your data.",
        }
    }

    /// SQL that was generated before the failure, if any.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::NoData | Self::Translation(_) => None,
            Self::Execution { sql, .. } => Some(sql),
        }
    }
}

/// Errors while writing query results to CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output file could not be created.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failed to serialize the frame.
    #[error("failed to write CSV: {0}")]
    Write(#[from] polars::error::PolarsError),
}
