//! One user's lead session: the loaded table, its SQL store, and the
//! question lifecycle.

use lead_model::SchemaDescriptor;
use lead_normalization::NormalizedTable;
use polars::prelude::DataFrame;
use tracing::{debug, info_span, warn};

use crate::error::{AskError, ExecutionError};
use crate::overview::DatasetOverview;
use crate::schema::describe_table;
use crate::store::{LeadStore, QueryOutcome};
use crate::translate::SqlTranslator;

/// Where the current (or last) question is in its lifecycle.
///
/// Every question starts from `Idle`; the terminal state of the last
/// question stays visible until the next one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionState {
    #[default]
    Idle,
    Translating,
    TranslationFailed,
    Executing,
    ExecutionFailed,
    ResultsEmpty,
    ResultsFound,
}

impl QuestionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Translating => "translating",
            Self::TranslationFailed => "translation_failed",
            Self::Executing => "executing",
            Self::ExecutionFailed => "execution_failed",
            Self::ResultsEmpty => "results_empty",
            Self::ResultsFound => "results_found",
        }
    }
}

/// A successfully answered question.
#[derive(Debug, Clone)]
pub struct Answer {
    /// SQL produced by the translator.
    pub sql: String,
    pub outcome: QueryOutcome,
}

/// The loaded table plus the store it is registered in.
///
/// Translation and execution failures leave the table and its registration
/// untouched, so the session stays usable after any failed question.
#[derive(Default)]
pub struct LeadSession {
    table: Option<NormalizedTable>,
    store: LeadStore,
    state: QuestionState,
    last_result: Option<DataFrame>,
}

impl LeadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with `table` already registered.
    pub fn with_table(table: NormalizedTable) -> Self {
        let mut session = Self::new();
        session.replace_data(table);
        session
    }

    /// Swaps in a new table and re-registers it, dropping the previous
    /// table and any previous result.
    pub fn replace_data(&mut self, table: NormalizedTable) {
        self.store.upsert_relation(&table.frame);
        self.table = Some(table);
        self.last_result = None;
        self.state = QuestionState::Idle;
    }

    pub fn table(&self) -> Option<&NormalizedTable> {
        self.table.as_ref()
    }

    pub fn state(&self) -> QuestionState {
        self.state
    }

    /// Rows of the last non-empty result, for export.
    pub fn last_result(&self) -> Option<&DataFrame> {
        self.last_result.as_ref()
    }

    /// Fresh schema descriptor of the loaded table.
    pub fn schema(&self) -> Option<SchemaDescriptor> {
        self.table
            .as_ref()
            .map(|table| describe_table(&table.frame, self.store.relation()))
    }

    pub fn overview(&self) -> Option<DatasetOverview> {
        self.table.as_ref().map(DatasetOverview::from_table)
    }

    /// Runs SQL directly against the loaded table, bypassing translation.
    pub fn run_sql(&mut self, sql: &str) -> Result<QueryOutcome, ExecutionError> {
        let outcome = self.store.execute(sql)?;
        self.last_result = outcome.frame().cloned();
        Ok(outcome)
    }

    /// Answers one question: describe → translate → execute.
    pub fn ask(
        &mut self,
        translator: &dyn SqlTranslator,
        question: &str,
    ) -> Result<Answer, AskError> {
        let span = info_span!("question", question_len = question.len());
        let _guard = span.enter();

        self.transition(QuestionState::Idle);
        let schema = self.schema().ok_or(AskError::NoData)?;

        self.transition(QuestionState::Translating);
        let sql = match translator.translate(question, &schema) {
            Ok(sql) => sql,
            Err(err) => {
                warn!(error = %err, "translation failed");
                self.transition(QuestionState::TranslationFailed);
                return Err(err.into());
            }
        };

        self.transition(QuestionState::Executing);
        match self.run_sql(&sql) {
            Ok(outcome) => {
                self.transition(match outcome {
                    QueryOutcome::Found(_) => QuestionState::ResultsFound,
                    QueryOutcome::Empty => QuestionState::ResultsEmpty,
                });
                Ok(Answer { sql, outcome })
            }
            Err(source) => {
                warn!(error = %source, "generated SQL failed to execute");
                self.transition(QuestionState::ExecutionFailed);
                Err(AskError::Execution { sql, source })
            }
        }
    }

    fn transition(&mut self, next: QuestionState) {
        debug!(from = self.state.as_str(), to = next.as_str(), "question state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use lead_normalization::normalize_table;
    use polars::prelude::*;

    use super::*;
    use crate::error::TranslationError;

    struct FixedSql(&'static str);

    impl SqlTranslator for FixedSql {
        fn translate(&self, _: &str, _: &SchemaDescriptor) -> Result<String, TranslationError> {
            Ok(self.0.to_string())
        }
    }

    fn session() -> LeadSession {
        let df = DataFrame::new(vec![
            Series::new("Company".into(), ["Acme", "Beta"]).into(),
            Series::new("Revenue Size".into(), ["$2.5 million", "$500k"]).into(),
        ])
        .unwrap();
        LeadSession::with_table(normalize_table(df).unwrap())
    }

    #[test]
    fn test_ask_without_data() {
        let mut session = LeadSession::new();
        let result = session.ask(&FixedSql("SELECT * FROM leads"), "anything");
        assert!(matches!(result, Err(AskError::NoData)));
    }

    #[test]
    fn test_states_follow_outcome() {
        let mut session = session();

        session
            .ask(&FixedSql("SELECT * FROM leads"), "all leads")
            .unwrap();
        assert_eq!(session.state(), QuestionState::ResultsFound);
        assert_eq!(session.last_result().map(DataFrame::height), Some(2));

        session
            .ask(&FixedSql(r#"SELECT * FROM leads WHERE "Revenue Size" < 0"#), "none")
            .unwrap();
        assert_eq!(session.state(), QuestionState::ResultsEmpty);

        let err = session
            .ask(&FixedSql("SELECT nope FROM leads"), "broken")
            .unwrap_err();
        assert!(matches!(err, AskError::Execution { .. }));
        assert_eq!(session.state(), QuestionState::ExecutionFailed);
    }
}
