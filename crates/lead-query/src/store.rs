//! In-process SQL over the registered lead table.

use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use lead_model::LEADS_RELATION;
use polars::prelude::*;
use polars::sql::SQLContext;
use regex::{NoExpand, Regex};
use tracing::{debug, info};

use crate::error::ExecutionError;

/// Result of running one statement.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// At least one row matched.
    Found(DataFrame),
    /// The statement ran and matched nothing.
    Empty,
}

impl QueryOutcome {
    fn from_frame(frame: DataFrame) -> Self {
        if frame.height() == 0 {
            Self::Empty
        } else {
            Self::Found(frame)
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Found(frame) => frame.height(),
            Self::Empty => 0,
        }
    }

    pub fn frame(&self) -> Option<&DataFrame> {
        match self {
            Self::Found(frame) => Some(frame),
            Self::Empty => None,
        }
    }

    /// One-line summary shown with the results.
    pub fn summary(&self) -> String {
        match self {
            Self::Found(frame) => format!("Found {} matching leads.", group_thousands(frame.height())),
            Self::Empty => "No leads found matching your criteria.".to_string(),
        }
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

static CURRENT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcurrent_date\b(?:\s*\(\s*\))?").expect("Invalid current date regex")
});

static CURRENT_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:current_timestamp\b(?:\s*\(\s*\))?|now\s*\(\s*\))")
        .expect("Invalid current timestamp regex")
});

/// Replaces clock functions with literals for `now`.
///
/// Text inside single-quoted literals and double-quoted identifiers is left
/// untouched.
pub fn bind_current_time(sql: &str, now: NaiveDateTime) -> String {
    let date = format!("DATE '{}'", now.format("%Y-%m-%d"));
    let timestamp = format!("TIMESTAMP '{}'", now.format("%Y-%m-%d %H:%M:%S"));
    let bind = |code: &str| {
        let code = CURRENT_DATE.replace_all(code, NoExpand(&date));
        CURRENT_TIMESTAMP
            .replace_all(&code, NoExpand(&timestamp))
            .into_owned()
    };

    let mut bound = String::with_capacity(sql.len() + 16);
    let mut rest = sql;
    while let Some(start) = rest.find(['\'', '"']) {
        let (code, quoted) = rest.split_at(start);
        bound.push_str(&bind(code));
        let quote = &quoted[..1];
        let end = quoted[1..].find(quote).map_or(quoted.len(), |idx| idx + 2);
        bound.push_str(&quoted[..end]);
        rest = &quoted[end..];
    }
    bound.push_str(&bind(rest));
    bound
}

/// A session-owned SQL context holding at most one lead relation.
///
/// Each store has its own [`SQLContext`], so relation names never leak
/// between sessions.
pub struct LeadStore {
    context: SQLContext,
    relation: String,
    registered: bool,
}

impl Default for LeadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadStore {
    /// Creates an empty store using the `leads` relation name.
    pub fn new() -> Self {
        Self {
            context: SQLContext::new(),
            relation: LEADS_RELATION.to_string(),
            registered: false,
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Registers `frame` under the store's relation, replacing any previous
    /// registration. Registering the same frame twice is harmless.
    pub fn upsert_relation(&mut self, frame: &DataFrame) {
        if self.registered {
            self.context.unregister(&self.relation);
            debug!(relation = %self.relation, "dropped previous registration");
        }
        self.context.register(&self.relation, frame.clone().lazy());
        self.registered = true;
        info!(
            relation = %self.relation,
            rows = frame.height(),
            columns = frame.width(),
            "registered lead table"
        );
    }

    /// Runs one SQL statement and collects its result.
    ///
    /// `CURRENT_DATE`, `CURRENT_TIMESTAMP` and `NOW()` are bound to the local
    /// clock first; the engine has no such functions.
    pub fn execute(&mut self, sql: &str) -> Result<QueryOutcome, ExecutionError> {
        if !self.registered {
            return Err(ExecutionError::NoData);
        }
        let sql = bind_current_time(sql, Local::now().naive_local());
        let frame = self.context.execute(&sql)?.collect()?;
        debug!(rows = frame.height(), columns = frame.width(), "query executed");
        Ok(QueryOutcome::from_frame(frame))
    }
}
