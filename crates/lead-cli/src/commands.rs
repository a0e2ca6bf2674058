//! Subcommand implementations.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use lead_ingest::read_upload;
use lead_model::EXPORT_FILE_NAME;
use lead_normalization::{NormalizedTable, normalize_table};
use lead_query::{
    ChatCompletionTranslator, LeadSession, QueryOutcome, SqlTranslator, export_results,
    render_system_prompt,
};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::cli::{AskArgs, FileArgs, ResultArgs, SchemaArgs, SqlArgs};
use crate::config::{api_key, load_translator_config};
use crate::logging::redact_value;
use crate::render::{print_outcome, print_overview, print_schema, spinner};
use crate::shell::{SHELL_HELP, ShellCommand, parse_shell_line};

/// Reads and normalizes a lead file.
pub fn load_table(path: &Path) -> Result<NormalizedTable> {
    let span = info_span!("ingest", file = %path.display());
    let _guard = span.enter();

    let decoded = read_upload(path).with_context(|| format!("load {}", path.display()))?;
    if let Some(encoding) = decoded.encoding {
        debug!(encoding = %encoding, "decoded delimited text");
    }
    normalize_table(decoded.frame).with_context(|| format!("normalize {}", path.display()))
}

fn load_session(args: &FileArgs) -> Result<LeadSession> {
    Ok(LeadSession::with_table(load_table(&args.file)?))
}

/// Builds the remote translator, failing early when the API key is missing.
pub fn build_translator(config_path: Option<&Path>) -> Result<ChatCompletionTranslator> {
    let config = load_translator_config(config_path)?;
    let key = api_key(&config)?;
    let translator =
        ChatCompletionTranslator::new(config, key).context("create translation client")?;
    debug!(
        endpoint = %translator.config().endpoint,
        model = %translator.config().model,
        timeout_secs = translator.config().timeout_secs,
        "translation client ready"
    );
    Ok(translator)
}

pub fn run_overview(args: &FileArgs) -> Result<()> {
    let session = load_session(args)?;
    let overview = session
        .overview()
        .ok_or_else(|| anyhow!("no lead table is loaded"))?;
    print_overview(&overview);
    Ok(())
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let session = load_session(&args.input)?;
    let schema = session
        .schema()
        .ok_or_else(|| anyhow!("no lead table is loaded"))?;
    if args.prompt {
        println!("{}", render_system_prompt(&schema));
    } else {
        print_schema(&schema);
    }
    Ok(())
}

pub fn run_ask(args: &AskArgs, config_path: Option<&Path>) -> Result<()> {
    let translator = build_translator(config_path)?;
    let mut session = load_session(&args.input)?;
    ask_and_print(&mut session, &translator, &args.question, args.show_sql, &args.results)
}

pub fn run_sql(args: &SqlArgs) -> Result<()> {
    let mut session = load_session(&args.input)?;
    let outcome = session.run_sql(&args.sql).context("run SQL")?;
    finish_outcome(&outcome, &args.results)
}

fn ask_and_print(
    session: &mut LeadSession,
    translator: &dyn SqlTranslator,
    question: &str,
    show_sql: bool,
    results: &ResultArgs,
) -> Result<()> {
    info!(question = redact_value(question), "asking question");
    let progress = spinner("Processing your query...");
    let answer = session.ask(translator, question);
    progress.finish_and_clear();

    match answer {
        Ok(answer) => {
            if show_sql {
                println!("SQL: {}", answer.sql);
            }
            finish_outcome(&answer.outcome, results)
        }
        Err(err) => {
            if show_sql && let Some(sql) = err.sql() {
                println!("SQL: {sql}");
            }
            let message = err.user_message().to_string();
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

fn finish_outcome(outcome: &QueryOutcome, results: &ResultArgs) -> Result<()> {
    print_outcome(outcome, results.max_rows);
    if let Some(target) = &results.export {
        match outcome.frame() {
            Some(frame) => export_to(frame, target.as_deref())?,
            None => println!("Nothing to export."),
        }
    }
    Ok(())
}

fn export_to(frame: &DataFrame, path: Option<&Path>) -> Result<()> {
    let path = path.map_or_else(|| PathBuf::from(EXPORT_FILE_NAME), Path::to_path_buf);
    export_results(frame, &path).with_context(|| format!("export to {}", path.display()))?;
    println!("Saved {} rows to {}", frame.height(), path.display());
    Ok(())
}

/// Runs the interactive shell on stdin.
pub fn run_shell(args: &FileArgs, config_path: Option<&Path>, max_rows: usize) -> Result<()> {
    let translator = match build_translator(config_path) {
        Ok(translator) => Some(translator),
        Err(err) => {
            eprintln!("warning: questions are disabled: {err:#}");
            eprintln!("         :sql, :schema and :overview still work");
            None
        }
    };
    let mut session = load_session(args)?;
    println!(
        "Loaded {} ({} leads). Type :help for commands.",
        args.file.display(),
        session.table().map_or(0, |table| table.frame.height())
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("leads> ");
        io::stdout().flush().context("flush prompt")?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("read input")?;

        let results = ResultArgs {
            export: None,
            max_rows,
        };
        let outcome = match parse_shell_line(&line) {
            ShellCommand::Empty => Ok(()),
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{SHELL_HELP}");
                Ok(())
            }
            ShellCommand::Invalid(message) => {
                eprintln!("{message}");
                Ok(())
            }
            ShellCommand::Ask(question) => match &translator {
                Some(translator) => {
                    ask_and_print(&mut session, translator, &question, true, &results)
                }
                None => Err(anyhow!("questions are disabled: no API key configured")),
            },
            ShellCommand::Sql(sql) => session
                .run_sql(&sql)
                .context("run SQL")
                .and_then(|outcome| finish_outcome(&outcome, &results)),
            ShellCommand::Load(path) => load_table(&path).map(|table| {
                let rows = table.frame.height();
                session.replace_data(table);
                println!("Loaded {} ({rows} leads).", path.display());
            }),
            ShellCommand::Export(path) => match session.last_result() {
                Some(frame) => export_to(frame, path.as_deref()),
                None => Err(anyhow!("no results to export yet")),
            },
            ShellCommand::Schema => {
                if let Some(schema) = session.schema() {
                    print_schema(&schema);
                }
                Ok(())
            }
            ShellCommand::Overview => {
                if let Some(overview) = session.overview() {
                    print_overview(&overview);
                }
                Ok(())
            }
        };
        if let Err(err) = outcome {
            warn!(error = %format!("{err:#}"), "shell command failed");
            eprintln!("error: {err:#}");
        }
    }
    Ok(())
}
