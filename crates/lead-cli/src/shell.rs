//! Interactive shell line parsing.

use std::path::PathBuf;

/// One line typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// A plain-English question.
    Ask(String),
    /// `:load <file>` replaces the loaded data.
    Load(PathBuf),
    /// `:export [path]` writes the last result.
    Export(Option<PathBuf>),
    Schema,
    Overview,
    /// `:sql <statement>` bypasses translation.
    Sql(String),
    Help,
    Quit,
    /// Blank line.
    Empty,
    /// A `:command` that is not recognised, or one missing its argument.
    Invalid(String),
}

pub const SHELL_HELP: &str = "\
Type a question and press Enter, or one of:
  :load <file>      load a different lead file
  :export [path]    save the last result as CSV
  :schema           show the columns the translator sees
  :overview         show dataset metrics and a preview
  :sql <statement>  run SQL directly against `leads`
  :help             show this help
  :quit             leave the shell";

pub fn parse_shell_line(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }
    let Some(command) = line.strip_prefix(':') else {
        return ShellCommand::Ask(line.to_string());
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match (name, argument) {
        ("q" | "quit" | "exit", _) => ShellCommand::Quit,
        ("help" | "h", _) => ShellCommand::Help,
        ("schema", _) => ShellCommand::Schema,
        ("overview", _) => ShellCommand::Overview,
        ("load", "") => ShellCommand::Invalid("usage: :load <file>".to_string()),
        ("load", path) => ShellCommand::Load(PathBuf::from(path)),
        ("export", "") => ShellCommand::Export(None),
        ("export", path) => ShellCommand::Export(Some(PathBuf::from(path))),
        ("sql", "") => ShellCommand::Invalid("usage: :sql <statement>".to_string()),
        ("sql", sql) => ShellCommand::Sql(sql.to_string()),
        (other, _) => ShellCommand::Invalid(format!("unknown command :{other} (try :help)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_and_blank_lines() {
        assert_eq!(parse_shell_line("   "), ShellCommand::Empty);
        assert_eq!(
            parse_shell_line("  leads in retail \n"),
            ShellCommand::Ask("leads in retail".to_string())
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_shell_line(":quit"), ShellCommand::Quit);
        assert_eq!(parse_shell_line(":q"), ShellCommand::Quit);
        assert_eq!(parse_shell_line(":schema"), ShellCommand::Schema);
        assert_eq!(parse_shell_line(":overview"), ShellCommand::Overview);
        assert_eq!(
            parse_shell_line(":load  other leads.xlsx"),
            ShellCommand::Load(PathBuf::from("other leads.xlsx"))
        );
        assert_eq!(parse_shell_line(":export"), ShellCommand::Export(None));
        assert_eq!(
            parse_shell_line(":export out.csv"),
            ShellCommand::Export(Some(PathBuf::from("out.csv")))
        );
        assert_eq!(
            parse_shell_line(":sql SELECT * FROM leads"),
            ShellCommand::Sql("SELECT * FROM leads".to_string())
        );
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse_shell_line(":load"), ShellCommand::Invalid(_)));
        assert!(matches!(parse_shell_line(":sql   "), ShellCommand::Invalid(_)));
        assert!(matches!(parse_shell_line(":frobnicate"), ShellCommand::Invalid(_)));
    }
}
