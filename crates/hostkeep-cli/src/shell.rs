//! Interactive session.
//!
//! History lives in the process, so undo and redo are only meaningful
//! across commands typed into one session.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use hostkeep_sdk::{HostsService, SdkResult};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use crate::cli::{ShellCommand, ShellLine};
use crate::commands::{cmd_add, cmd_backup, cmd_delete, cmd_list, cmd_raw, cmd_update, report};
use crate::output::Output;

const PROMPT: &str = "hostkeep> ";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

pub fn run(service: &mut HostsService, out: &Output) -> anyhow::Result<ExitCode> {
    let mut rl = DefaultEditor::new()?;
    println!("Type 'help' for commands, 'exit' to quit.");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                if execute_line(service, out, &line) == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and run one line. Failures are reported and the session goes on.
pub(crate) fn execute_line(service: &mut HostsService, out: &Output, line: &str) -> Flow {
    let words = match split_words(line) {
        Ok(words) => words,
        Err(reason) => {
            eprintln!("{} {reason}", "error:".red().bold());
            return Flow::Continue;
        }
    };
    let parsed = match ShellLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(err) => {
            // help and usage errors alike
            if let Err(io_err) = err.print() {
                warn!(error = %io_err, "could not print usage");
            }
            return Flow::Continue;
        }
    };

    let result: SdkResult<()> = match parsed.command {
        ShellCommand::List => cmd_list(service, out),
        ShellCommand::Add(args) => cmd_add(service, out, args),
        ShellCommand::Update(args) => cmd_update(service, out, args),
        ShellCommand::Delete(args) => cmd_delete(service, out, args),
        ShellCommand::Undo => service
            .undo()
            .map(|kind| out.done(&format!("Undid {kind}"), None)),
        ShellCommand::Redo => service
            .redo()
            .map(|kind| out.done(&format!("Redid {kind}"), None)),
        ShellCommand::Status => {
            out.history(service.undo_depth(), service.redo_depth());
            Ok(())
        }
        ShellCommand::Backup(args) => cmd_backup(service, out, args.action),
        ShellCommand::Raw => cmd_raw(service, out),
        ShellCommand::Exit => return Flow::Exit,
    };
    report(out, result);
    Flow::Continue
}

/// Split a line into words. Single or double quotes group words; there are
/// no escapes.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {q} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use hostkeep_sdk::ServiceConfig;
    use std::fs;

    const SAMPLE: &str = "127.0.0.1 localhost\n# comment\n10.0.0.1 a.com b.com\n";

    // -----------------------------------------------------------------------
    // Word splitting
    // -----------------------------------------------------------------------

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split_words("  add 1.2.3.4\tx.com ").unwrap(), vec!["add", "1.2.3.4", "x.com"]);
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            split_words(r#"add 1.2.3.4 x.com --comment "dev box""#).unwrap(),
            vec!["add", "1.2.3.4", "x.com", "--comment", "dev box"]
        );
        assert_eq!(split_words("a 'b c'd").unwrap(), vec!["a", "b cd"]);
        assert_eq!(split_words("x ''").unwrap(), vec!["x", ""]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(split_words("add \"oops").is_err());
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    #[test]
    fn help_and_usage_errors_keep_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = dir.path().join("hosts");
        fs::write(&hosts, SAMPLE).unwrap();
        let config = ServiceConfig {
            hosts_path: hosts.clone(),
            backup_dir: dir.path().join("backups"),
            ..ServiceConfig::default()
        };
        let mut service = HostsService::from_config(&config);
        let out = Output::new(OutputFormat::Json);

        for line in ["help", "add 1.2.3.4", "delete", "add 'open"] {
            assert_eq!(execute_line(&mut service, &out, line), Flow::Continue);
        }
        assert_eq!(fs::read_to_string(&hosts).unwrap(), SAMPLE);
        assert!(!service.can_undo());
    }

    #[test]
    fn undo_and_redo_within_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = dir.path().join("hosts");
        fs::write(&hosts, SAMPLE).unwrap();
        let config = ServiceConfig {
            hosts_path: hosts.clone(),
            backup_dir: dir.path().join("backups"),
            ..ServiceConfig::default()
        };
        let mut service = HostsService::from_config(&config);
        let out = Output::new(OutputFormat::Json);

        assert_eq!(execute_line(&mut service, &out, "add 1.2.3.4 x.com -c 'dev box'"), Flow::Continue);
        assert!(fs::read_to_string(&hosts).unwrap().ends_with("1.2.3.4 x.com # dev box\n"));

        execute_line(&mut service, &out, "undo");
        assert_eq!(fs::read_to_string(&hosts).unwrap(), SAMPLE);
        assert!(service.can_redo());

        execute_line(&mut service, &out, "redo");
        assert!(fs::read_to_string(&hosts).unwrap().contains("x.com"));

        execute_line(&mut service, &out, "bogus");
        execute_line(&mut service, &out, "undo");
        execute_line(&mut service, &out, "undo");
        assert_eq!(service.undo_depth(), 0);

        assert_eq!(execute_line(&mut service, &out, "exit"), Flow::Exit);
    }
}
