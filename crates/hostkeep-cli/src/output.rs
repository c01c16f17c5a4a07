use colored::Colorize;
use hostkeep_sdk::{BackupDiff, BackupMeta, DiffLine, HostsError, Record};
use serde_json::json;

use crate::cli::OutputFormat;

/// Renders results as colored text or JSON on stdout; errors go to stderr
/// in text mode and stdout in JSON mode.
#[derive(Clone, Copy, Debug)]
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn records(&self, records: &[Record]) {
        if self.format == OutputFormat::Json {
            println!("{}", json!(records));
            return;
        }
        if records.is_empty() {
            println!("No entries.");
            return;
        }
        for r in records {
            if r.is_comment {
                println!("{:>4}  {}  {}", r.line_number, r.id.to_string().dimmed(), r.comment.dimmed());
            } else {
                let comment = if r.has_comment() {
                    format!("  {}", r.comment.dimmed())
                } else {
                    String::new()
                };
                println!(
                    "{:>4}  {}  {} {}{}",
                    r.line_number,
                    r.id.to_string().dimmed(),
                    r.ip.cyan(),
                    r.domain.bold(),
                    comment
                );
            }
        }
    }

    /// A completed mutation, optionally naming the record it produced.
    pub fn done(&self, message: &str, id: Option<&str>) {
        match self.format {
            OutputFormat::Json => println!("{}", json!({ "success": true, "message": message, "id": id })),
            OutputFormat::Text => match id {
                Some(id) => println!("{} {} ({})", "✓".green().bold(), message, id.yellow()),
                None => println!("{} {}", "✓".green().bold(), message),
            },
        }
    }

    pub fn history(&self, undo: usize, redo: usize) {
        match self.format {
            OutputFormat::Json => println!("{}", json!({ "undo": undo, "redo": redo })),
            OutputFormat::Text => println!("undo: {}  redo: {}", undo.to_string().bold(), redo.to_string().bold()),
        }
    }

    pub fn backups(&self, backups: &[BackupMeta]) {
        if self.format == OutputFormat::Json {
            println!("{}", json!(backups));
            return;
        }
        if backups.is_empty() {
            println!("No backups.");
            return;
        }
        for b in backups {
            println!(
                "{}  {:>8} B  {}",
                b.created.format("%Y-%m-%d %H:%M:%S").to_string().yellow(),
                b.size,
                b.path.display()
            );
        }
    }

    pub fn diff(&self, diff: &BackupDiff) {
        if self.format == OutputFormat::Json {
            println!(
                "{}",
                json!({
                    "additions": diff.additions(),
                    "deletions": diff.deletions(),
                    "patch": diff.to_string(),
                })
            );
            return;
        }
        if diff.is_empty() {
            println!("Backup matches the hosts file.");
            return;
        }
        for hunk in &diff.hunks {
            println!("{}", format!("@@ -{} +{} @@", hunk.old_start, hunk.new_start).cyan());
            for line in &hunk.lines {
                match line {
                    DiffLine::Context(text) => println!(" {text}"),
                    DiffLine::Added(text) => println!("{}", format!("+{text}").green()),
                    DiffLine::Removed(text) => println!("{}", format!("-{text}").red()),
                }
            }
        }
    }

    pub fn raw(&self, text: &str) {
        match self.format {
            OutputFormat::Json => println!("{}", json!({ "content": text })),
            OutputFormat::Text => print!("{text}"),
        }
    }

    pub fn error(&self, err: &HostsError) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", json!({ "error": err.kind(), "details": err.details() }))
            }
            OutputFormat::Text => {
                eprintln!("{} {}: {}", "error:".red().bold(), err.kind(), err.details())
            }
        }
    }
}
