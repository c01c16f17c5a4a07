use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hostkeep",
    about = "hostkeep -- hosts file manager with undo/redo and backups",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Hosts file to manage, overriding the config
    #[arg(long, global = true)]
    pub hosts_file: Option<PathBuf>,

    /// Backup directory, overriding the config
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every record in the hosts file
    List,
    /// Append a host entry
    Add(AddArgs),
    /// Change the ip, domain or comment of a record
    Update(UpdateArgs),
    /// Remove one or more records
    Delete(DeleteArgs),
    /// Create, list, restore, preview or prune backups
    Backup(BackupArgs),
    /// Print the hosts file verbatim
    Raw,
    /// Interactive session with undo and redo
    Shell,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub ip: String,
    pub domain: String,
    #[arg(short, long)]
    pub comment: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Record id as shown by `list`
    pub id: String,
    #[arg(long)]
    pub ip: Option<String>,
    #[arg(long)]
    pub domain: Option<String>,
    #[arg(short, long)]
    pub comment: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Args, Debug)]
pub struct BackupArgs {
    #[command(subcommand)]
    pub action: BackupAction,
}

#[derive(Subcommand, Debug)]
pub enum BackupAction {
    /// Snapshot the hosts file
    Create,
    /// List backups, newest first
    List,
    /// Overwrite the hosts file with a backup
    Restore { path: PathBuf },
    /// Show what restoring a backup would change
    Diff { path: PathBuf },
    /// Keep only the newest backups
    Prune {
        #[arg(long)]
        keep: usize,
    },
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(name = "hostkeep-shell", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List every record
    List,
    /// Append a host entry
    Add(AddArgs),
    /// Change a record
    Update(UpdateArgs),
    /// Remove records
    Delete(DeleteArgs),
    /// Reverse the last change
    Undo,
    /// Re-apply the last undone change
    Redo,
    /// Show undo and redo depth
    Status,
    /// Backup operations
    Backup(BackupArgs),
    /// Print the hosts file verbatim
    Raw,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}
