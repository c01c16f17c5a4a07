use std::process::ExitCode;

use hostkeep_sdk::{
    HostFields, HostsError, HostsService, Record, RecordPatch, SdkResult, ServiceConfig,
};
use tracing::debug;

use crate::cli::*;
use crate::output::Output;
use crate::shell;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let out = Output::new(cli.format);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => return Ok(report(&out, Err(err))),
    };
    debug!(hosts = %config.hosts_path.display(), backups = %config.backup_dir.display(), "config resolved");

    let mut service = HostsService::from_config(&config);
    if let Err(err) = service.initialize() {
        return Ok(report(&out, Err(err)));
    }

    let result = match cli.command {
        Command::List => cmd_list(&service, &out),
        Command::Add(args) => cmd_add(&mut service, &out, args),
        Command::Update(args) => cmd_update(&mut service, &out, args),
        Command::Delete(args) => cmd_delete(&mut service, &out, args),
        Command::Backup(args) => cmd_backup(&mut service, &out, args.action),
        Command::Raw => cmd_raw(&service, &out),
        Command::Shell => return shell::run(&mut service, &out),
    };
    Ok(report(&out, result))
}

/// Config file plus command-line overrides.
fn load_config(cli: &Cli) -> SdkResult<ServiceConfig> {
    let mut config = match cli.config.clone().or_else(ServiceConfig::default_path) {
        Some(path) => ServiceConfig::load(&path)?,
        None => ServiceConfig::default(),
    };
    if let Some(path) = &cli.hosts_file {
        config.hosts_path = path.clone();
    }
    if let Some(dir) = &cli.backup_dir {
        config.backup_dir = dir.clone();
    }
    Ok(config)
}

pub(crate) fn report(out: &Output, result: SdkResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            out.error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Look up records by the ids shown in `list`.
fn resolve(service: &HostsService, ids: &[String]) -> SdkResult<Vec<Record>> {
    let records = service.get_hosts()?;
    ids.iter()
        .map(|id| {
            records
                .iter()
                .find(|r| r.id.as_str() == id)
                .cloned()
                .ok_or_else(|| HostsError::NotFound(format!("record {id}")))
        })
        .collect()
}

pub(crate) fn cmd_list(service: &HostsService, out: &Output) -> SdkResult<()> {
    out.records(&service.get_hosts()?);
    Ok(())
}

pub(crate) fn cmd_add(service: &mut HostsService, out: &Output, args: AddArgs) -> SdkResult<()> {
    let mut fields = HostFields::new(args.ip, args.domain);
    fields.comment = args.comment;
    let id = service.add_host(fields)?;
    out.done("Added", Some(id.as_str()));
    Ok(())
}

pub(crate) fn cmd_update(service: &mut HostsService, out: &Output, args: UpdateArgs) -> SdkResult<()> {
    let old = resolve(service, std::slice::from_ref(&args.id))?.remove(0);
    let patch = RecordPatch {
        ip: args.ip,
        domain: args.domain,
        comment: args.comment,
    };
    let id = service.update_host(&old, patch)?;
    out.done("Updated", Some(id.as_str()));
    Ok(())
}

pub(crate) fn cmd_delete(service: &mut HostsService, out: &Output, args: DeleteArgs) -> SdkResult<()> {
    let records = resolve(service, &args.ids)?;
    if let [record] = records.as_slice() {
        service.delete_host(record)?;
    } else {
        service.delete_hosts(&records)?;
    }
    out.done(&format!("Deleted {} record(s)", records.len()), None);
    Ok(())
}

pub(crate) fn cmd_backup(service: &mut HostsService, out: &Output, action: BackupAction) -> SdkResult<()> {
    match action {
        BackupAction::Create => {
            let path = service.create_backup()?;
            out.done("Backup created", Some(&path.display().to_string()));
        }
        BackupAction::List => out.backups(&service.get_backups()?),
        BackupAction::Restore { path } => {
            service.restore_backup(&path)?;
            out.done("Backup restored; history cleared", Some(&path.display().to_string()));
        }
        BackupAction::Diff { path } => out.diff(&service.diff_backup(&path)?),
        BackupAction::Prune { keep } => {
            let removed = service.prune_backups(keep)?;
            out.done(&format!("Pruned {} backup(s)", removed.len()), None);
        }
    }
    Ok(())
}

pub(crate) fn cmd_raw(service: &HostsService, out: &Output) -> SdkResult<()> {
    out.raw(&service.raw_content()?);
    Ok(())
}
