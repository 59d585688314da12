use colored::Colorize;
use tracing::info;

use crate::cli;
use crate::entity::report::Report;
use crate::errors::PartError;
use crate::linux;
use crate::manifest::apply::{
    apply_disks,
    ApplyOpts,
};
use crate::manifest::{
    validation,
    Manifest,
};
use crate::runner::{
    DryRunner,
    ShellRunner,
};
use crate::utils::shell::in_path;

pub(super) fn run(
    manifest_file: &str,
    tool: &str,
    dry_run: bool,
    args: cli::ArgsApply,
) -> Result<Report, PartError> {
    let start = std::time::Instant::now();

    let manifest = Manifest::from_file(manifest_file)?;

    if !args.no_validate {
        validation::validate(&manifest, !dry_run)?;
    }

    let opts = ApplyOpts {
        tool: tool.to_string(),
        dry_run,
    };

    let actions = if dry_run {
        apply_disks(&manifest.disks, &DryRunner, &opts)?
    } else {
        if !in_path(tool) {
            return Err(PartError::CmdFailed {
                error: None,
                context: format!("no such program: {tool}"),
                output: String::new(),
            });
        }

        if !linux::is_root() {
            eprintln!("{}", "WARN: running as non-root user".yellow())
        }

        apply_disks(&manifest.disks, &ShellRunner, &opts)?
    };

    info!(disks = manifest.disks.len(), "manifest applied");

    Ok(Report {
        actions,
        dry_run,
        duration: start.elapsed(),
    })
}
