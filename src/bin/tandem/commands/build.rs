//! `tandem` build command

use anyhow::Result;

use crate::cli::Cli;
use tandem::ops::{build, BuildOptions};
use tandem::util::shell::{Shell, Status};
use tandem::util::SystemExecutor;
use tandem::Workspace;

/// Build the workspace. Returns whether every backend succeeded.
pub fn execute(ws: &Workspace, cli: &Cli, shell: &Shell) -> Result<bool> {
    let opts = BuildOptions {
        mode: cli.config,
        all_configs: cli.all_configs,
    };

    let mut exec = SystemExecutor::new();
    let report = build(ws, &opts, &mut exec, shell)?;

    for failure in report.failures() {
        shell.status(
            Status::Error,
            format!("{} build failed ({})", failure.backend, failure.mode),
        );
    }

    Ok(report.success())
}
