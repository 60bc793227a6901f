//! Implementation of `tandem` (build and repeat-last).
//!
//! Every requested mode runs the native generate and build steps followed by
//! the Cargo build. A failing step never stops its siblings: failures are
//! collected into the [`BuildReport`] and only the final exit code reflects
//! them. A mode whose every backend succeeded is recorded as the last
//! successful configuration.

use std::time::Instant;

use anyhow::Result;

use crate::builder::cargo::CargoCommands;
use crate::builder::cmake::CMakeCommands;
use crate::builder::executor::{CommandRunner, RetryPolicy};
use crate::builder::toolchain;
use crate::core::mode::BuildMode;
use crate::core::target::BackendKind;
use crate::core::workspace::Workspace;
use crate::ops::last_used::LastUsedConfig;
use crate::util::process::Executor;
use crate::util::shell::{format_duration, Shell, Status};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Build only this mode
    pub mode: Option<BuildMode>,

    /// Build every mode even if a last successful mode is recorded
    pub all_configs: bool,
}

/// Outcome of one backend in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendResult {
    pub backend: BackendKind,
    pub mode: BuildMode,
    pub succeeded: bool,
}

/// Everything a build invocation attempted.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub results: Vec<BackendResult>,

    /// The modes came from the last successful configuration
    pub repeated_last: bool,
}

impl BuildReport {
    /// True only if every attempted backend succeeded in every attempted mode.
    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.succeeded)
    }

    pub fn failures(&self) -> impl Iterator<Item = &BackendResult> {
        self.results.iter().filter(|r| !r.succeeded)
    }

    /// Attempted modes, in order.
    pub fn modes(&self) -> Vec<BuildMode> {
        let mut modes: Vec<BuildMode> = Vec::new();
        for result in &self.results {
            if !modes.contains(&result.mode) {
                modes.push(result.mode);
            }
        }
        modes
    }

    fn mode_succeeded(&self, mode: BuildMode) -> bool {
        self.results
            .iter()
            .filter(|r| r.mode == mode)
            .all(|r| r.succeeded)
    }
}

/// Decide which modes to build.
///
/// Returns the modes and whether they repeat the recorded configuration.
pub fn select_modes(opts: &BuildOptions, last_used: Option<BuildMode>) -> (Vec<BuildMode>, bool) {
    if let Some(mode) = opts.mode {
        return (vec![mode], false);
    }
    match last_used {
        Some(mode) if !opts.all_configs => (vec![mode], true),
        _ => (BuildMode::ALL.to_vec(), false),
    }
}

/// Build the workspace.
///
/// Fatal configuration problems are returned as errors before any build
/// command runs. Build failures are reported through the returned
/// [`BuildReport`].
pub fn build(
    ws: &Workspace,
    opts: &BuildOptions,
    exec: &mut dyn Executor,
    shell: &Shell,
) -> Result<BuildReport> {
    let prepared = toolchain::prepare(ws, exec, shell)?;

    let tracker = LastUsedConfig::new(ws.last_used_path());
    let last_used = if opts.mode.is_none() && !opts.all_configs {
        tracker.read()?
    } else {
        None
    };

    let (modes, repeated_last) = select_modes(opts, last_used);
    if repeated_last {
        shell.note(format!(
            "Repeating the last successful configuration: {}",
            modes[0]
        ));
    }

    let native = CMakeCommands::from_workspace(ws);
    let cargo =
        CargoCommands::from_workspace(ws).map(|c| c.target_triple(prepared.cargo_target.clone()));
    let runner = CommandRunner::new(shell, ws.platform());

    let mut report = BuildReport {
        results: Vec::new(),
        repeated_last,
    };

    for mode in modes {
        let start = Instant::now();

        if let Some(ref native) = native {
            let succeeded = build_native(&runner, exec, shell, native, mode);
            report.results.push(BackendResult {
                backend: BackendKind::Native,
                mode,
                succeeded,
            });
        }

        if let Some(ref cargo) = cargo {
            shell.status(Status::Building, format!("{} ({})", BackendKind::Cargo, mode));
            let succeeded = runner
                .run(exec, &cargo.build(mode), RetryPolicy::once())
                .succeeded();
            if !succeeded {
                shell.status(Status::Failed, format!("{} ({})", BackendKind::Cargo, mode));
            }
            report.results.push(BackendResult {
                backend: BackendKind::Cargo,
                mode,
                succeeded,
            });
        }

        if report.mode_succeeded(mode) {
            if let Err(e) = tracker.write(Some(mode)) {
                shell.warn(format!("could not record {} as last used: {:#}", mode, e));
            }
            shell.status(
                Status::Finished,
                format!("{} in {}", mode, format_duration(start.elapsed())),
            );
        } else {
            tracing::debug!("not recording {} as last used, a backend failed", mode);
        }
    }

    Ok(report)
}

/// Generate then build the native project. A failed generation skips the build.
fn build_native(
    runner: &CommandRunner<'_>,
    exec: &mut dyn Executor,
    shell: &Shell,
    commands: &CMakeCommands,
    mode: BuildMode,
) -> bool {
    let steps = commands.steps(mode);
    let label = format!("{} ({})", BackendKind::Native, mode);

    shell.status(Status::Generating, &label);
    if !runner.run(exec, &steps.generate, RetryPolicy::once()).succeeded() {
        shell.status(Status::Failed, format!("{}, generation failed", label));
        return false;
    }

    if let Some(ref configure) = steps.configure {
        shell.status(Status::Configuring, &label);
        if !runner.run(exec, configure, RetryPolicy::once()).succeeded() {
            shell.status(Status::Failed, format!("{}, configuration failed", label));
            return false;
        }
    }

    shell.status(Status::Building, &label);
    let outcome = runner.run(exec, &steps.build, steps.build_policy);
    if !outcome.succeeded() {
        shell.status(Status::Failed, &label);
    } else if outcome.attempts > 1 {
        tracing::info!("{} built after {} attempts", label, outcome.attempts);
    }
    outcome.succeeded()
}
