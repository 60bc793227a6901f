//! Toolchain preparation.
//!
//! Runs once per build invocation, before any build command, in this order:
//!
//! 1. Report backends whose section is absent.
//! 2. Prime the compiler environment (MSVC-family compilers only).
//! 3. Check that every required tool resolves on PATH.
//! 4. Check that the Conan profile exists.
//! 5. Pick the Cargo target triple on Windows.
//! 6. Suggest installing a debugger if none is found.
//!
//! Any failure in steps 2 to 4 is fatal. Everything else only warns.

pub mod msvc;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::cargo::{
    installed_targets_command, is_target_installed, wants_gnu_target, WINDOWS_GNU_TARGET,
};
use crate::builder::cmake::generator_mismatch;
use crate::core::errors::ConfigError;
use crate::core::workspace::Workspace;
use crate::util::process::Executor;
use crate::util::shell::{Shell, Status};

/// Facts established while preparing the toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedToolchain {
    /// Whether the MSVC environment was imported
    pub msvc_primed: bool,
    /// Explicit `--target` for `cargo build`
    pub cargo_target: Option<String>,
}

/// Resolve `tool` on PATH.
///
/// A missing required tool is fatal. A missing optional tool yields `None`.
pub fn check_presence(
    exec: &dyn Executor,
    tool: &str,
    required: bool,
) -> Result<Option<PathBuf>, ConfigError> {
    match exec.find_executable(tool) {
        Some(path) => {
            tracing::debug!("found {} at {}", tool, path.display());
            Ok(Some(path))
        }
        None if required => Err(ConfigError::MissingTool {
            tool: tool.to_string(),
        }),
        None => Ok(None),
    }
}

/// Prepare everything the build commands rely on.
pub fn prepare(ws: &Workspace, exec: &mut dyn Executor, shell: &Shell) -> Result<PreparedToolchain> {
    let platform = ws.platform();
    let mut prepared = PreparedToolchain::default();

    for kind in ws.missing_backends() {
        shell.status(
            Status::Skipped,
            format!(
                "{}, because it was missing in {}",
                kind,
                ws.config_path().display()
            ),
        );
    }

    if let Some(native) = ws.native() {
        let compiler = ws.compiler();

        if compiler.is_msvc_family() {
            if !platform.is_windows() {
                return Err(ConfigError::WindowsOnlyCompiler {
                    compiler: compiler.to_string(),
                }
                .into());
            }
            prepared.msvc_primed = msvc::prime(exec);
        }

        if let Some(warning) = generator_mismatch(platform, compiler, ws.use_ninja()) {
            shell.diagnostic(&warning);
        }

        check_presence(exec, "cmake", true)?;
        if native.uses_conan() {
            check_presence(exec, "conan", true)?;
        }
        if ws.use_ninja() {
            check_presence(exec, "ninja", true)?;
        }
        check_presence(exec, compiler.c_compiler(), true)?;
        if compiler.cxx_compiler() != compiler.c_compiler() {
            check_presence(exec, compiler.cxx_compiler(), true)?;
        }

        if native.uses_conan() {
            let profile = ws.profile_path();
            if !profile.is_file() {
                return Err(ConfigError::MissingProfile { path: profile }.into());
            }
            tracing::debug!("using conan profile {}", profile.display());
        }
    }

    if let Some(cargo) = ws.cargo() {
        check_presence(exec, "cargo", true)?;

        if ws.native().is_some() && wants_gnu_target(platform, ws.compiler(), ws.use_ninja()) {
            prepared.cargo_target = pick_gnu_target(exec, shell, cargo.root());
        }
    }

    if check_presence(exec, "lldb", false)?.is_none() {
        shell.note(format!(
            "lldb not found, consider installing it:\n{}",
            platform.debugger_hint()
        ));
    }

    Ok(prepared)
}

/// The GNU target if rustup reports it installed, otherwise `None` with a warning.
fn pick_gnu_target(exec: &mut dyn Executor, shell: &Shell, manifest_dir: &Path) -> Option<String> {
    if exec.find_executable("rustup").is_none() {
        shell.warn(format!(
            "rustup not found, can not check for {}; using the default target",
            WINDOWS_GNU_TARGET
        ));
        return None;
    }

    let listing = match exec.output(&installed_targets_command(manifest_dir)) {
        Ok(out) if out.success() => out.stdout,
        Ok(out) => {
            tracing::debug!("rustup target list failed: {}", out.stderr.trim());
            String::new()
        }
        Err(e) => {
            tracing::debug!("Failed to run rustup: {:#}", e);
            String::new()
        }
    };

    if is_target_installed(&listing, WINDOWS_GNU_TARGET) {
        return Some(WINDOWS_GNU_TARGET.to_string());
    }

    shell.warn(format!(
        "{} is not installed, using default target, possible ABI incompatibility",
        WINDOWS_GNU_TARGET
    ));
    shell.note(format!(
        "To enable {} run `rustup target add {}` from {}",
        WINDOWS_GNU_TARGET,
        WINDOWS_GNU_TARGET,
        manifest_dir.display()
    ));
    None
}
