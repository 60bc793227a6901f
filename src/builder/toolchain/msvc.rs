//! MSVC environment priming.
//!
//! `cl` and `clang-cl` need the include, library and tool paths that only
//! `vcvars64.bat` knows how to compute. The script is located through
//! `vswhere.exe`, run under `cmd.exe`, and every variable it prints is merged
//! into the environment inherited by later commands. If any piece is missing
//! the current environment is assumed to be a developer shell already.

use std::path::PathBuf;

use crate::util::process::{Executor, ProcessBuilder};

/// Locate `vswhere.exe` in its standard install location or on PATH.
pub fn find_vswhere(exec: &dyn Executor) -> Option<PathBuf> {
    let program_files_x86 = std::env::var("ProgramFiles(x86)")
        .unwrap_or_else(|_| "C:\\Program Files (x86)".to_string());

    let standard_path = PathBuf::from(&program_files_x86)
        .join("Microsoft Visual Studio")
        .join("Installer")
        .join("vswhere.exe");

    if standard_path.is_file() {
        return Some(standard_path);
    }

    exec.find_executable("vswhere")
}

/// Import the `vcvars64.bat` environment. Returns whether anything was imported.
pub fn prime(exec: &mut dyn Executor) -> bool {
    let Some(vswhere) = find_vswhere(exec) else {
        tracing::debug!("vswhere.exe not found, assuming a developer shell");
        return false;
    };
    tracing::debug!("Found vswhere at: {}", vswhere.display());

    let query = ProcessBuilder::new(&vswhere).args(["-latest", "-property", "installationPath"]);
    let vs_path = match exec.output(&query) {
        Ok(out) if out.success() => out.stdout.trim().to_string(),
        Ok(out) => {
            tracing::debug!("vswhere failed: {}", out.stderr.trim());
            return false;
        }
        Err(e) => {
            tracing::debug!("Failed to run vswhere: {:#}", e);
            return false;
        }
    };
    if vs_path.is_empty() {
        tracing::debug!("vswhere returned empty path");
        return false;
    }

    let activator = PathBuf::from(vs_path)
        .join("VC")
        .join("Auxiliary")
        .join("Build")
        .join("vcvars64.bat");
    if !activator.is_file() {
        tracing::debug!("vcvars64.bat not found at: {}", activator.display());
        return false;
    }

    tracing::info!("Importing MSVC environment from {}", activator.display());

    let dump = ProcessBuilder::new("cmd.exe")
        .arg("/c")
        .arg(&activator)
        .args(["&&", "set"]);
    let env_output = match exec.output(&dump) {
        Ok(out) if out.success() => out.stdout,
        Ok(out) => {
            tracing::warn!("vcvars64.bat failed: {}", out.stderr.trim());
            return false;
        }
        Err(e) => {
            tracing::warn!("Failed to run vcvars64.bat: {:#}", e);
            return false;
        }
    };

    let vars = parse_env_dump(&env_output);
    tracing::debug!("imported {} environment variables", vars.len());
    exec.import_env(&vars);
    !vars.is_empty()
}

/// Parse the `KEY=VALUE` lines printed by `set`.
///
/// Lines without `=` (the script's banner) are skipped, as are cmd's hidden
/// per-drive variables whose names start with `=`.
pub fn parse_env_dump(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.trim().to_string()))
        .collect()
}
