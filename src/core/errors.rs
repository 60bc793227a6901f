//! Fatal configuration errors.
//!
//! Every variant means the invocation cannot possibly succeed, so the caller
//! stops before any external command runs. Each one carries a concrete next
//! action through its `help` text.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error("could not find `project_config.toml` in `{}` or any parent directory", searched_from.display())]
    #[diagnostic(
        code(tandem::config::missing),
        help("Run `just setup` to generate project_config.toml")
    )]
    MissingConfigFile { searched_from: PathBuf },

    #[error("invalid configuration in `{}`: {message}", path.display())]
    #[diagnostic(
        code(tandem::config::invalid),
        help("Check the [cpp], [rust], [migration] and [test] sections of project_config.toml")
    )]
    InvalidConfig { path: PathBuf, message: String },

    #[error("no backend configured in `{}`", path.display())]
    #[diagnostic(
        code(tandem::config::no_backend),
        help("Declare a [cpp] and/or a [rust] section with a `path` key")
    )]
    NoBackends { path: PathBuf },

    #[error("{section} path does not exist: {}", path.display())]
    #[diagnostic(
        code(tandem::config::missing_path),
        help("Make sure project_config.toml names an existing path for this section")
    )]
    MissingPath { section: String, path: PathBuf },

    #[error("{section} directory `{}` has no `{expected}`", dir.display())]
    #[diagnostic(
        code(tandem::config::missing_manifest),
        help("Point the section's `path` at the project root that holds its build manifest")
    )]
    MissingManifest {
        section: String,
        dir: PathBuf,
        expected: String,
    },

    #[error("failed to find `{tool}`, can not proceed")]
    #[diagnostic(
        code(tandem::toolchain::missing_tool),
        help("Run `just setup` and properly activate your shell")
    )]
    MissingTool { tool: String },

    #[error("unsupported platform `{os}`")]
    #[diagnostic(
        code(tandem::platform::unsupported),
        help("Supported platforms are Windows (x64), macOS (arm) and Linux (x64)")
    )]
    UnsupportedPlatform { os: String },

    #[error("`{compiler}` is Windows only")]
    #[diagnostic(
        code(tandem::toolchain::windows_only),
        help("Set `compiler = \"clang\"` in the [cpp] section instead")
    )]
    WindowsOnlyCompiler { compiler: String },

    #[error("conan profile not found: {}", path.display())]
    #[diagnostic(
        code(tandem::toolchain::missing_profile),
        help("Add the profile under tooling/conan_profiles or pick another compiler/generator")
    )]
    MissingProfile { path: PathBuf },
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        if let ConfigError::MissingProfile { path } | ConfigError::InvalidConfig { path, .. } = self
        {
            diag = diag.with_location(path.clone());
        }

        if let Some(code) = MietteDiagnostic::code(self) {
            diag = diag.with_code(code.to_string());
        }

        if let Some(help) = MietteDiagnostic::help(self) {
            diag = diag.with_suggestion(help.to_string());
        }

        diag
    }
}
