//! Command construction for the Cargo backend.

use std::path::{Path, PathBuf};

use crate::core::compiler::Compiler;
use crate::core::mode::BuildMode;
use crate::core::platform::Platform;
use crate::core::target::CargoTarget;
use crate::core::workspace::Workspace;
use crate::util::process::ProcessBuilder;

/// GNU target used so Rust artifacts link with MinGW-flavoured native code.
pub const WINDOWS_GNU_TARGET: &str = "x86_64-pc-windows-gnu";

/// `cargo build` builder.
#[derive(Debug, Clone)]
pub struct CargoCommands {
    manifest_dir: PathBuf,
    features: Vec<String>,
    target_triple: Option<String>,
}

impl CargoCommands {
    pub fn new(target: &CargoTarget) -> Self {
        CargoCommands {
            manifest_dir: target.root().to_path_buf(),
            features: Vec::new(),
            target_triple: None,
        }
    }

    /// Builder for the workspace's Cargo backend, if it has one.
    pub fn from_workspace(ws: &Workspace) -> Option<Self> {
        let target = ws.cargo()?;
        Some(CargoCommands::new(target).features(ws.config().cargo_features()))
    }

    pub fn features(mut self, features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.features.extend(features.into_iter().map(|s| s.into()));
        self
    }

    /// Build for an explicit target triple instead of the host default.
    pub fn target_triple(mut self, triple: Option<String>) -> Self {
        self.target_triple = triple;
        self
    }

    pub fn build(&self, mode: BuildMode) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new("cargo").arg("build");

        if mode.is_release() {
            cmd = cmd.arg("--release");
        }

        if let Some(ref triple) = self.target_triple {
            cmd = cmd.arg("--target").arg(triple);
        }

        if !self.features.is_empty() {
            cmd = cmd.arg("--features").arg(self.features.join(","));
        }

        cmd.cwd(&self.manifest_dir)
    }
}

/// Whether the Cargo build should try the GNU target.
///
/// Only MinGW-style native builds (a non-MSVC compiler under Ninja on
/// Windows) produce objects that need it.
pub fn wants_gnu_target(platform: Platform, compiler: Compiler, use_ninja: bool) -> bool {
    platform.is_windows() && use_ninja && !compiler.is_msvc_family()
}

/// `rustup target list --installed`, run from the Cargo project.
pub fn installed_targets_command(manifest_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("rustup")
        .args(["target", "list", "--installed"])
        .cwd(manifest_dir)
}

/// Check whether `triple` appears in `rustup target list --installed` output.
pub fn is_target_installed(listing: &str, triple: &str) -> bool {
    listing.lines().any(|line| line.trim() == triple)
}
