//! Workspace - central configuration hub.
//!
//! A Workspace is built once per invocation: it owns the parsed configuration,
//! the resolved platform and the verified backend targets, and knows where
//! the project keeps its profiles and state.

use std::path::{Path, PathBuf};

use crate::core::compiler::Compiler;
use crate::core::errors::ConfigError;
use crate::core::platform::Platform;
use crate::core::target::{BackendKind, CargoTarget, NativeTarget};
use crate::util::config::{NativeSection, ProjectConfig};
use crate::util::GlobalContext;

/// A project with its configuration and verified backends.
#[derive(Debug)]
pub struct Workspace {
    /// Directory containing `project_config.toml`
    root: PathBuf,

    /// Path to `project_config.toml`
    config_path: PathBuf,

    config: ProjectConfig,

    platform: Platform,

    native: Option<NativeTarget>,

    cargo: Option<CargoTarget>,
}

impl Workspace {
    /// Locate, load and verify the project around the context's cwd.
    pub fn load(ctx: &GlobalContext, platform: Platform) -> Result<Self, ConfigError> {
        let config_path = ctx.find_config_file()?;
        let root = ctx.find_project_root()?;
        let config = ProjectConfig::load(&config_path)?;
        Self::new(root, config_path, config, platform)
    }

    /// Verify every declared backend of an already-parsed configuration.
    pub fn new(
        root: PathBuf,
        config_path: PathBuf,
        config: ProjectConfig,
        platform: Platform,
    ) -> Result<Self, ConfigError> {
        let native = config
            .cpp
            .as_ref()
            .map(|section| NativeTarget::verify(&root, &section.path_or_default()))
            .transpose()?;

        let cargo = config
            .rust
            .as_ref()
            .map(|section| CargoTarget::verify(&root, &section.path_or_default()))
            .transpose()?;

        if native.is_none() && cargo.is_none() {
            return Err(ConfigError::NoBackends { path: config_path });
        }

        Ok(Workspace {
            root,
            config_path,
            config,
            platform,
            native,
            cargo,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn native(&self) -> Option<&NativeTarget> {
        self.native.as_ref()
    }

    pub fn native_section(&self) -> Option<&NativeSection> {
        self.config.cpp.as_ref()
    }

    pub fn cargo(&self) -> Option<&CargoTarget> {
        self.cargo.as_ref()
    }

    /// Backends whose section is absent from the configuration.
    pub fn missing_backends(&self) -> Vec<BackendKind> {
        let mut missing = Vec::new();
        if self.native.is_none() {
            missing.push(BackendKind::Native);
        }
        if self.cargo.is_none() {
            missing.push(BackendKind::Cargo);
        }
        missing
    }

    /// Compiler requested for the native backend, or the platform default.
    pub fn compiler(&self) -> Compiler {
        self.native_section()
            .and_then(|s| s.compiler)
            .unwrap_or_else(|| self.platform.default_compiler())
    }

    /// Test script declared by `[test]`, resolved against the project root.
    ///
    /// `None` when the section is absent. A declared script that does not
    /// exist is fatal.
    pub fn test_script(&self) -> Result<Option<PathBuf>, ConfigError> {
        let Some(section) = self.config.test.as_ref() else {
            return Ok(None);
        };

        let script = self.root.join(section.path_or_default());
        if !script.exists() {
            return Err(ConfigError::MissingPath {
                section: "test".to_string(),
                path: script,
            });
        }
        Ok(Some(script))
    }

    /// Whether the native backend generates with Ninja.
    pub fn use_ninja(&self) -> bool {
        self.native_section().is_some_and(|s| s.use_ninja)
    }

    /// Project-local tool state directory.
    pub fn tools_dir(&self) -> PathBuf {
        self.root.join(".tools")
    }

    /// File holding the last successfully built mode.
    pub fn last_used_path(&self) -> PathBuf {
        self.tools_dir().join("last_built_config.txt")
    }

    /// Root of the Conan profile tree.
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("tooling").join("conan_profiles")
    }

    /// Conan profile for the configured compiler and generator.
    pub fn profile_path(&self) -> PathBuf {
        let generator = if self.use_ninja() { "ninja" } else { "default" };
        self.profiles_dir()
            .join(self.platform.profile_dir_name())
            .join(format!("{}_{}", self.compiler(), generator))
    }
}
