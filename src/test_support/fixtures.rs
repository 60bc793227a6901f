//! Test fixtures for common test scenarios.
//!
//! [`ProjectFixture`] writes a project tree (configuration file, backend
//! manifests, Conan profiles) into a temporary directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::errors::ConfigError;
use crate::core::platform::Platform;
use crate::core::workspace::Workspace;
use crate::util::config::CONFIG_FILE_NAME;
use crate::util::GlobalContext;

use super::MockProcessOutput;

/// Fixture for a complete project structure.
#[derive(Debug, Clone, Default)]
pub struct ProjectFixture {
    /// `project_config.toml` content.
    pub config: String,
    /// Files relative to the project root -> content.
    pub files: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// Create a new empty project fixture.
    pub fn new() -> Self {
        ProjectFixture::default()
    }

    /// A CMake project in `cpp/` and a Cargo project in `rust/`.
    pub fn both() -> Self {
        ProjectFixture::new()
            .with_config(configs::BOTH)
            .with_cmake_project("cpp")
            .with_cargo_project("rust")
    }

    /// Only a Cargo project in `rust/`.
    pub fn cargo_only() -> Self {
        ProjectFixture::new()
            .with_config(configs::CARGO_ONLY)
            .with_cargo_project("rust")
    }

    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = config.into();
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn with_cmake_project(self, dir: &str) -> Self {
        self.with_file(
            Path::new(dir).join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.21)\nproject(app CXX)\n",
        )
    }

    pub fn with_cargo_project(self, dir: &str) -> Self {
        self.with_file(
            Path::new(dir).join("Cargo.toml"),
            "[package]\nname = \"app\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
        )
    }

    /// Add `conanfile.txt` to the `cpp/` project.
    pub fn with_conanfile(self) -> Self {
        self.with_file("cpp/conanfile.txt", "[requires]\nfmt/10.2.1\n\n[generators]\nCMakeToolchain\n")
    }

    /// Add a Conan profile, e.g. `with_profile(Platform::Linux, "gcc_default")`.
    pub fn with_profile(self, platform: Platform, name: &str) -> Self {
        self.with_file(
            Path::new("tooling/conan_profiles")
                .join(platform.profile_dir_name())
                .join(name),
            "[settings]\nos=Linux\narch=x86_64\n",
        )
    }

    /// Write the project under `base_path` and return its root.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(base_path)?;
        std::fs::write(base_path.join(CONFIG_FILE_NAME), &self.config)?;

        for (rel_path, content) in &self.files {
            let full_path = base_path.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        Ok(base_path.to_path_buf())
    }
}

/// Load the workspace rooted at `root` as seen from `platform`.
pub fn load_workspace(root: &Path, platform: Platform) -> Result<Workspace, ConfigError> {
    Workspace::load(&GlobalContext::with_cwd(root.to_path_buf()), platform)
}

/// Sample `project_config.toml` contents.
pub mod configs {
    pub const BOTH: &str = "[cpp]\npath = \"cpp\"\n\n[rust]\npath = \"rust\"\n";

    pub const CARGO_ONLY: &str = "[rust]\npath = \"rust\"\n";
}

/// Canned tool outputs.
pub mod outputs {
    use super::MockProcessOutput;

    /// `rustup target list --installed` listing the given triples.
    pub fn rustup_targets(triples: &[&str]) -> MockProcessOutput {
        MockProcessOutput::success(triples.join("\n") + "\n")
    }

    /// A failing compile with a real diagnostic.
    pub fn compile_error() -> MockProcessOutput {
        MockProcessOutput::failure(1, "main.cpp:3:1: error: expected ';' before '}' token\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_both_fixture_loads() {
        let tmp = TempDir::new().unwrap();
        ProjectFixture::both().write_to(tmp.path()).unwrap();

        let ws = load_workspace(tmp.path(), Platform::Linux).unwrap();
        assert!(ws.native().is_some());
        assert!(ws.cargo().is_some());
    }

    #[test]
    fn test_profile_lands_where_workspace_looks() {
        let tmp = TempDir::new().unwrap();
        ProjectFixture::both()
            .with_conanfile()
            .with_profile(Platform::Linux, "gcc_default")
            .write_to(tmp.path())
            .unwrap();

        let ws = load_workspace(tmp.path(), Platform::Linux).unwrap();
        assert!(ws.native().unwrap().uses_conan());
        assert!(ws.profile_path().is_file());
    }
}
