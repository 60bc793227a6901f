//! Project configuration (`project_config.toml`).
//!
//! The file declares where the native (CMake) and Cargo projects live and how
//! to build them:
//!
//! ```toml
//! [cpp]
//! path = "cpp"
//! compiler = "clang"
//! use_ninja = true
//!
//! [rust]
//! path = "rust"
//! features = ["simd"]
//!
//! [migration]
//! legacy_build = true
//!
//! [test]
//! path = "tooling/run_tests.py"
//! ```
//!
//! Every known section is validated when the file is loaded. Sections other
//! tools keep in the same file are ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::compiler::Compiler;
use crate::core::errors::ConfigError;

/// File name searched for when locating the project root.
pub const CONFIG_FILE_NAME: &str = "project_config.toml";

/// Cargo feature enabled by `legacy_build`.
pub const LEGACY_FEATURE: &str = "legacy_build";

/// The whole configuration document, loaded once per invocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// Native backend (`[cpp]`, also accepted as `[cmake]`)
    #[serde(default, alias = "cmake")]
    pub cpp: Option<NativeSection>,

    /// Cargo backend
    #[serde(default)]
    pub rust: Option<CargoSection>,

    /// Settings shared by both backends during a migration
    #[serde(default)]
    pub migration: Option<MigrationSection>,

    /// Test script run by `--validate`
    #[serde(default)]
    pub test: Option<TestSection>,
}

/// `[cpp]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativeSection {
    /// Project directory, relative to the project root (defaults to `cpp`)
    pub path: Option<PathBuf>,

    /// Compiler alias (defaults to the platform's compiler)
    pub compiler: Option<Compiler>,

    /// Generate with Ninja instead of the platform default generator
    #[serde(default)]
    pub use_ninja: bool,

    /// Build shared libraries
    #[serde(default)]
    pub shared_libs: bool,

    /// Same as `[migration] legacy_build`
    #[serde(default)]
    pub legacy_build: bool,

    /// CMake targets to build (empty = all)
    #[serde(default)]
    pub targets: Vec<String>,
}

/// `[rust]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CargoSection {
    /// Project directory, relative to the project root (defaults to `rust`)
    pub path: Option<PathBuf>,

    /// Cargo features to enable
    #[serde(default)]
    pub features: Vec<String>,
}

/// `[migration]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationSection {
    #[serde(default)]
    pub legacy_build: bool,
}

/// `[test]` section.
///
/// Other project tooling reads this section too, so keys besides `path` are
/// left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestSection {
    /// Script path, relative to the project root (defaults to `test`)
    pub path: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load and validate the configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingConfigFile {
                searched_from: path.parent().unwrap_or(path).to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!("Reading paths from {}", path.display());
        Self::parse(&contents, path)
    }

    /// Parse configuration text; `path` is only used for error reporting.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Whether the legacy build flavour is requested anywhere.
    pub fn legacy_build(&self) -> bool {
        self.migration.as_ref().is_some_and(|m| m.legacy_build)
            || self.cpp.as_ref().is_some_and(|c| c.legacy_build)
    }

    /// Features passed to `cargo build`, including the legacy feature.
    pub fn cargo_features(&self) -> Vec<String> {
        let mut features = self
            .rust
            .as_ref()
            .map(|r| r.features.clone())
            .unwrap_or_default();

        if self.legacy_build() && !features.iter().any(|f| f == LEGACY_FEATURE) {
            features.push(LEGACY_FEATURE.to_string());
        }

        features
    }
}

impl NativeSection {
    /// Configured path, or the section's default directory name.
    pub fn path_or_default(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("cpp"))
    }
}

impl CargoSection {
    /// Configured path, or the section's default directory name.
    pub fn path_or_default(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("rust"))
    }
}

impl TestSection {
    pub fn path_or_default(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("test"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(contents: &str) -> Result<ProjectConfig, ConfigError> {
        ProjectConfig::parse(contents, Path::new(CONFIG_FILE_NAME))
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
[cpp]
path = "native"
compiler = "clang"
use_ninja = true
shared_libs = true
targets = ["app", "tests"]

[rust]
path = "crates/core"
features = ["simd"]

[migration]
legacy_build = true

[test]
path = "tooling/run_tests.py"
"#,
        )
        .unwrap();

        let cpp = config.cpp.as_ref().unwrap();
        assert_eq!(cpp.path_or_default(), PathBuf::from("native"));
        assert_eq!(cpp.compiler, Some(Compiler::Clang));
        assert!(cpp.use_ninja);
        assert!(cpp.shared_libs);
        assert_eq!(cpp.targets, vec!["app", "tests"]);

        let rust = config.rust.as_ref().unwrap();
        assert_eq!(rust.path_or_default(), PathBuf::from("crates/core"));

        let test = config.test.as_ref().unwrap();
        assert_eq!(test.path_or_default(), PathBuf::from("tooling/run_tests.py"));
        assert!(config.legacy_build());
        assert_eq!(config.cargo_features(), vec!["simd", "legacy_build"]);
    }

    #[test]
    fn test_cmake_alias_and_defaults() {
        let config = parse("[cmake]\n").unwrap();
        let cpp = config.cpp.unwrap();
        assert_eq!(cpp.path_or_default(), PathBuf::from("cpp"));
        assert_eq!(cpp.compiler, None);
        assert!(!cpp.use_ninja);
        assert!(config.rust.is_none());
    }

    #[test]
    fn test_cpp_and_cmake_together_is_rejected() {
        let err = parse("[cpp]\npath = \"a\"\n\n[cmake]\npath = \"b\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_absent_sections() {
        let config = parse("").unwrap();
        assert!(config.cpp.is_none());
        assert!(config.rust.is_none());
        assert!(config.test.is_none());
        assert!(!config.legacy_build());
        assert!(config.cargo_features().is_empty());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse("[rust]\npath = \"rust\"\nfeatrues = [\"x\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
        assert!(err.to_string().contains("featrues"));
    }

    #[test]
    fn test_unknown_compiler_is_rejected() {
        let err = parse("[cpp]\ncompiler = \"icc\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn test_test_section_tolerates_foreign_keys() {
        let config = parse("[test]\ntimeout = 300\n").unwrap();
        assert_eq!(
            config.test.unwrap().path_or_default(),
            PathBuf::from("test")
        );
    }

    #[test]
    fn test_legacy_feature_not_duplicated() {
        let config = parse(
            "[cpp]\nlegacy_build = true\n[rust]\nfeatures = [\"legacy_build\"]\n",
        )
        .unwrap();
        assert_eq!(config.cargo_features(), vec!["legacy_build"]);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = ProjectConfig::load(&tmp.path().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfigFile { .. }));
    }
}
