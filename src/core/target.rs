//! Verified backend project roots.
//!
//! A target only exists once its directory and build manifest have been
//! confirmed on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::errors::ConfigError;
use crate::core::mode::BuildMode;

/// The two build ecosystems tandem drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// CMake project, optionally with Conan
    Native,
    /// Cargo project
    Cargo,
}

impl BackendKind {
    /// Configuration section that declares this backend.
    pub fn section(&self) -> &'static str {
        match self {
            BackendKind::Native => "cpp",
            BackendKind::Cargo => "rust",
        }
    }

    /// File whose presence identifies the project root.
    pub fn manifest_file(&self) -> &'static str {
        match self {
            BackendKind::Native => "CMakeLists.txt",
            BackendKind::Cargo => "Cargo.toml",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// Conan manifest found next to `CMakeLists.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConanManifest {
    Txt,
    Py,
}

impl ConanManifest {
    pub fn file_name(&self) -> &'static str {
        match self {
            ConanManifest::Txt => "conanfile.txt",
            ConanManifest::Py => "conanfile.py",
        }
    }

    /// Detect a Conan manifest; `conanfile.txt` wins over `conanfile.py`.
    pub fn detect(dir: &Path) -> Option<ConanManifest> {
        [ConanManifest::Txt, ConanManifest::Py]
            .into_iter()
            .find(|m| dir.join(m.file_name()).is_file())
    }
}

/// Verified native project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTarget {
    root: PathBuf,
    conan: Option<ConanManifest>,
}

impl NativeTarget {
    /// Resolve `path` against the project root and verify the CMake project.
    pub fn verify(project_root: &Path, path: &Path) -> Result<Self, ConfigError> {
        let root = verify_backend_path(project_root, path, BackendKind::Native)?;
        let conan = ConanManifest::detect(&root);
        tracing::debug!(
            "native project at {} ({})",
            root.display(),
            conan.map_or("no conan manifest", |m| m.file_name())
        );
        Ok(NativeTarget { root, conan })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uses_conan(&self) -> bool {
        self.conan.is_some()
    }

    /// Build output root, relative to the project directory.
    pub fn build_dir_name() -> &'static str {
        "build"
    }

    /// Per-mode build directory used without Conan, relative to the project directory.
    pub fn mode_build_dir(mode: BuildMode) -> String {
        format!("{}/{}", Self::build_dir_name(), mode)
    }

    /// Absolute build output root.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(Self::build_dir_name())
    }

    /// Preset file Conan writes next to `CMakeLists.txt`.
    pub fn user_presets_file(&self) -> PathBuf {
        self.root.join("CMakeUserPresets.json")
    }
}

/// Verified Cargo project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoTarget {
    root: PathBuf,
}

impl CargoTarget {
    /// Resolve `path` against the project root and verify `Cargo.toml`.
    pub fn verify(project_root: &Path, path: &Path) -> Result<Self, ConfigError> {
        let root = verify_backend_path(project_root, path, BackendKind::Cargo)?;
        tracing::debug!("cargo project at {}", root.display());
        Ok(CargoTarget { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn target_dir(&self) -> PathBuf {
        self.root.join("target")
    }
}

/// Resolve a configured directory and check that it holds the backend's manifest.
pub fn verify_backend_path(
    project_root: &Path,
    path: &Path,
    kind: BackendKind,
) -> Result<PathBuf, ConfigError> {
    let joined = project_root.join(path);
    if !joined.is_dir() {
        return Err(ConfigError::MissingPath {
            section: kind.section().to_string(),
            path: joined,
        });
    }

    let dir = joined.canonicalize().unwrap_or(joined);

    if !dir.join(kind.manifest_file()).is_file() {
        return Err(ConfigError::MissingManifest {
            section: kind.section().to_string(),
            dir,
            expected: kind.manifest_file().to_string(),
        });
    }

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_native_without_conan() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("cpp")).unwrap();
        fs::write(tmp.path().join("cpp/CMakeLists.txt"), "").unwrap();

        let target = NativeTarget::verify(tmp.path(), Path::new("cpp")).unwrap();
        assert!(target.root().is_absolute());
        assert!(!target.uses_conan());
        assert!(target.build_dir().ends_with("cpp/build"));
    }

    #[test]
    fn test_conanfile_txt_preferred() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "").unwrap();
        fs::write(tmp.path().join("conanfile.py"), "").unwrap();
        assert_eq!(ConanManifest::detect(tmp.path()), Some(ConanManifest::Py));

        fs::write(tmp.path().join("conanfile.txt"), "").unwrap();
        assert_eq!(ConanManifest::detect(tmp.path()), Some(ConanManifest::Txt));
    }

    #[test]
    fn test_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let err = CargoTarget::verify(tmp.path(), Path::new("rust")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath { ref section, .. } if section == "rust"));
    }

    #[test]
    fn test_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("rust")).unwrap();

        let err = CargoTarget::verify(tmp.path(), Path::new("rust")).unwrap_err();
        match err {
            ConfigError::MissingManifest { expected, .. } => assert_eq!(expected, "Cargo.toml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mode_build_dir() {
        assert_eq!(NativeTarget::mode_build_dir(BuildMode::Release), "build/Release");
        assert_eq!(NativeTarget::mode_build_dir(BuildMode::Debug), "build/Debug");
    }
}
