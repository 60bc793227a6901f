//! Implementation of `tandem --clean`.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::workspace::Workspace;
use crate::ops::last_used::LastUsedConfig;
use crate::util::fs::{remove_dir_all_if_exists, remove_file_if_exists};
use crate::util::shell::{Shell, Status};

/// Paths that were actually removed.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
}

/// Remove every backend's build output and forget the last used mode.
pub fn clean(ws: &Workspace, shell: &Shell) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    if let Some(native) = ws.native() {
        let build_dir = native.build_dir();
        if remove_dir_all_if_exists(&build_dir)? {
            shell.status(Status::Removed, build_dir.display());
            report.removed.push(build_dir);
        }

        let presets = native.user_presets_file();
        if remove_file_if_exists(&presets)? {
            shell.status(Status::Removed, presets.display());
            report.removed.push(presets);
        }
    }

    if let Some(cargo) = ws.cargo() {
        let target_dir = cargo.target_dir();
        if remove_dir_all_if_exists(&target_dir)? {
            shell.status(Status::Removed, target_dir.display());
            report.removed.push(target_dir);
        }
    }

    LastUsedConfig::new(ws.last_used_path()).write(None)?;

    if report.removed.is_empty() {
        shell.status(Status::Finished, "nothing to clean");
    } else {
        shell.status(
            Status::Finished,
            format!("removed {} item(s)", report.removed.len()),
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::BuildMode;
    use crate::core::platform::Platform;
    use crate::test_support::{load_workspace, ProjectFixture};
    use crate::util::shell::{ColorChoice, Verbosity};
    use tempfile::TempDir;

    fn shell() -> Shell {
        Shell::new(Verbosity::Quiet, ColorChoice::Never)
    }

    #[test]
    fn test_clean_removes_outputs_and_record() {
        let tmp = TempDir::new().unwrap();
        ProjectFixture::both()
            .with_file("cpp/build/Release/CMakeCache.txt", "")
            .with_file("cpp/CMakeUserPresets.json", "{}")
            .with_file("rust/target/release/app", "")
            .write_to(tmp.path())
            .unwrap();
        let ws = load_workspace(tmp.path(), Platform::Linux).unwrap();
        let tracker = LastUsedConfig::new(ws.last_used_path());
        tracker.write(Some(BuildMode::Release)).unwrap();

        let report = clean(&ws, &shell()).unwrap();

        assert_eq!(report.removed.len(), 3);
        assert!(!tmp.path().join("cpp/build").exists());
        assert!(!tmp.path().join("cpp/CMakeUserPresets.json").exists());
        assert!(!tmp.path().join("rust/target").exists());
        assert!(tmp.path().join("cpp/CMakeLists.txt").exists());
        assert_eq!(tracker.read().unwrap(), None);
    }

    #[test]
    fn test_clean_without_outputs() {
        let tmp = TempDir::new().unwrap();
        ProjectFixture::both().write_to(tmp.path()).unwrap();
        let ws = load_workspace(tmp.path(), Platform::Linux).unwrap();

        let report = clean(&ws, &shell()).unwrap();
        assert!(report.removed.is_empty());
        assert_eq!(LastUsedConfig::new(ws.last_used_path()).read().unwrap(), None);
    }

    #[test]
    fn test_clean_cargo_only() {
        let tmp = TempDir::new().unwrap();
        ProjectFixture::cargo_only()
            .with_file("rust/target/debug/app", "")
            .write_to(tmp.path())
            .unwrap();
        let ws = load_workspace(tmp.path(), Platform::Linux).unwrap();

        let report = clean(&ws, &shell()).unwrap();
        assert_eq!(report.removed, vec![ws.cargo().unwrap().target_dir()]);
    }
}
