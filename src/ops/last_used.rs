//! Last successfully built mode.
//!
//! The tracker file holds exactly `Debug` or `Release`. Anything else is
//! treated as no record at all and the file is removed. A file that cannot
//! be read is also no record, but is left in place.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::mode::BuildMode;
use crate::util::fs::{remove_file_if_exists, write_string};

/// Persisted "last used configuration" state.
#[derive(Debug, Clone)]
pub struct LastUsedConfig {
    path: PathBuf,
}

impl LastUsedConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LastUsedConfig { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recorded mode, healing a corrupted file.
    pub fn read(&self) -> Result<Option<BuildMode>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    "Cannot read {} ({}), building from scratch",
                    self.path.display(),
                    e
                );
                return Ok(None);
            }
        };

        let parsed = String::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse::<BuildMode>().ok());

        match parsed {
            Some(mode) => {
                tracing::debug!("last successful build: {}", mode);
                Ok(Some(mode))
            }
            None => {
                tracing::warn!(
                    "Broken {}, removing it and building from scratch",
                    self.path.display()
                );
                remove_file_if_exists(&self.path)?;
                Ok(None)
            }
        }
    }

    /// Record `mode`, or erase the record when `None`.
    pub fn write(&self, mode: Option<BuildMode>) -> Result<()> {
        match mode {
            Some(mode) => write_string(&self.path, mode.as_str()),
            None => {
                if remove_file_if_exists(&self.path)? {
                    tracing::info!("Wiping the last used build configuration");
                }
                Ok(())
            }
        }
    }
}
