//! Global context for a tandem invocation.
//!
//! Holds the working directory and knows how to find the project root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::errors::ConfigError;
use crate::util::config::CONFIG_FILE_NAME;

/// Global context containing the working directory.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext { cwd }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Find `project_config.toml`, starting from cwd and searching upward.
    pub fn find_config_file(&self) -> Result<PathBuf, ConfigError> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(ConfigError::MissingConfigFile {
                    searched_from: self.cwd.clone(),
                });
            }
        }
    }

    /// Find the project root (directory containing `project_config.toml`).
    pub fn find_project_root(&self) -> Result<PathBuf, ConfigError> {
        let config = self.find_config_file()?;
        Ok(config
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone()))
    }
}
