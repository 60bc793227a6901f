//! Build modes.

use std::fmt;
use std::str::FromStr;

/// The two build configurations every backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Modes built when neither `--config` nor a last-used record applies.
    pub const ALL: [BuildMode; 2] = [BuildMode::Release, BuildMode::Debug];

    /// The literal used by CMake, Conan and the tracker file.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "Release",
        }
    }

    /// Lowercase name, as used in Conan preset names.
    pub fn as_lower(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }

    pub fn is_release(&self) -> bool {
        matches!(self, BuildMode::Release)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = String;

    /// Parsing is exact: the tracker relies on `"debug"` being rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Debug" => Ok(BuildMode::Debug),
            "Release" => Ok(BuildMode::Release),
            _ => Err(format!(
                "invalid build mode '{}'; expected 'Debug' or 'Release'",
                s
            )),
        }
    }
}
