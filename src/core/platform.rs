//! Host platform facts.
//!
//! The platform is resolved once per invocation and passed around as a value.

use std::fmt;

use crate::core::compiler::Compiler;
use crate::core::errors::ConfigError;
use crate::core::mode::BuildMode;

/// Supported host operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// Resolve the platform this process runs on.
    pub fn detect() -> Result<Platform, ConfigError> {
        Platform::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a supported platform.
    pub fn from_os(os: &str) -> Result<Platform, ConfigError> {
        match os {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            other => Err(ConfigError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Subfolder of the Conan profile directory holding this platform's profiles.
    pub fn profile_dir_name(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
        }
    }

    /// Compiler used when the `[cpp]` section does not name one.
    pub fn default_compiler(&self) -> Compiler {
        match self {
            Platform::Windows => Compiler::Msvc,
            Platform::Linux => Compiler::Gcc,
            Platform::MacOs => Compiler::Clang,
        }
    }

    /// Name of the CMake configure preset Conan generates for `mode`.
    ///
    /// The default Windows generator (Visual Studio) is multi-config, so Conan
    /// emits a single `conan-default` configure preset there. Single-config
    /// generators get one preset per build type.
    pub fn configure_preset(&self, mode: BuildMode, use_ninja: bool) -> String {
        if self.is_windows() && !use_ninja {
            "conan-default".to_string()
        } else {
            build_preset(mode)
        }
    }

    /// How to get a debugger onto this platform.
    pub fn debugger_hint(&self) -> &'static str {
        match self {
            Platform::Windows => {
                "Download and install `MSYS2-x86_64`, launch it and run:\n\
                 \tpacman -Syu\n\
                 \tpacman -S --needed base-devel mingw-w64-clang-x86_64-toolchain\n\
                 Then add the path to clang64/bin to your PATH"
            }
            Platform::Linux => {
                "\twget https://apt.llvm.org/llvm.sh\n\
                 \tchmod +x llvm.sh\n\
                 \tsudo ./llvm.sh 21\n\
                 \tsudo apt install clang-21 lldb-21"
            }
            Platform::MacOs => {
                "\tbrew install llvm@21\n\
                 \texport PATH=\"/opt/homebrew/opt/llvm@21/bin:$PATH\""
            }
        }
    }
}

/// Name of the CMake build preset Conan generates for `mode`.
pub fn build_preset(mode: BuildMode) -> String {
    format!("conan-{}", mode.as_lower())
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile_dir_name())
    }
}
