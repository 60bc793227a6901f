//! Compiler aliases accepted in the `[cpp]` section.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-facing compiler choice.
///
/// One alias expands into a C executable and a C++ executable, which are not
/// always spelled alike (`gcc` pairs with `g++`, MSVC's driver is `cl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
    Gcc,
    Clang,
    Msvc,
    ClangCl,
}

impl Compiler {
    /// The alias as written in the configuration and in profile names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::Msvc => "msvc",
            Compiler::ClangCl => "clang-cl",
        }
    }

    /// Executable passed as `CMAKE_C_COMPILER`.
    pub fn c_compiler(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::Msvc => "cl",
            Compiler::ClangCl => "clang-cl",
        }
    }

    /// Executable passed as `CMAKE_CXX_COMPILER`.
    pub fn cxx_compiler(&self) -> &'static str {
        match self {
            Compiler::Gcc => "g++",
            Compiler::Clang => "clang++",
            Compiler::Msvc => "cl",
            Compiler::ClangCl => "clang-cl",
        }
    }

    /// Compilers that only exist on Windows and need the vcvars environment.
    pub fn is_msvc_family(&self) -> bool {
        matches!(self, Compiler::Msvc | Compiler::ClangCl)
    }

    /// Visual Studio sub-toolset (`-T`) required by this compiler, if any.
    pub fn vs_toolset(&self) -> Option<&'static str> {
        match self {
            Compiler::ClangCl => Some("ClangCL"),
            _ => None,
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
