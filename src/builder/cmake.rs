//! Command construction for the native (CMake) backend.
//!
//! With a Conan manifest the project is generated by `conan install` and then
//! configured and built through the presets Conan writes. Without one, CMake
//! is driven directly with a per-mode build directory and explicit compilers.
//! Nothing here runs a process.

use std::path::PathBuf;

use crate::builder::executor::RetryPolicy;
use crate::core::compiler::Compiler;
use crate::core::mode::BuildMode;
use crate::core::platform::{build_preset, Platform};
use crate::core::target::NativeTarget;
use crate::core::workspace::Workspace;
use crate::util::diagnostic::Diagnostic;
use crate::util::process::ProcessBuilder;

/// Commands that generate and build the native project in one mode.
#[derive(Debug, Clone)]
pub struct NativeSteps {
    /// `conan install` or the plain `cmake -S . -B ...` generation
    pub generate: ProcessBuilder,
    /// `cmake --preset ...`, only when Conan generated the presets
    pub configure: Option<ProcessBuilder>,
    pub build: ProcessBuilder,
    /// Retry policy of the build step
    pub build_policy: RetryPolicy,
}

impl NativeSteps {
    /// Generation commands in execution order.
    pub fn generation(&self) -> impl Iterator<Item = &ProcessBuilder> {
        std::iter::once(&self.generate).chain(self.configure.as_ref())
    }
}

/// Native command builder.
#[derive(Debug, Clone)]
pub struct CMakeCommands {
    source_dir: PathBuf,
    uses_conan: bool,
    platform: Platform,
    compiler: Compiler,
    use_ninja: bool,
    shared_libs: bool,
    legacy_build: bool,
    targets: Vec<String>,
    profile: Option<PathBuf>,
}

impl CMakeCommands {
    /// Create a builder for `target` with everything else at its default.
    pub fn new(target: &NativeTarget, platform: Platform, compiler: Compiler) -> Self {
        CMakeCommands {
            source_dir: target.root().to_path_buf(),
            uses_conan: target.uses_conan(),
            platform,
            compiler,
            use_ninja: false,
            shared_libs: false,
            legacy_build: false,
            targets: Vec::new(),
            profile: None,
        }
    }

    /// Builder for the workspace's native backend, if it has one.
    pub fn from_workspace(ws: &Workspace) -> Option<Self> {
        let target = ws.native()?;
        let section = ws.native_section()?;

        let mut commands = CMakeCommands::new(target, ws.platform(), ws.compiler())
            .use_ninja(section.use_ninja)
            .shared_libs(section.shared_libs)
            .legacy_build(ws.config().legacy_build())
            .targets(section.targets.iter().cloned());

        if target.uses_conan() {
            commands = commands.profile(ws.profile_path());
        }
        Some(commands)
    }

    /// Generate with Ninja instead of the platform default.
    pub fn use_ninja(mut self, use_ninja: bool) -> Self {
        self.use_ninja = use_ninja;
        self
    }

    pub fn shared_libs(mut self, shared_libs: bool) -> Self {
        self.shared_libs = shared_libs;
        self
    }

    pub fn legacy_build(mut self, legacy_build: bool) -> Self {
        self.legacy_build = legacy_build;
        self
    }

    /// Specify targets to build.
    pub fn targets(mut self, targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.targets.extend(targets.into_iter().map(|s| s.into()));
        self
    }

    /// Conan profile used for both host and build contexts.
    pub fn profile(mut self, profile: impl Into<PathBuf>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// All commands for `mode`.
    pub fn steps(&self, mode: BuildMode) -> NativeSteps {
        let (generate, configure, build) = if self.uses_conan {
            (
                self.conan_install(mode),
                Some(self.preset_configure(mode)),
                self.preset_build(mode),
            )
        } else {
            (self.configure(mode), None, self.compile(mode))
        };

        NativeSteps {
            generate,
            configure,
            build,
            build_policy: if self.use_ninja {
                RetryPolicy::ninja_recompaction()
            } else {
                RetryPolicy::once()
            },
        }
    }

    fn conan_install(&self, mode: BuildMode) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new("conan")
            .args(["install", "."])
            .arg(format!("--output-folder={}", NativeTarget::build_dir_name()))
            .arg("--build=missing");

        if let Some(ref profile) = self.profile {
            cmd = cmd.arg("-pr:h").arg(profile).arg("-pr:b").arg(profile);
        }

        cmd.arg("-s")
            .arg(format!("build_type={}", mode))
            .cwd(&self.source_dir)
    }

    fn preset_configure(&self, mode: BuildMode) -> ProcessBuilder {
        let cmd = ProcessBuilder::new("cmake")
            .arg("--preset")
            .arg(self.platform.configure_preset(mode, self.use_ninja));
        self.option_flags(cmd).cwd(&self.source_dir)
    }

    fn preset_build(&self, mode: BuildMode) -> ProcessBuilder {
        let cmd = ProcessBuilder::new("cmake")
            .args(["--build", "--preset"])
            .arg(build_preset(mode));
        self.target_flags(cmd).cwd(&self.source_dir)
    }

    /// Plain CMake generation into `build/<Mode>`.
    fn configure(&self, mode: BuildMode) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new("cmake")
            .args(["-S", ".", "-B"])
            .arg(NativeTarget::mode_build_dir(mode))
            .arg(format!("-DCMAKE_BUILD_TYPE={}", mode))
            .arg("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON")
            .arg(format!("-DCMAKE_C_COMPILER={}", self.compiler.c_compiler()))
            .arg(format!("-DCMAKE_CXX_COMPILER={}", self.compiler.cxx_compiler()));

        cmd = self.option_flags(cmd);

        if self.use_ninja {
            cmd = cmd.args(["-G", "Ninja"]);
        } else if self.platform.is_windows() {
            // Visual Studio picks the compiler through its platform toolset
            if let Some(toolset) = self.compiler.vs_toolset() {
                cmd = cmd.arg("-T").arg(toolset);
            }
        }

        cmd.cwd(&self.source_dir)
    }

    fn compile(&self, mode: BuildMode) -> ProcessBuilder {
        let cmd = ProcessBuilder::new("cmake")
            .arg("--build")
            .arg(NativeTarget::mode_build_dir(mode))
            .arg("--config")
            .arg(mode.as_str())
            .arg("--parallel");
        self.target_flags(cmd).cwd(&self.source_dir)
    }

    fn option_flags(&self, mut cmd: ProcessBuilder) -> ProcessBuilder {
        if self.shared_libs {
            cmd = cmd.arg("-DBUILD_SHARED_LIBS=ON");
        }
        if self.legacy_build {
            cmd = cmd.arg("-DLEGACY_BUILD=ON");
        }
        cmd
    }

    fn target_flags(&self, cmd: ProcessBuilder) -> ProcessBuilder {
        if self.targets.is_empty() {
            return cmd;
        }
        cmd.arg("--target").args(&self.targets)
    }
}

/// Warning for a compiler the chosen generator will not use.
///
/// The Visual Studio generator only drives MSVC-family compilers; anything
/// else named in the configuration is silently ignored by it.
pub fn generator_mismatch(
    platform: Platform,
    compiler: Compiler,
    use_ninja: bool,
) -> Option<Diagnostic> {
    if !platform.is_windows() || use_ninja || compiler.is_msvc_family() {
        return None;
    }
    Some(
        Diagnostic::warning(format!("MSVC generator ignores {}", compiler))
            .with_context("compatible compilers: msvc or clang-cl")
            .with_suggestion(format!(
                "set `use_ninja = true` in the [cpp] section if you need {}",
                compiler
            )),
    )
}
