//! Backend command construction and execution.
//!
//! This module turns a workspace and a build mode into concrete CMake, Conan
//! and Cargo invocations, and runs them with the retry policy they need.

pub mod cargo;
pub mod cmake;
pub mod executor;
pub mod toolchain;

pub use cargo::CargoCommands;
pub use cmake::{CMakeCommands, NativeSteps};
pub use executor::{CommandRunner, CommandState, RetryPolicy, RunOutcome};
pub use toolchain::{prepare, PreparedToolchain};
