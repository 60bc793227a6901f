//! tandem - build orchestration for mixed CMake and Cargo projects
//!
//! This crate provides the core library functionality for tandem: project
//! configuration, command construction for each backend, the retry policy
//! for flaky build tools, and the last-used configuration tracker.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for tandem unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted process executor and project
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildMode, ConfigError, Platform, Workspace};
pub use util::context::GlobalContext;
