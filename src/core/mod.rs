//! Core data structures for tandem.
//!
//! This module contains the foundational types used throughout tandem:
//! - Build modes, platforms and compiler aliases
//! - Verified backend targets
//! - Workspace management
//! - The fatal configuration error taxonomy

pub mod compiler;
pub mod errors;
pub mod mode;
pub mod platform;
pub mod target;
pub mod workspace;

pub use compiler::Compiler;
pub use errors::ConfigError;
pub use mode::BuildMode;
pub use platform::Platform;
pub use target::{BackendKind, CargoTarget, NativeTarget};
pub use workspace::Workspace;
