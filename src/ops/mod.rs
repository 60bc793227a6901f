//! High-level operations.
//!
//! This module contains the implementation of tandem's invocation modes.

pub mod last_used;
pub mod tandem_build;
pub mod tandem_clean;
pub mod tandem_validate;

pub use last_used::LastUsedConfig;
pub use tandem_build::{build, BackendResult, BuildOptions, BuildReport};
pub use tandem_clean::{clean, CleanReport};
pub use tandem_validate::validate;
