//! Implementation of `tandem --validate`.
//!
//! Runs the project's test script (the `[test]` section) from the project
//! root. Nothing is built first.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use crate::builder::executor::{CommandRunner, RetryPolicy};
use crate::builder::toolchain::check_presence;
use crate::core::workspace::Workspace;
use crate::util::process::{Executor, ProcessBuilder};
use crate::util::shell::{format_duration, Shell, Status};

/// Interpreter the test script is handed to.
pub const TEST_INTERPRETER: &str = "python3";

/// Command running `script` from the project root.
pub fn test_command(ws: &Workspace, script: &Path) -> ProcessBuilder {
    ProcessBuilder::new(TEST_INTERPRETER)
        .arg(script)
        .cwd(ws.root())
}

/// Run the test script. Returns whether it passed.
///
/// An absent `[test]` section is skipped and counts as passing. A declared
/// script that does not exist, or a missing interpreter, is fatal.
pub fn validate(ws: &Workspace, exec: &mut dyn Executor, shell: &Shell) -> Result<bool> {
    let Some(script) = ws.test_script()? else {
        shell.status(
            Status::Skipped,
            format!("test, because it was missing in {}", ws.config_path().display()),
        );
        return Ok(true);
    };

    check_presence(exec, TEST_INTERPRETER, true)?;

    shell.status(Status::Running, script.display());
    let start = Instant::now();
    let passed = CommandRunner::new(shell, ws.platform())
        .run(exec, &test_command(ws, &script), RetryPolicy::once())
        .succeeded();

    if passed {
        shell.status(
            Status::Finished,
            format!("validation in {}", format_duration(start.elapsed())),
        );
    } else {
        shell.status(Status::Failed, "validation");
    }
    Ok(passed)
}
