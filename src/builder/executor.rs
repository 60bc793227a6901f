//! Command execution with bounded retries.
//!
//! Each command moves through [`CommandState`]: `NotStarted`, `Running`, then
//! `Succeeded` or `Failed`. Only one failure is ever retried: Ninja on Windows
//! sometimes cannot recompact its log because another process still holds the
//! file. A build that fails with that exact line in its output is rerun while
//! attempts remain. Every other failure is final on the first attempt.

use crate::core::platform::Platform;
use crate::util::process::{Executor, ProcessBuilder};
use crate::util::shell::{Shell, Status};

/// Output line emitted by Ninja when its log recompaction loses a file lock.
pub const NINJA_RECOMPACTION_ERROR: &str = "ninja: error: failed recompaction: Permission denied";

/// Attempts granted to a Ninja build on Windows.
pub const NINJA_WINDOWS_ATTEMPTS: u32 = 7;

/// Lifecycle of one invoked command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl CommandState {
    /// Whether a command in this state may move to `next`.
    ///
    /// A retry re-enters `Running` without passing through `Failed`.
    pub fn can_advance_to(self, next: CommandState) -> bool {
        use CommandState::*;
        matches!(
            (self, next),
            (NotStarted, Running) | (Running, Running) | (Running, Succeeded) | (Running, Failed)
        )
    }

    pub fn is_finished(self) -> bool {
        matches!(self, CommandState::Succeeded | CommandState::Failed)
    }
}

/// How often a command may run and which failure justifies another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    signature: Option<&'static str>,
}

impl RetryPolicy {
    /// Run exactly once.
    pub fn once() -> Self {
        RetryPolicy {
            attempts: 1,
            signature: None,
        }
    }

    /// Retry on [`NINJA_RECOMPACTION_ERROR`], up to [`NINJA_WINDOWS_ATTEMPTS`] runs.
    pub fn ninja_recompaction() -> Self {
        RetryPolicy {
            attempts: NINJA_WINDOWS_ATTEMPTS,
            signature: Some(NINJA_RECOMPACTION_ERROR),
        }
    }

    /// Whether `output` of a failed run is worth another attempt.
    pub fn is_transient(&self, output: &str) -> bool {
        self.signature.is_some_and(|sig| output.contains(sig))
    }
}

/// Final state of a command together with how many times it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub state: CommandState,
    pub attempts: u32,
}

impl RunOutcome {
    fn not_started() -> Self {
        RunOutcome {
            state: CommandState::NotStarted,
            attempts: 0,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.state == CommandState::Succeeded
    }

    /// Move to `next`, counting every entry into `Running` as an attempt.
    fn advance(&mut self, next: CommandState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal command transition {:?} -> {:?}",
            self.state,
            next
        );
        if next == CommandState::Running {
            self.attempts += 1;
        }
        self.state = next;
    }
}

/// Runs commands for one platform and reports through the shell.
pub struct CommandRunner<'a> {
    shell: &'a Shell,
    platform: Platform,
}

impl<'a> CommandRunner<'a> {
    pub fn new(shell: &'a Shell, platform: Platform) -> Self {
        CommandRunner { shell, platform }
    }

    /// Run `cmd` under `policy`.
    ///
    /// A command that cannot even be spawned counts as failed; the error is
    /// printed and the caller carries on with its sibling steps.
    pub fn run(
        &self,
        exec: &mut dyn Executor,
        cmd: &ProcessBuilder,
        policy: RetryPolicy,
    ) -> RunOutcome {
        let mut outcome = RunOutcome::not_started();

        self.shell
            .verbose(Status::Running, format!("`{}`", cmd.display_command()));

        if !self.platform.is_windows() || policy.attempts <= 1 {
            outcome.advance(CommandState::Running);
            let finished = match exec.status(cmd) {
                Ok(true) => CommandState::Succeeded,
                Ok(false) => CommandState::Failed,
                Err(e) => {
                    self.shell.error(format!("{:#}", e));
                    CommandState::Failed
                }
            };
            outcome.advance(finished);
            return outcome;
        }

        loop {
            outcome.advance(CommandState::Running);
            let remaining = policy.attempts - outcome.attempts;

            let output = match exec.output(cmd) {
                Ok(output) => output,
                Err(e) => {
                    self.shell.error(format!("{:#}", e));
                    outcome.advance(CommandState::Failed);
                    return outcome;
                }
            };
            let combined = output.combined();

            if output.success() {
                if self.shell.is_verbose() {
                    self.shell.print_captured(&combined);
                }
                outcome.advance(CommandState::Succeeded);
                return outcome;
            }

            if remaining > 0 && policy.is_transient(&combined) {
                tracing::debug!(
                    "attempt {} of `{}` hit a transient failure",
                    outcome.attempts,
                    cmd.display_command()
                );
                self.shell.status(
                    Status::Retrying,
                    format!(
                        "ninja spuriously failed the Windows build, {} more time{}",
                        remaining,
                        if remaining > 1 { "s" } else { "" }
                    ),
                );
                continue;
            }

            self.shell.print_captured(&combined);
            outcome.advance(CommandState::Failed);
            return outcome;
        }
    }
}
