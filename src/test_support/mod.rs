//! Test utilities and mocks for tandem unit tests.
//!
//! [`MockExecutor`] stands in for the host environment: it returns scripted
//! outcomes for commands, records every call, and answers tool lookups from a
//! fixed list.
//!
//! # Example
//!
//! ```rust,ignore
//! use tandem::test_support::{MockExecutor, MockProcessOutput};
//!
//! let mut exec = MockExecutor::new();
//! exec.with_tools(&["cmake", "cargo"])
//!     .expect_prefix("cargo build", MockProcessOutput::success(""));
//! ```

pub mod fixtures;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::util::process::{Executor, ProcessBuilder, ProcessOutput};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stdout and status code.
    pub fn failure(status: i32, stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    fn to_output(&self) -> ProcessOutput {
        ProcessOutput {
            code: Some(self.status),
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    pub pattern: CommandPattern,
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    pub used: usize,
}

impl CommandExpectation {
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    fn available(&self) -> bool {
        self.times.map_or(true, |t| self.used < t)
    }
}

/// Mock executor for tests.
#[derive(Debug, Default)]
pub struct MockExecutor {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
    default_output: Option<MockProcessOutput>,
    tools: BTreeSet<String>,
    imported_env: Vec<(String, String)>,
}

impl MockExecutor {
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Make `find_executable` resolve these names.
    pub fn with_tools(&mut self, tools: &[&str]) -> &mut Self {
        self.tools.extend(tools.iter().map(|t| t.to_string()));
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            output,
        ))
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.expectations.push(expectation);
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.default_output = Some(output);
        self
    }

    fn run(&mut self, cmd: &ProcessBuilder) -> Result<MockProcessOutput> {
        let full_cmd = cmd.display_command();
        self.calls.push(full_cmd.clone());

        for exp in &mut self.expectations {
            if exp.pattern.matches(&full_cmd) && exp.available() {
                exp.used += 1;
                return Ok(exp.output.clone());
            }
        }

        if let Some(ref default) = self.default_output {
            return Ok(default.clone());
        }

        bail!("unexpected command: {}", full_cmd)
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Commands that were called and start with `prefix`.
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<&str> {
        self.calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Variables passed to `import_env`.
    pub fn imported_env(&self) -> &[(String, String)] {
        &self.imported_env
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        for (i, exp) in self.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl Executor for MockExecutor {
    fn status(&mut self, cmd: &ProcessBuilder) -> Result<bool> {
        Ok(self.run(cmd)?.status == 0)
    }

    fn output(&mut self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        Ok(self.run(cmd)?.to_output())
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        self.tools
            .contains(name)
            .then(|| PathBuf::from("/mock/bin").join(name))
    }

    fn import_env(&mut self, vars: &[(String, String)]) {
        self.imported_env.extend(vars.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_expectations() {
        let mut exec = MockExecutor::new();
        exec.expect_pattern(
            CommandExpectation::new(
                CommandPattern::StartsWith("cmake --build".to_string()),
                MockProcessOutput::failure(1, "boom"),
            )
            .times(1),
        )
        .expect_prefix("cmake --build", MockProcessOutput::success("ok"));

        let cmd = ProcessBuilder::new("cmake").args(["--build", "build/Debug"]);
        assert!(!exec.status(&cmd).unwrap());
        assert!(exec.status(&cmd).unwrap());
        assert_eq!(exec.calls().len(), 2);
        exec.verify().unwrap();

        assert!(exec.status(&ProcessBuilder::new("conan")).is_err());
    }

    #[test]
    fn test_regex_pattern() {
        let pattern = CommandPattern::Regex(r"^cargo build( --release)?$".to_string());
        assert!(pattern.matches("cargo build"));
        assert!(pattern.matches("cargo build --release"));
        assert!(!pattern.matches("cargo test"));
    }

    #[test]
    fn test_tool_lookup() {
        let mut exec = MockExecutor::new();
        exec.with_tools(&["cmake"]);
        assert_eq!(
            exec.find_executable("cmake"),
            Some(PathBuf::from("/mock/bin/cmake"))
        );
        assert_eq!(exec.find_executable("ninja"), None);
    }
}
