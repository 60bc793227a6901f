//! User-friendly diagnostic messages.
//!
//! Fatal errors are printed with their root cause and a concrete next action,
//! for example "run setup" or "check your configuration section".

use std::fmt;
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diagnostic message with optional suggestions.
///
/// Errors render one fact per line under the header. Warnings keep their
/// context on the header line so they stay short next to build output.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Stable identifier, shown as `error[code]`
    pub code: Option<String>,
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    /// File the problem was found in
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::with_severity(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::with_severity(Severity::Warning, message)
    }

    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            code: None,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a next action for the user.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("{}{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut header = paint(self.severity.color_code(), self.severity.label());
        if let Some(ref code) = self.code {
            header.push_str(&format!("[{}]", code));
        }

        let mut output = format!("{}: {}", header, self.message);
        let help = paint("\x1b[1;32m", "help");

        match self.severity {
            Severity::Error => {
                output.push('\n');
                if let Some(ref path) = self.location {
                    output.push_str(&format!("  --> {}\n", path.display()));
                }
                for ctx in &self.context {
                    output.push_str(&format!("   = note: {}\n", ctx));
                }
                for suggestion in &self.suggestions {
                    output.push_str(&format!("   = {}: {}\n", help, suggestion));
                }
            }
            Severity::Warning => {
                if !self.context.is_empty() {
                    output.push_str(&format!(" ({})", self.context.join("; ")));
                }
                if let Some(ref path) = self.location {
                    output.push_str(&format!(" in {}", path.display()));
                }
                output.push('\n');
                for suggestion in &self.suggestions {
                    output.push_str(&format!("  {}: {}\n", help, suggestion));
                }
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
