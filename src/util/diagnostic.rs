//! User-facing diagnostic messages.
//!
//! Every error printed by the CLI carries the root cause, the offending
//! location, and where possible a suggested fix.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str = "Run `vba init` to create a new project";

    /// Suggestion when a dependency has no usable shape.
    pub const DEPENDENCY_SHAPE: &str =
        "Declare exactly one of `version`, `path`, or `git` (with at most one of `branch`, `tag`, `rev`)";

    /// Suggestion when a source file listed in the manifest is missing.
    pub const MISSING_SOURCE: &str =
        "Create the file, fix its `path`, or mark the entry `optional = true`";
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("invalid value for `references.Scripting.guid`")
            .with_location("/projects/book/vba-block.toml")
            .with_context("expected a GUID such as {420B2830-E718-11CF-893D-00A0C9054228}")
            .with_suggestion("Copy the GUID from the VBA editor's References dialog");

        let output = diag.format(false);
        assert!(output.contains("error: invalid value"));
        assert!(output.contains("--> /projects/book/vba-block.toml"));
        assert!(output.contains("= expected a GUID"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Copy the GUID"));
    }

    #[test]
    fn test_color_prefixes() {
        let diag = Diagnostic::error("manifest is not valid TOML").with_suggestion("fix it");

        let colored = diag.format(true);
        assert!(colored.starts_with("\x1b[1;31merror\x1b[0m: manifest is not valid TOML"));
        assert!(colored.contains("\x1b[1;32mhelp\x1b[0m: consider:"));
        assert_eq!(diag.to_string(), diag.format(false));
    }
}
