//! Error handling for the Mortise CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use mortise_core::error::{ErrorCategory as CoreCategory, MortiseError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The model file is missing.
    #[error("Model file not found: {path}")]
    ModelNotFound { path: PathBuf },

    /// The model file is not a valid model.
    #[error("Invalid model file {path}: {source}")]
    InvalidModel {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `mortise-core` or an adapter.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] MortiseError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],
            Self::ModelNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Pass the model with --model <FILE>".into(),
            ],
            Self::InvalidModel { .. } => vec![
                "The model must be a JSON object with projectBaseName and entities".into(),
                "Property keys are camelCase, e.g. isPrimaryKey, canFilter".into(),
                "Feature objects are tagged by \"type\", e.g. {\"type\": \"GetRecord\"}".into(),
            ],
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Inspect the merged configuration with 'mortise config list'".into(),
                "Use 'mortise init --force' to rewrite a default config".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidModel { .. } => ErrorCategory::UserError,
            Self::ModelNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// JSON error document for `--output-format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": "error",
            "exit_code": self.exit_code(),
            "error": self.to_string(),
            "path": self.path().map(|p| p.display().to_string()),
            "suggestions": self.suggestions(),
        })
    }

    fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ModelNotFound { path } | Self::InvalidModel { path, .. } => Some(path),
            Self::Core(core) => core.path(),
            _ => None,
        }
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, existing output).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortise_core::application::ApplicationError;
    use mortise_core::domain::DomainError;
    use std::io;

    fn core(err: impl Into<MortiseError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn existing_output_is_a_user_error() {
        let err = core(ApplicationError::FileAlreadyExists {
            path: PathBuf::from("/out/Widget.cs"),
        });
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("add-feature")));
    }

    #[test]
    fn missing_patch_target_is_not_found() {
        let err = core(ApplicationError::FileNotFound {
            path: PathBuf::from("/out/WidgetsController.cs"),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_template_parameter_is_configuration() {
        let err = core(DomainError::MissingParameter {
            template: "entity",
            field: "NAMESPACE".into(),
        });
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn io_failure_is_internal() {
        let err = CliError::IoError {
            message: "x".into(),
            source: io::Error::other("e"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn model_errors() {
        let missing = CliError::ModelNotFound {
            path: PathBuf::from("api.json"),
        };
        assert_eq!(missing.exit_code(), 3);

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let invalid = CliError::InvalidModel {
            path: PathBuf::from("api.json"),
            source,
        };
        assert_eq!(invalid.exit_code(), 2);
        assert!(invalid.suggestions().iter().any(|s| s.contains("projectBaseName")));
    }

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::InvalidInput {
            message: "bad".into(),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
        assert!(!err.format_plain(true).contains("--verbose"));
    }

    #[test]
    fn json_document_carries_path_and_code() {
        let err = core(ApplicationError::FileAlreadyExists {
            path: PathBuf::from("/out/Widget.cs"),
        });
        let json = err.to_json();
        assert_eq!(json["status"], "error");
        assert_eq!(json["exit_code"], 2);
        assert_eq!(json["path"], "/out/Widget.cs");
    }
}
