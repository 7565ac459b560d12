//! Application layer errors.
//!
//! These are file-system and orchestration failures. Model and template
//! problems are `DomainError` from `crate::domain`.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Create-mode target is already on disk. Scaffolding never overwrites.
    #[error("File already exists: {path}")]
    FileAlreadyExists { path: PathBuf },

    /// Patch-mode target's directory is missing.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Patch-mode target is missing.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A shared adapter lock was poisoned by a panicking thread.
    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: &'static str },
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Filesystem {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileAlreadyExists { path } => vec![
                format!("{} was generated by an earlier run", path.display()),
                "Delete the partial output or use an empty --root before re-running".into(),
                "To extend existing files use add-property, add-feature or add-consumer".into(),
            ],
            Self::DirectoryNotFound { path } | Self::FileNotFound { path } => vec![
                format!("Expected an existing file at {}", path.display()),
                "Incremental commands only edit files created by `mortise scaffold`".into(),
                "Check --root and the project base name".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::LockPoisoned { .. } => vec!["An earlier operation panicked; retry the run".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileAlreadyExists { .. } => ErrorCategory::Conflict,
            Self::DirectoryNotFound { .. } | Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::Filesystem { .. } | Self::LockPoisoned { .. } => ErrorCategory::Internal,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileAlreadyExists { path }
            | Self::DirectoryNotFound { path }
            | Self::FileNotFound { path }
            | Self::Filesystem { path, .. } => Some(path),
            Self::LockPoisoned { .. } => None,
        }
    }
}
