//! Unified error handling for Mortise Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Mortise Core operations.
///
/// Every variant is fatal to a scaffold run: the orchestrator never retries
/// and never rolls back steps that already completed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MortiseError {
    /// Errors from the domain layer (model or template parameter problems).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (file system and orchestration).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl MortiseError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }

    /// The path the failing operation targeted, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Application(e) => e.path(),
            Self::Domain(_) => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MortiseResult<T> = Result<T, MortiseError>;
