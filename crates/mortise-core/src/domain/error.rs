// ============================================================================
// domain/error.rs - MODEL AND TEMPLATE ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A template body references a placeholder its parameter record lacks.
    #[error("template '{template}' requires parameter '{field}' which was not supplied")]
    MissingParameter { template: &'static str, field: String },

    /// A model element lacks a field that one of its render branches needs.
    #[error("{element} is missing required field '{field}'")]
    MissingField { element: String, field: &'static str },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    #[error("entity '{name}' is not declared in the model")]
    UnknownEntity { name: String },

    #[error("no template body named '{name}'")]
    UnknownTemplate { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingParameter { template, field } => vec![
                format!("Template '{template}' uses {{{{{field}}}}} but the caller never set it"),
                "If you supplied a custom template directory, check the placeholder spelling"
                    .into(),
            ],
            Self::MissingField { element, field } => vec![
                format!("Add '{field}' to {element} in your model file"),
                "Features of type AddListByFk need parentEntity and batchPropertyName".into(),
            ],
            Self::UnknownEntity { name } => vec![
                format!("Declare '{name}' under `entities` in the model file"),
                "Entity names are case-sensitive".into(),
            ],
            Self::UnknownTemplate { name } => vec![
                format!("'{name}' does not match any built-in template id"),
                "Template override files must be named <template-id>.tmpl".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingParameter { .. } | Self::MissingField { .. } => {
                ErrorCategory::Configuration
            }
            Self::UnknownEntity { .. } => ErrorCategory::Validation,
            Self::UnknownTemplate { .. } => ErrorCategory::NotFound,
        }
    }
}
