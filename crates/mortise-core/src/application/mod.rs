//! Application layer for Mortise.
//!
//! This layer contains:
//! - **Services**: the renderer, file writer, marker patcher and the
//!   orchestrator that sequences them
//! - **Ports**: traits for the file system, template bodies and patching
//! - **Report**: the explicit record of what a run created or patched
//! - **Errors**: file-system and orchestration failures
//!
//! Naming, paths and tree construction live in `crate::domain`; this layer
//! only decides the order in which artifacts are rendered and written.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{FileWriter, MarkerPatcher, ScaffoldService, TemplateRenderer};

// Re-export port traits (for adapter implementation)
pub use ports::{FileSystem, PatchOutcome, Patcher, TemplateProvider};

pub use error::ApplicationError;
pub use report::{FileChange, ScaffoldReport};
