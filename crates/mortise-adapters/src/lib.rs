//! Infrastructure adapters for Mortise.
//!
//! This crate implements the ports defined in `mortise-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{FsOp, LocalFileSystem, MemoryFileSystem};
pub use templates::{BuiltinTemplates, DirectoryTemplates, TemplateLoadError};
