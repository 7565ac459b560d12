//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `mortise-adapters` implement
//! `FileSystem` and `TemplateProvider`; `Patcher` is implemented here by
//! `MarkerPatcher` and can be swapped on the orchestrator.

pub mod output;

pub use output::{FileSystem, PatchOutcome, Patcher, TemplateProvider};

#[cfg(test)]
pub use output::{MockFileSystem, MockTemplateProvider};
