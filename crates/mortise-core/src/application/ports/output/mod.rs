//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `mortise-adapters` crate provides implementations.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{MarkerRule, TemplateId};
use crate::error::MortiseResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `mortise_adapters::filesystem::LocalFileSystem` (production)
/// - `mortise_adapters::filesystem::MemoryFileSystem` (testing)
///
/// This is the only surface the core touches. Every call completes before
/// the next begins; adapters need no internal ordering guarantees beyond
/// that.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// True for both files and directories.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> MortiseResult<()>;

    /// Open an existing file for line-by-line reading.
    fn open_read(&self, path: &Path) -> MortiseResult<Box<dyn BufRead + Send>>;

    /// Write `content` to a new file in one step.
    ///
    /// Readers observe either no file or the complete content. Fails with
    /// `FileAlreadyExists` instead of replacing an existing file.
    fn create_atomic(&self, path: &Path, content: &str) -> MortiseResult<()>;

    fn remove_file(&self, path: &Path) -> MortiseResult<()>;

    /// Move `from` to `to`, replacing `to` if present.
    fn rename(&self, from: &Path, to: &Path) -> MortiseResult<()>;
}

/// Port for template bodies.
///
/// Implemented by:
/// - `mortise_adapters::templates::BuiltinTemplates` (compiled in)
/// - `mortise_adapters::templates::DirectoryTemplates` (user overrides)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateProvider: Send + Sync {
    /// Text-with-placeholders for `id`.
    fn body(&self, id: TemplateId) -> MortiseResult<String>;
}

/// Port for incremental edits to an existing file.
///
/// The default implementation matches marker substrings line by line;
/// callers only depend on this trait.
pub trait Patcher: Send + Sync {
    fn patch(&self, path: &Path, rules: &[MarkerRule]) -> MortiseResult<PatchOutcome>;
}

/// What one `patch` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub path: PathBuf,
    /// Number of insertions written (one per matching line per rule).
    pub inserted: usize,
    /// Markers of rules that matched no line.
    pub unmatched: Vec<String>,
}

impl PatchOutcome {
    /// Nothing matched; the file was left untouched.
    pub fn is_noop(&self) -> bool {
        self.inserted == 0
    }
}
