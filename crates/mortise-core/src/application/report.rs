//! Run report: the ordered list of files a scaffold run touched.
//!
//! Returned by every orchestrator operation instead of being collected in
//! shared state, so parallel runs (and parallel tests) never see each
//! other's entries.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::ports::PatchOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileChange {
    Created {
        path: PathBuf,
    },
    Patched {
        path: PathBuf,
        inserted: usize,
        unmatched_markers: Vec<String>,
    },
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created { path } | Self::Patched { path, .. } => path,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    changes: Vec<FileChange>,
}

impl ScaffoldReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self, path: impl Into<PathBuf>) {
        self.changes.push(FileChange::Created { path: path.into() });
    }

    pub fn record_patch(&mut self, outcome: PatchOutcome) {
        self.changes.push(FileChange::Patched {
            path: outcome.path,
            inserted: outcome.inserted,
            unmatched_markers: outcome.unmatched,
        });
    }

    pub fn changes(&self) -> &[FileChange] {
        &self.changes
    }

    pub fn created(&self) -> impl Iterator<Item = &Path> {
        self.changes
            .iter()
            .filter(|c| c.is_created())
            .map(FileChange::path)
    }

    pub fn patched(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter().filter(|c| !c.is_created())
    }

    /// Patches where at least one marker was not found.
    pub fn warnings(&self) -> impl Iterator<Item = (&Path, &[String])> {
        self.changes.iter().filter_map(|c| match c {
            FileChange::Patched {
                path,
                unmatched_markers,
                ..
            } if !unmatched_markers.is_empty() => Some((path.as_path(), unmatched_markers.as_slice())),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
