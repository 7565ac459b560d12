//! User template overrides loaded from a directory.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── controller.tmpl          ← replaces the built-in `controller` body
//! ├── endpoints/
//! │   └── endpoint-get-record.tmpl
//! └── README.md                ← ignored (not *.tmpl)
//! ```
//!
//! The file stem must be a template id (`TemplateId::name`). Files may sit
//! at any depth. Unknown stems are skipped with a warning; ids without an
//! override fall back to [`BuiltinTemplates`].

use std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use mortise_core::{
    application::{ApplicationError, ports::TemplateProvider},
    domain::TemplateId,
    error::{MortiseError, MortiseResult},
};

use super::BuiltinTemplates;

const EXTENSION: &str = "tmpl";

/// Failures while scanning an override directory.
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("template directory not found: {path}")]
    NotADirectory { path: PathBuf },

    #[error("failed to walk template directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<TemplateLoadError> for MortiseError {
    fn from(err: TemplateLoadError) -> Self {
        match err {
            TemplateLoadError::NotADirectory { path } => {
                ApplicationError::DirectoryNotFound { path }.into()
            }
            TemplateLoadError::Walk { path, source } => {
                ApplicationError::filesystem(path, source).into()
            }
            TemplateLoadError::Read { path, source } => {
                ApplicationError::filesystem(path, source).into()
            }
        }
    }
}

/// Overrides from disk, built-in bodies for everything else.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
    overrides: BTreeMap<TemplateId, String>,
    fallback: BuiltinTemplates,
}

impl DirectoryTemplates {
    /// Scan `dir` once; bodies are held in memory afterwards.
    ///
    /// Entries are visited in file-name order, so when two files share a
    /// stem the first one found wins.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, TemplateLoadError> {
        let root = dir.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(TemplateLoadError::NotADirectory { path: root });
        }

        let mut overrides = BTreeMap::new();
        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|source| TemplateLoadError::Walk {
                path: root.clone(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION)
            {
                continue;
            }

            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(TemplateId::from_name)
            else {
                warn!(path = %path.display(), "Ignoring template file with unknown id");
                continue;
            };
            if overrides.contains_key(&id) {
                warn!(template = %id, path = %path.display(), "Duplicate override ignored");
                continue;
            }

            let body = fs::read_to_string(path).map_err(|source| TemplateLoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(template = %id, path = %path.display(), "Loaded template override");
            overrides.insert(id, body);
        }

        info!(count = overrides.len(), "Loaded template overrides");
        Ok(Self {
            root,
            overrides,
            fallback: BuiltinTemplates,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ids whose body comes from disk, in id order.
    pub fn overridden(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.overrides.keys().copied()
    }
}

impl TemplateProvider for DirectoryTemplates {
    fn body(&self, id: TemplateId) -> MortiseResult<String> {
        match self.overrides.get(&id) {
            Some(body) => Ok(body.clone()),
            None => self.fallback.body(id),
        }
    }
}
