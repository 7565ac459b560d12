//! In-memory filesystem adapter for testing.
//!
//! Behaves like a strict local disk: files need an existing parent
//! directory, `create_atomic` never overwrites, and every mutating call is
//! appended to a journal so tests can assert the order of operations.

use std::{
    collections::{BTreeMap, BTreeSet},
    io::{BufRead, Cursor},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use mortise_core::{
    application::{ApplicationError, ports::FileSystem},
    error::MortiseResult,
};

/// One recorded call against a [`MemoryFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOp {
    CreateDir(PathBuf),
    Read(PathBuf),
    Create(PathBuf),
    Remove(PathBuf),
    Rename { from: PathBuf, to: PathBuf },
}

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    inner: Arc<RwLock<MemoryFileSystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFileSystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    journal: Vec<FsOp>,
    /// `create_atomic` fails for paths ending with this suffix.
    failing_suffix: Option<String>,
}

impl MemoryFileSystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        for dir in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            self.directories.insert(dir.to_path_buf());
        }
    }

    fn require_parent(&self, path: &Path) -> MortiseResult<()> {
        match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) if !self.directories.contains(parent) => {
                Err(ApplicationError::DirectoryNotFound {
                    path: parent.to_path_buf(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

impl MemoryFileSystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (and its directories) without journaling it.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(parent) = path.parent() {
                inner.add_ancestors(parent);
            }
            inner.files.insert(path, content.into());
        }
        self
    }

    /// Make every `create_atomic` whose path ends with `suffix` fail.
    pub fn fail_creates_ending_with(self, suffix: impl Into<String>) -> Self {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .failing_suffix = Some(suffix.into());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read_guard().ok()?.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_guard()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Every mutating or reading call so far, in order.
    pub fn journal(&self) -> Vec<FsOp> {
        self.read_guard()
            .map(|inner| inner.journal.clone())
            .unwrap_or_default()
    }

    pub fn clear_journal(&self) {
        if let Ok(mut inner) = self.write_guard() {
            inner.journal.clear();
        }
    }

    fn read_guard(&self) -> MortiseResult<RwLockReadGuard<'_, MemoryFileSystemInner>> {
        self.inner.read().map_err(|_| {
            ApplicationError::LockPoisoned {
                resource: "memory filesystem",
            }
            .into()
        })
    }

    fn write_guard(&self) -> MortiseResult<RwLockWriteGuard<'_, MemoryFileSystemInner>> {
        self.inner.write().map_err(|_| {
            ApplicationError::LockPoisoned {
                resource: "memory filesystem",
            }
            .into()
        })
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.read_guard()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> MortiseResult<()> {
        let mut inner = self.write_guard()?;
        inner.add_ancestors(path);
        inner.journal.push(FsOp::CreateDir(path.to_path_buf()));
        Ok(())
    }

    fn open_read(&self, path: &Path) -> MortiseResult<Box<dyn BufRead + Send>> {
        let mut inner = self.write_guard()?;
        let content = inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            })?;
        inner.journal.push(FsOp::Read(path.to_path_buf()));
        Ok(Box::new(Cursor::new(content.into_bytes())))
    }

    fn create_atomic(&self, path: &Path, content: &str) -> MortiseResult<()> {
        let mut inner = self.write_guard()?;

        if let Some(suffix) = &inner.failing_suffix {
            if path.to_string_lossy().ends_with(suffix.as_str()) {
                return Err(ApplicationError::filesystem(path, "injected write failure").into());
            }
        }
        if inner.files.contains_key(path) {
            return Err(ApplicationError::FileAlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.require_parent(path)?;

        inner.files.insert(path.to_path_buf(), content.to_string());
        inner.journal.push(FsOp::Create(path.to_path_buf()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> MortiseResult<()> {
        let mut inner = self.write_guard()?;
        if inner.files.remove(path).is_none() {
            return Err(ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.journal.push(FsOp::Remove(path.to_path_buf()));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> MortiseResult<()> {
        let mut inner = self.write_guard()?;
        inner.require_parent(to)?;
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| ApplicationError::FileNotFound {
                path: from.to_path_buf(),
            })?;
        inner.files.insert(to.to_path_buf(), content);
        inner.journal.push(FsOp::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortise_core::error::MortiseError;

    #[test]
    fn create_requires_parent_directory() {
        let fs = MemoryFileSystem::new();
        let err = fs.create_atomic(Path::new("/a/b.cs"), "x").unwrap_err();
        assert_eq!(
            err,
            MortiseError::Application(ApplicationError::DirectoryNotFound {
                path: PathBuf::from("/a"),
            })
        );

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.create_atomic(Path::new("/a/b.cs"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.cs")).as_deref(), Some("x"));
        assert!(fs.exists(Path::new("/a")));
    }

    #[test]
    fn create_never_overwrites() {
        let fs = MemoryFileSystem::new().with_file("/a/b.cs", "old");
        assert!(fs.create_atomic(Path::new("/a/b.cs"), "new").is_err());
        assert_eq!(fs.read_file(Path::new("/a/b.cs")).as_deref(), Some("old"));
    }

    #[test]
    fn journal_records_order() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/d")).unwrap();
        fs.create_atomic(Path::new("/d/t.tmp"), "x").unwrap();
        fs.rename(Path::new("/d/t.tmp"), Path::new("/d/f.cs")).unwrap();

        assert_eq!(
            fs.journal(),
            vec![
                FsOp::CreateDir("/d".into()),
                FsOp::Create("/d/t.tmp".into()),
                FsOp::Rename {
                    from: "/d/t.tmp".into(),
                    to: "/d/f.cs".into()
                },
            ]
        );
        assert_eq!(fs.list_files(), vec![PathBuf::from("/d/f.cs")]);
    }

    #[test]
    fn injected_failure_leaves_nothing_behind() {
        let fs = MemoryFileSystem::new()
            .with_file("/d/f.cs", "keep")
            .fail_creates_ending_with(".tmp");
        assert!(fs.create_atomic(Path::new("/d/x.tmp"), "y").is_err());
        assert_eq!(fs.list_files(), vec![PathBuf::from("/d/f.cs")]);
    }
}
