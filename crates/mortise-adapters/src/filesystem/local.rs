//! Local filesystem adapter using std::fs.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::trace;

use mortise_core::{
    application::{ApplicationError, ports::FileSystem},
    error::{MortiseError, MortiseResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// `create_atomic` writes a sibling temp file and persists it without
/// clobbering, so readers see either nothing or the whole file.
#[derive(Debug, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> MortiseResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn open_read(&self, path: &Path) -> MortiseResult<Box<dyn BufRead + Send>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e, "open file"),
        })?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn create_atomic(&self, path: &Path, content: &str) -> MortiseResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::DirectoryNotFound {
                path: parent.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e, "create temp file"),
        })?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| map_io_error(path, e, "write file"))?;

        temp.persist_noclobber(path).map_err(|e| match e.error.kind() {
            io::ErrorKind::AlreadyExists => ApplicationError::FileAlreadyExists {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e.error, "persist file"),
        })?;
        trace!(path = %path.display(), "Persisted file");
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> MortiseResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> MortiseResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(to, e, "rename file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> MortiseError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn create_atomic_writes_full_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Widget.cs");
        let fs = LocalFileSystem::new();

        fs.create_atomic(&path, "class Widget {}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class Widget {}\n");
        // Only the target remains; the temp file was persisted, not copied.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn create_atomic_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Widget.cs");
        std::fs::write(&path, "original").unwrap();

        let err = LocalFileSystem::new()
            .create_atomic(&path, "replacement")
            .unwrap_err();
        assert!(matches!(
            err,
            MortiseError::Application(ApplicationError::FileAlreadyExists { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn create_atomic_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("Widget.cs");
        let err = LocalFileSystem::new().create_atomic(&path, "x").unwrap_err();
        assert!(matches!(
            err,
            MortiseError::Application(ApplicationError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn open_read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = LocalFileSystem::new()
            .open_read(&dir.path().join("nope.cs"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            MortiseError::Application(ApplicationError::FileNotFound { .. })
        ));
    }

    #[test]
    fn rename_replaces_target() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.tmp");
        let to = dir.path().join("a.cs");
        std::fs::write(&from, "new").unwrap();
        std::fs::write(&to, "old").unwrap();

        let fs = LocalFileSystem::new();
        fs.rename(&from, &to).unwrap();

        let mut content = String::new();
        fs.open_read(&to).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "new");
        assert!(!fs.exists(&from));
    }
}
