//! Create-mode writes.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::FileSystem},
    error::MortiseResult,
};

/// Creates new files; never overwrites.
#[derive(Clone)]
pub struct FileWriter {
    fs: Arc<dyn FileSystem>,
}

impl FileWriter {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Create `path` with `text`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// - `FileAlreadyExists` if `path` exists; the existing file is not read
    ///   or modified.
    /// - Any error from the file system port. The content is fully in
    ///   memory before the single `create_atomic` call, so a failure never
    ///   leaves a partially written file behind.
    #[instrument(skip(self, text), fields(path = %path.display(), bytes = text.len()))]
    pub fn create(&self, path: &Path, text: &str) -> MortiseResult<()> {
        if self.fs.exists(path) {
            return Err(ApplicationError::FileAlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent)?;
        }

        self.fs.create_atomic(path, text)?;
        info!("Created file");
        Ok(())
    }

    /// Create `path` unless it already exists. Returns whether it was created.
    pub fn create_if_absent(&self, path: &Path, text: &str) -> MortiseResult<bool> {
        if self.fs.exists(path) {
            return Ok(false);
        }
        self.create(path, text).map(|()| true)
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFileSystem;
    use crate::error::MortiseError;
    use mockall::Sequence;
    use std::path::PathBuf;

    #[test]
    fn existing_file_is_never_written() {
        let mut fs = MockFileSystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().never();
        fs.expect_create_atomic().never();

        let writer = FileWriter::new(Arc::new(fs));
        let err = writer.create(Path::new("/out/Widget.cs"), "x").unwrap_err();

        assert_eq!(
            err,
            MortiseError::Application(ApplicationError::FileAlreadyExists {
                path: PathBuf::from("/out/Widget.cs"),
            })
        );
    }

    #[test]
    fn creates_parent_then_file() {
        let mut seq = Sequence::new();
        let mut fs = MockFileSystem::new();
        fs.expect_exists()
            .withf(|path| path == Path::new("/out/a/Widget.cs"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(false);
        fs.expect_create_dir_all()
            .withf(|path| path == Path::new("/out/a"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_create_atomic()
            .withf(|path, content| path == Path::new("/out/a/Widget.cs") && content == "body")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let writer = FileWriter::new(Arc::new(fs));
        writer.create(Path::new("/out/a/Widget.cs"), "body").unwrap();
    }

    #[test]
    fn create_if_absent_skips_existing() {
        let mut fs = MockFileSystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_atomic().never();

        let writer = FileWriter::new(Arc::new(fs));
        assert!(!writer.create_if_absent(Path::new("/x"), "y").unwrap());
    }

    #[test]
    fn create_if_absent_writes_missing_file() {
        let mut fs = MockFileSystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_atomic().times(1).returning(|_, _| Ok(()));

        let writer = FileWriter::new(Arc::new(fs));
        assert!(writer.create_if_absent(Path::new("/out/Routes.cs"), "y").unwrap());
    }
}
