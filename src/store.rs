//! Descriptor file access
//!
//! The engine never touches the filesystem directly; it goes through a
//! [`DescriptorStore`] injected at construction. The provided
//! [`FileStore`] replaces file content atomically (write to a sibling
//! temp file, then rename over the target), so a crash mid-write cannot
//! leave a truncated descriptor behind. No cross-process locking is
//! provided: concurrent writers are last-writer-wins.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, ErrorKind, Result};

/// File collaborator surface consumed by the engine
pub trait DescriptorStore {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<String>;
    /// Atomically replace the file's content
    fn replace(&self, path: &Path, content: &str) -> Result<()>;
}

/// Standard-filesystem store
#[derive(Clone, Copy, Debug, Default)]
pub struct FileStore;

impl DescriptorStore for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .map_err(|e| io_error(format!("read {}", path.display()), e))
    }

    fn replace(&self, path: &Path, content: &str) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| io_error(format!("create temp file in {}", dir.display()), e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| io_error(format!("write {}", path.display()), e))?;
        temp.persist(path)
            .map_err(|e| io_error(format!("replace {}", path.display()), e))?;
        Ok(())
    }
}

fn io_error(action: String, cause: impl Display) -> Error {
    Error::with_message(ErrorKind::Io { action }, format!("{cause}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("web.xml");
        let store = FileStore;
        assert!(!store.exists(&path));
        assert!(store.replace(&path, "<web-app/>").is_ok());
        assert!(store.exists(&path));
    }

    #[test]
    fn test_replace_overwrites() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("web.xml");
        let store = FileStore;
        store.replace(&path, "first").unwrap_or_else(|e| panic!("{e}"));
        store.replace(&path, "second").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(store.read(&path).unwrap_or_default(), "second");
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let store = FileStore;
        let err = store.read(Path::new("no/such/web.xml")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Io { .. }));
    }
}
