//! Filesystem access used by the build phases.
//!
//! Everything that touches disk goes through [`Storage`], so the transform
//! logic can run against an in-memory tree in tests.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File operations needed by the extractor and the processor.
pub trait Storage {
    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Open a file for streaming reads.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Returns true if `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Copy `from` to `to` verbatim, creating parent directories of `to`.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, creating parent directories.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Remove a directory tree. A missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Recursively list files under `root` with the given extension,
    /// sorted by file name within each directory. A missing root has no files.
    fn list_files(&self, root: &Path, extension: &str) -> io::Result<Vec<PathBuf>>;
}

/// [`Storage`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(std::fs::File::open(path)?))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(from, to)?;
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        match std::fs::remove_dir_all(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn list_files(&self, root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if !root.exists() {
            return Ok(files);
        }
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|e| e == extension) {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }
}
