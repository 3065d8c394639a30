pub mod disk;
pub mod memory;

pub use disk::DiskFileSystem;
pub use memory::MemoryFileSystem;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Filesystem capability consumed by the letter pipeline.
///
/// Listings return the full paths of direct children, sorted by name. Listing
/// a directory that does not exist fails with `LetterError::NotFound`.
pub trait FileSystem {
    fn current_dir(&self) -> Result<PathBuf>;

    /// Create `path` and any missing ancestors. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>>;

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> Result<()>;

    fn dir_exists(&self, path: &Path) -> bool;

    fn file_exists(&self, path: &Path) -> bool;

    /// Move a file. With `overwrite` an existing destination is replaced,
    /// otherwise the move fails with `LetterError::AlreadyExists`.
    fn move_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()>;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create or truncate `path` and write `contents`.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Append `contents`, creating the file if needed.
    fn append(&self, path: &Path, contents: &str) -> Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn current_dir(&self) -> Result<PathBuf> {
        (**self).current_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (**self).create_dir_all(path)
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_dirs(path)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_files(path)
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        (**self).remove_dir(path)
    }

    fn dir_exists(&self, path: &Path) -> bool {
        (**self).dir_exists(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }

    fn move_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        (**self).move_file(from, to, overwrite)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        (**self).write(path, contents)
    }

    fn append(&self, path: &Path, contents: &str) -> Result<()> {
        (**self).append(path, contents)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn current_dir(&self) -> Result<PathBuf> {
        (**self).current_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (**self).create_dir_all(path)
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_dirs(path)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_files(path)
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        (**self).remove_dir(path)
    }

    fn dir_exists(&self, path: &Path) -> bool {
        (**self).dir_exists(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }

    fn move_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        (**self).move_file(from, to, overwrite)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        (**self).write(path, contents)
    }

    fn append(&self, path: &Path, contents: &str) -> Result<()> {
        (**self).append(path, contents)
    }
}
