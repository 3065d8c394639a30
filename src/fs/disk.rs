use crate::error::{LetterError, Result};
use crate::fs::FileSystem;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `FileSystem` backed by the real disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl DiskFileSystem {
    pub fn new() -> Self {
        Self
    }

    fn list_entries(&self, path: &Path, want_dirs: bool) -> Result<Vec<PathBuf>> {
        if !path.is_dir() {
            return Err(LetterError::not_found(path));
        }

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| LetterError::Io(e.into()))?;
            // Classify by target so symlinked letters are listed too
            let path = entry.path();
            if (want_dirs && path.is_dir()) || (!want_dirs && path.is_file()) {
                entries.push(entry.into_path());
            }
        }

        Ok(entries)
    }

    fn copy_and_remove(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to)?;

        // Keep the letter's original timestamp on the archived copy
        if let Ok(modified) = fs::metadata(from).and_then(|m| m.modified()) {
            let _ = filetime::set_file_mtime(to, filetime::FileTime::from_system_time(modified));
        }

        fs::remove_file(from)
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> LetterError + '_ {
    move |e| {
        if e.kind() == io::ErrorKind::NotFound {
            LetterError::not_found(path)
        } else {
            LetterError::Io(e)
        }
    }
}

impl FileSystem for DiskFileSystem {
    fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir().map_err(LetterError::Io)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(LetterError::Io)
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.list_entries(path, true)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.list_entries(path, false)
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        fs::remove_dir(path).map_err(io_error(path))
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn move_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        if !from.is_file() {
            return Err(LetterError::not_found(from));
        }

        if to.exists() {
            if !overwrite {
                return Err(LetterError::AlreadyExists {
                    path: to.display().to_string(),
                });
            }
            fs::remove_file(to).map_err(io_error(to))?;
        }

        if fs::rename(from, to).is_ok() {
            return Ok(());
        }

        // rename cannot cross filesystems; fall back to copy + delete
        self.copy_and_remove(from, to).map_err(io_error(to))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(io_error(path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(io_error(path))
    }

    fn append(&self, path: &Path, contents: &str) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error(path))?;

        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
