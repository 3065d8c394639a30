use crate::error::{LetterError, Result};
use crate::fs::FileSystem;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory `FileSystem` for tests and previews.
///
/// Directories and text files live in ordered maps, so listings come back
/// sorted. Parent directories must exist before a file is written into them,
/// matching the disk behaviour.
#[derive(Debug)]
pub struct MemoryFileSystem {
    current_dir: PathBuf,
    tree: RefCell<MemoryTree>,
}

#[derive(Debug, Default)]
struct MemoryTree {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryTree {
    fn add_dir_all(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn require_parent(&self, path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.dirs.contains(parent) => {
                Err(LetterError::not_found(parent))
            }
            _ => Ok(()),
        }
    }

    fn children<'a, I>(&self, path: &Path, entries: I) -> Result<Vec<PathBuf>>
    where
        I: Iterator<Item = &'a PathBuf>,
    {
        if !self.dirs.contains(path) {
            return Err(LetterError::not_found(path));
        }

        Ok(entries
            .filter(|entry| entry.parent() == Some(path))
            .cloned()
            .collect())
    }
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::with_current_dir("/")
    }

    pub fn with_current_dir<P: Into<PathBuf>>(current_dir: P) -> Self {
        Self {
            current_dir: current_dir.into(),
            tree: RefCell::new(MemoryTree::default()),
        }
    }

    /// Seed a directory (and its ancestors).
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> Self {
        self.tree.borrow_mut().add_dir_all(path.as_ref());
        self
    }

    /// Seed a file; its ancestors are created implicitly.
    pub fn with_file<P: AsRef<Path>, S: Into<String>>(self, path: P, contents: S) -> Self {
        {
            let path = path.as_ref();
            let mut tree = self.tree.borrow_mut();
            if let Some(parent) = path.parent() {
                tree.add_dir_all(parent);
            }
            tree.files.insert(path.to_path_buf(), contents.into());
        }
        self
    }

    pub fn file_count(&self) -> usize {
        self.tree.borrow().files.len()
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFileSystem {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if tree.files.contains_key(path) {
            return Err(LetterError::AlreadyExists {
                path: path.display().to_string(),
            });
        }
        tree.add_dir_all(path);
        Ok(())
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let tree = self.tree.borrow();
        tree.children(path, tree.dirs.iter())
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let tree = self.tree.borrow();
        tree.children(path, tree.files.keys())
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if !tree.dirs.contains(path) {
            return Err(LetterError::not_found(path));
        }

        let has_children = tree.dirs.iter().any(|d| d.parent() == Some(path))
            || tree.files.keys().any(|f| f.parent() == Some(path));
        if has_children {
            return Err(LetterError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("directory not empty: {}", path.display()),
            )));
        }

        tree.dirs.remove(path);
        Ok(())
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.tree.borrow().dirs.contains(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.tree.borrow().files.contains_key(path)
    }

    fn move_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if !tree.files.contains_key(from) {
            return Err(LetterError::not_found(from));
        }
        tree.require_parent(to)?;

        if tree.files.contains_key(to) && !overwrite {
            return Err(LetterError::AlreadyExists {
                path: to.display().to_string(),
            });
        }

        if let Some(contents) = tree.files.remove(from) {
            tree.files.insert(to.to_path_buf(), contents);
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.tree
            .borrow()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| LetterError::not_found(path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.require_parent(path)?;
        tree.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append(&self, path: &Path, contents: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.require_parent(path)?;
        tree.files
            .entry(path.to_path_buf())
            .or_default()
            .push_str(contents);
        Ok(())
    }
}
