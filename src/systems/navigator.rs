use std::path::{Path, PathBuf};
use crate::models::Result;

/// The consumer's ordered file list, as seen by the undo subsystem.
pub trait FileList {
    fn files(&self) -> Vec<PathBuf>;

    /// -1 when the list is empty.
    fn current_index(&self) -> isize;

    /// Inserts `path` at `index` (clamped to `[0, len]`) and makes it current.
    /// If `path` is already listed it only becomes current. Returns its position.
    fn insert_at(&mut self, index: usize, path: PathBuf) -> Result<usize>;

    /// Moves the cursor to `path` if listed.
    fn select(&mut self, path: &Path) -> bool;
}

/// Clamps a recorded position hint into `[0, len]`.
pub fn clamp_index(hint: isize, len: usize) -> usize {
    if hint < 0 {
        0
    } else {
        (hint as usize).min(len)
    }
}

#[derive(Debug, Clone)]
pub struct FileNavigator {
    files: Vec<PathBuf>,
    current_index: isize,
    pub loop_navigation: bool,
}

impl Default for FileNavigator {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            current_index: -1,
            loop_navigation: false,
        }
    }
}

impl FileNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list. An out of range start falls back to 0. False for an empty list.
    pub fn set_files(&mut self, files: Vec<PathBuf>, start_index: isize) -> bool {
        if files.is_empty() {
            self.files.clear();
            self.current_index = -1;
            return false;
        }
        self.current_index = if start_index >= 0 && (start_index as usize) < files.len() {
            start_index
        } else {
            0
        };
        self.files = files;
        true
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn current_file(&self) -> Option<&Path> {
        if self.current_index < 0 {
            return None;
        }
        self.files.get(self.current_index as usize).map(PathBuf::as_path)
    }

    pub fn find_file_index(&self, path: &Path) -> Option<usize> {
        self.files.iter().position(|p| p == path)
    }

    pub fn next_file(&mut self) -> Option<&Path> {
        if self.files.is_empty() || self.current_index >= self.files.len() as isize - 1 {
            return None;
        }
        self.current_index += 1;
        self.current_file()
    }

    pub fn previous_file(&mut self) -> Option<&Path> {
        if self.files.is_empty() || self.current_index <= 0 {
            return None;
        }
        self.current_index -= 1;
        self.current_file()
    }

    /// Jumps to `index`, clamped to the list. None when the list is empty.
    pub fn go_to_index(&mut self, index: isize) -> Option<&Path> {
        if self.files.is_empty() {
            return None;
        }
        self.current_index = index.clamp(0, self.files.len() as isize - 1);
        self.current_file()
    }

    pub fn go_to_file(&mut self, path: &Path) -> Option<&Path> {
        let index = self.find_file_index(path)?;
        self.go_to_index(index as isize)
    }

    pub fn peek_next(&self) -> Option<&Path> {
        if self.files.is_empty() {
            return None;
        }
        let next = self.current_index + 1;
        if next as usize >= self.files.len() {
            return if self.loop_navigation { self.files.first().map(PathBuf::as_path) } else { None };
        }
        self.files.get(next as usize).map(PathBuf::as_path)
    }

    pub fn peek_previous(&self) -> Option<&Path> {
        if self.files.is_empty() {
            return None;
        }
        if self.current_index <= 0 {
            return if self.loop_navigation { self.files.last().map(PathBuf::as_path) } else { None };
        }
        self.files.get(self.current_index as usize - 1).map(PathBuf::as_path)
    }

    /// Drops the current entry from the list (not from disk). Returns the removed path.
    /// The cursor stays on the same slot, or the new last entry.
    pub fn remove_current(&mut self) -> Option<PathBuf> {
        if self.current_index < 0 || self.current_index as usize >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(self.current_index as usize);
        if self.files.is_empty() {
            self.current_index = -1;
        } else if self.current_index as usize >= self.files.len() {
            self.current_index = self.files.len() as isize - 1;
        }
        Some(removed)
    }

    /// Appends unless already listed, and makes it current.
    pub fn add_file(&mut self, path: PathBuf) -> usize {
        let index = self.files.len();
        self.insert_file(index, path)
    }

    pub fn insert_file(&mut self, index: usize, path: PathBuf) -> usize {
        let position = match self.find_file_index(&path) {
            Some(existing) => existing,
            None => {
                let index = index.min(self.files.len());
                self.files.insert(index, path);
                index
            }
        };
        self.current_index = position as isize;
        position
    }
}

impl FileList for FileNavigator {
    fn files(&self) -> Vec<PathBuf> {
        self.files.clone()
    }

    fn current_index(&self) -> isize {
        self.current_index
    }

    fn insert_at(&mut self, index: usize, path: PathBuf) -> Result<usize> {
        Ok(self.insert_file(index, path))
    }

    fn select(&mut self, path: &Path) -> bool {
        self.go_to_file(path).is_some()
    }
}
