use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::models::{Result, UndoError};
use crate::utils::path_security::{validate_file_path, validate_path};
use crate::utils::transfer::{copy_into, move_path};
use crate::utils::{numbered_file_name, strip_copy_suffix};

/// Where a deleted file ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Trashed,
    /// The trash refused it and the permanent fallback removed it.
    RemovedPermanently,
    Failed,
}

impl DeleteOutcome {
    pub fn is_gone(self) -> bool {
        !matches!(self, DeleteOutcome::Failed)
    }
}

/// The raw file primitives the undo subsystem consumes. None of these know about history.
pub trait FileOperator {
    /// Moves a file to the platform trash, reporting whether it landed there.
    fn delete_to_trash(&self, path: &Path) -> DeleteOutcome;

    /// True only if the file is gone afterwards.
    fn delete(&self, path: &Path) -> bool {
        self.delete_to_trash(path).is_gone()
    }

    /// Copies `path` into `dest_dir` under a name that did not exist before the call.
    fn copy_to_unique_path(&self, path: &Path, dest_dir: &Path) -> Result<PathBuf>;

    /// Moves `path` into `dest_dir` under a name that did not exist before the call.
    fn move_to_unique_path(&self, path: &Path, dest_dir: &Path) -> Result<PathBuf>;

    /// Moves `from` to exactly `to`. Fails if `to` is occupied.
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Deletes without going through the trash.
    fn remove_permanently(&self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct FsOperator {
    pub permanent_delete_fallback: bool,
}

impl FsOperator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permanent_fallback(enabled: bool) -> Self {
        Self { permanent_delete_fallback: enabled }
    }

    /// Stem without any " (n)" suffix, plus the extension.
    fn base_name(source: &Path) -> Result<(String, Option<String>)> {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| UndoError::PathError(format!("Invalid source name: {}", source.display())))?;
        let ext = source.extension().map(|e| e.to_string_lossy().to_string());
        Ok((strip_copy_suffix(&stem), ext))
    }

    /// Creates the first free "name (n).ext" in `dest_dir`. The file is created
    /// exclusively so a name that appears after probing is skipped, not clobbered.
    fn create_unique_file(source: &Path, dest_dir: &Path) -> Result<(PathBuf, File)> {
        let (stem, ext) = Self::base_name(source)?;

        let mut counter = 0usize;
        loop {
            let candidate = dest_dir.join(numbered_file_name(&stem, ext.as_deref(), counter));
            counter += 1;
            if candidate.exists() {
                continue;
            }
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn unique_path(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
        let (stem, ext) = Self::base_name(source)?;

        let mut counter = 0usize;
        loop {
            let candidate = dest_dir.join(numbered_file_name(&stem, ext.as_deref(), counter));
            if !candidate.exists() {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}

impl FileOperator for FsOperator {
    fn delete_to_trash(&self, path: &Path) -> DeleteOutcome {
        let path = match validate_file_path(path) {
            Ok(p) => p,
            Err(e) => {
                warn!("Refusing to delete: {}", e);
                return DeleteOutcome::Failed;
            }
        };
        if !path.is_file() {
            warn!("Delete skipped, not a file: {}", path.display());
            return DeleteOutcome::Failed;
        }

        let outcome = match trash::delete(&path) {
            Ok(_) => {
                info!("Moved to trash: {}", path.display());
                DeleteOutcome::Trashed
            }
            Err(e) => {
                warn!("Trash failed for {}: {}", path.display(), e);
                if !self.permanent_delete_fallback {
                    return DeleteOutcome::Failed;
                }
                if let Err(e) = fs::remove_file(&path) {
                    warn!("Delete error for {}: {}", path.display(), e);
                    return DeleteOutcome::Failed;
                }
                info!("Deleted permanently: {}", path.display());
                DeleteOutcome::RemovedPermanently
            }
        };

        if path.exists() {
            DeleteOutcome::Failed
        } else {
            outcome
        }
    }

    fn copy_to_unique_path(&self, path: &Path, dest_dir: &Path) -> Result<PathBuf> {
        let source = validate_file_path(path)?;
        let dest_dir = validate_path(dest_dir)?;
        if !source.is_file() {
            return Err(UndoError::SourceMissing(source));
        }
        if !dest_dir.is_dir() {
            return Err(UndoError::PathError(format!("Not a directory: {}", dest_dir.display())));
        }

        let (target, file_out) = Self::create_unique_file(&source, &dest_dir)?;
        if let Err(e) = copy_into(&source, &target, file_out) {
            let _ = fs::remove_file(&target);
            return Err(e);
        }
        info!("Copied: {} to {}", source.display(), target.display());
        Ok(target)
    }

    fn move_to_unique_path(&self, path: &Path, dest_dir: &Path) -> Result<PathBuf> {
        let source = validate_file_path(path)?;
        let dest_dir = validate_path(dest_dir)?;
        if !source.is_file() {
            return Err(UndoError::SourceMissing(source));
        }
        if !dest_dir.is_dir() {
            return Err(UndoError::PathError(format!("Not a directory: {}", dest_dir.display())));
        }

        let target = Self::unique_path(&source, &dest_dir)?;
        move_path(&source, &target)?;
        Ok(target)
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        let from = validate_file_path(from)?;
        let to = validate_file_path(to)?;
        if !from.exists() {
            return Err(UndoError::SourceMissing(from));
        }
        if to.exists() {
            return Err(UndoError::DestinationOccupied(to));
        }
        move_path(&from, &to)
    }

    fn remove_permanently(&self, path: &Path) -> Result<()> {
        let path = validate_file_path(path)?;
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        info!("Deleted permanently: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::FileTimes;
    use tempfile::tempdir;

    #[test]
    fn test_copy_picks_first_free_name() {
        let src_dir = tempdir().unwrap();
        let dest_dir = tempdir().unwrap();
        let source = src_dir.path().join("photo.jpg");
        fs::write(&source, b"pixels").unwrap();
        fs::write(dest_dir.path().join("photo.jpg"), b"old").unwrap();
        fs::write(dest_dir.path().join("photo (1).jpg"), b"old").unwrap();

        let op = FsOperator::new();
        let copied = op.copy_to_unique_path(&source, dest_dir.path()).unwrap();

        assert_eq!(copied, dest_dir.path().join("photo (2).jpg"));
        assert_eq!(fs::read(&copied).unwrap(), b"pixels");
        assert_eq!(fs::read(dest_dir.path().join("photo.jpg")).unwrap(), b"old");
        assert!(source.exists());
    }

    #[test]
    fn test_copy_strips_existing_suffix() {
        let src_dir = tempdir().unwrap();
        let dest_dir = tempdir().unwrap();
        let source = src_dir.path().join("photo (3).jpg");
        fs::write(&source, b"pixels").unwrap();

        let copied = FsOperator::new().copy_to_unique_path(&source, dest_dir.path()).unwrap();
        assert_eq!(copied, dest_dir.path().join("photo.jpg"));
    }

    #[test]
    fn test_copy_preserves_modified_time() {
        let src_dir = tempdir().unwrap();
        let dest_dir = tempdir().unwrap();
        let source = src_dir.path().join("old.png");
        fs::write(&source, b"x").unwrap();
        let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000_000);
        let file = OpenOptions::new().write(true).open(&source).unwrap();
        file.set_times(FileTimes::new().set_modified(past)).unwrap();
        drop(file);

        let copied = FsOperator::new().copy_to_unique_path(&source, dest_dir.path()).unwrap();
        assert_eq!(fs::metadata(&copied).unwrap().modified().unwrap(), past);
    }

    #[test]
    fn test_copy_missing_source() {
        let dir = tempdir().unwrap();
        let err = FsOperator::new()
            .copy_to_unique_path(&dir.path().join("nope.jpg"), dir.path())
            .unwrap_err();
        assert!(matches!(err, UndoError::SourceMissing(_)));
    }

    #[test]
    fn test_copy_rejects_relative_paths() {
        let dir = tempdir().unwrap();
        let err = FsOperator::new()
            .copy_to_unique_path(Path::new("photo.jpg"), dir.path())
            .unwrap_err();
        assert!(matches!(err, UndoError::PathError(_)));
    }

    #[test]
    fn test_move_to_unique_path() {
        let src_dir = tempdir().unwrap();
        let dest_dir = tempdir().unwrap();
        let source = src_dir.path().join("clip.mp4");
        fs::write(&source, b"frames").unwrap();
        fs::write(dest_dir.path().join("clip.mp4"), b"other").unwrap();

        let moved = FsOperator::new().move_to_unique_path(&source, dest_dir.path()).unwrap();
        assert_eq!(moved, dest_dir.path().join("clip (1).mp4"));
        assert!(!source.exists());
        assert_eq!(fs::read(&moved).unwrap(), b"frames");
    }

    #[test]
    fn test_move_file_refuses_occupied_target() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("b.jpg");
        fs::write(&from, b"a").unwrap();
        fs::write(&to, b"b").unwrap();

        let err = FsOperator::new().move_file(&from, &to).unwrap_err();
        assert!(matches!(err, UndoError::DestinationOccupied(_)));
        assert_eq!(fs::read(&to).unwrap(), b"b");
        assert!(from.exists());
    }

    #[test]
    fn test_remove_permanently() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("gone.jpg");
        fs::write(&file, b"x").unwrap();
        FsOperator::new().remove_permanently(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_delete_missing_file_is_false() {
        let dir = tempdir().unwrap();
        assert!(!FsOperator::new().delete(&dir.path().join("absent.jpg")));
    }

    #[test]
    fn test_delete_relative_path_is_false() {
        assert!(!FsOperator::new().delete(Path::new("relative.jpg")));
    }

    #[test]
    fn test_delete_outcome_is_gone() {
        assert!(DeleteOutcome::Trashed.is_gone());
        assert!(DeleteOutcome::RemovedPermanently.is_gone());
        assert!(!DeleteOutcome::Failed.is_gone());
    }

    #[test]
    fn test_delete_to_trash_on_directory_fails() {
        let dir = tempdir().unwrap();
        assert_eq!(FsOperator::new().delete_to_trash(dir.path()), DeleteOutcome::Failed);
    }
}
