use std::path::Path;
use log::{info, warn};
use crate::models::{Result, TrashEntry, UndoError};
use crate::utils::transfer::move_path;

/// Read-only view over a recycle bin that can put items back.
pub trait TrashResolver {
    /// All entries whose display name matches `name`, ignoring case. Linear in the trash size.
    fn find_by_name(&self, name: &str) -> Result<Vec<TrashEntry>>;

    /// Restores `entry` so that it ends up at `target`.
    fn restore(&self, entry: &TrashEntry, target: &Path) -> Result<()>;
}

/// The platform recycle bin, through the `trash` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTrash;

impl SystemTrash {
    pub fn new() -> Self {
        Self
    }
}

/// What to do after the bin put an item back at `landed` when it was wanted at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    AtTarget,
    /// Landed elsewhere, move it over.
    Relocate,
    Missing,
}

#[cfg_attr(
    not(any(
        target_os = "windows",
        all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "android"))
    )),
    allow(dead_code)
)]
fn plan_landing(landed: &Path, target: &Path, landed_exists: bool, target_exists: bool) -> Landing {
    if target_exists {
        Landing::AtTarget
    } else if landed != target && landed_exists {
        Landing::Relocate
    } else {
        Landing::Missing
    }
}

/// Moves a restored item from where the bin left it onto `target`, across volumes if needed.
#[cfg_attr(
    not(any(
        target_os = "windows",
        all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "android"))
    )),
    allow(dead_code)
)]
fn settle_restored(name: &str, landed: &Path, target: &Path) -> Result<()> {
    match plan_landing(landed, target, landed.exists(), target.exists()) {
        Landing::AtTarget => Ok(()),
        Landing::Relocate => {
            info!("Fixing restore location: {} -> {}", landed.display(), target.display());
            move_path(landed, target)
        }
        Landing::Missing => {
            warn!("Restored {} but nothing landed at {}", name, target.display());
            Err(UndoError::TrashError(format!(
                "Restored item did not reach {}",
                target.display()
            )))
        }
    }
}

#[cfg(any(
    target_os = "windows",
    all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "android"))
))]
mod platform {
    use super::*;
    use std::path::PathBuf;

    fn entry_from_item(item: &trash::TrashItem) -> TrashEntry {
        let original_path = item.original_path();
        let mut name = original_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| original_path.to_string_lossy().to_string());

        // The shell sometimes reports shortcuts without their extension
        let trash_path = PathBuf::from(&item.id);
        if let Some(ext) = trash_path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();
            if (ext_str == "lnk" || ext_str == "url")
                && !name.to_lowercase().ends_with(&format!(".{}", ext_str))
            {
                name.push_str(&format!(".{}", ext_str));
            }
        }

        TrashEntry {
            name,
            original_path,
            id: trash_path.to_string_lossy().to_string(),
            deleted_time: item.time_deleted,
        }
    }

    pub(super) fn find_by_name(name: &str) -> Result<Vec<TrashEntry>> {
        let items = trash::os_limited::list()?;
        Ok(items
            .iter()
            .map(entry_from_item)
            .filter(|entry| entry.matches_name(name))
            .collect())
    }

    pub(super) fn restore(entry: &TrashEntry, target: &Path) -> Result<()> {
        let items = trash::os_limited::list()?;
        let item = items
            .into_iter()
            .find(|item| PathBuf::from(&item.id).to_string_lossy() == entry.id)
            .ok_or_else(|| UndoError::NotFoundInTrash(entry.name.clone()))?;

        // The bin restores to its own idea of the original path
        let landed = item.original_path();
        trash::os_limited::restore_all(vec![item])?;
        settle_restored(&entry.name, &landed, target)
    }
}

#[cfg(not(any(
    target_os = "windows",
    all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "android"))
)))]
mod platform {
    use super::*;

    const UNAVAILABLE: &str = "Trash restore is limited on this platform";

    pub(super) fn find_by_name(_name: &str) -> Result<Vec<TrashEntry>> {
        Err(UndoError::TrashUnavailable(UNAVAILABLE.to_string()))
    }

    pub(super) fn restore(_entry: &TrashEntry, _target: &Path) -> Result<()> {
        Err(UndoError::TrashUnavailable(UNAVAILABLE.to_string()))
    }
}

impl TrashResolver for SystemTrash {
    fn find_by_name(&self, name: &str) -> Result<Vec<TrashEntry>> {
        platform::find_by_name(name)
    }

    fn restore(&self, entry: &TrashEntry, target: &Path) -> Result<()> {
        platform::restore(entry, target)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_plan_landing() {
        let wanted = PathBuf::from("/photos/1.jpg");
        let elsewhere = PathBuf::from("/home/user/1.jpg");

        assert_eq!(plan_landing(&wanted, &wanted, true, true), Landing::AtTarget);
        assert_eq!(plan_landing(&elsewhere, &wanted, true, false), Landing::Relocate);
        assert_eq!(plan_landing(&elsewhere, &wanted, false, false), Landing::Missing);
        assert_eq!(plan_landing(&wanted, &wanted, false, false), Landing::Missing);
        // Something already at the target is never moved over
        assert_eq!(plan_landing(&elsewhere, &wanted, true, true), Landing::AtTarget);
    }

    #[test]
    fn test_settle_restored_moves_onto_target() {
        let dir = tempdir().unwrap();
        let landed = dir.path().join("old/1.jpg");
        let target = dir.path().join("1.jpg");
        fs::create_dir_all(landed.parent().unwrap()).unwrap();
        fs::write(&landed, b"x").unwrap();

        settle_restored("1.jpg", &landed, &target).unwrap();
        assert!(!landed.exists());
        assert_eq!(fs::read(&target).unwrap(), b"x");
    }

    #[test]
    fn test_settle_restored_reports_missing_item() {
        let dir = tempdir().unwrap();
        let landed = dir.path().join("old/1.jpg");
        let target = dir.path().join("1.jpg");

        let err = settle_restored("1.jpg", &landed, &target).unwrap_err();
        assert!(matches!(err, UndoError::TrashError(_)));
    }
}
