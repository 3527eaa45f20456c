use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::Path;
use log::{info, warn};
use crate::models::Result;

/// Copies content, permissions and access/modification times into an already open file.
pub fn copy_into(source: &Path, target: &Path, mut file_out: File) -> Result<()> {
    let mut file_in = File::open(source)?;
    io::copy(&mut file_in, &mut file_out)?;

    let metadata = file_in.metadata()?;
    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Err(e) = file_out.set_times(times) {
        warn!("Could not copy timestamps to {}: {}", target.display(), e);
    }
    drop(file_out);
    fs::set_permissions(target, metadata.permissions())?;
    Ok(())
}

/// Rename, falling back to copy + remove when the rename crosses volumes.
/// On failure the file is left only at `from`.
pub fn move_path(from: &Path, to: &Path) -> Result<()> {
    move_with(from, to, |a, b| fs::rename(a, b), |p| fs::remove_file(p))
}

fn move_with<R, D>(from: &Path, to: &Path, rename: R, remove: D) -> Result<()>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
    D: FnOnce(&Path) -> io::Result<()>,
{
    match rename(from, to) {
        Ok(_) => {
            info!("Fast-moved: {} to {}", from.display(), to.display());
            Ok(())
        }
        Err(rename_err) => {
            info!("Rename failed ({}), copying {} to {}", rename_err, from.display(), to.display());
            let file_out = OpenOptions::new().write(true).create_new(true).open(to)?;
            if let Err(e) = copy_into(from, to, file_out) {
                let _ = fs::remove_file(to);
                return Err(e);
            }
            if let Err(e) = remove(from) {
                warn!("Could not remove {} after copying, rolling back: {}", from.display(), e);
                let _ = fs::remove_file(to);
                return Err(e.into());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UndoError;
    use tempfile::tempdir;

    fn cross_device(_: &Path, _: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "cross-device link"))
    }

    #[test]
    fn test_move_path_renames() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("b.jpg");
        fs::write(&from, b"a").unwrap();

        move_path(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"a");
    }

    #[test]
    fn test_copy_fallback_when_rename_fails() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("b.jpg");
        fs::write(&from, b"a").unwrap();

        move_with(&from, &to, cross_device, |p| fs::remove_file(p)).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"a");
    }

    #[test]
    fn test_failed_source_removal_drops_the_copy() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("b.jpg");
        fs::write(&from, b"a").unwrap();

        let err = move_with(&from, &to, cross_device, |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"))
        })
        .unwrap_err();

        assert!(matches!(err, UndoError::IoError(_)));
        assert!(from.exists());
        assert!(!to.exists());
    }

    #[test]
    fn test_fallback_never_overwrites_target() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("b.jpg");
        fs::write(&from, b"a").unwrap();
        fs::write(&to, b"b").unwrap();

        assert!(move_with(&from, &to, cross_device, |p| fs::remove_file(p)).is_err());
        assert_eq!(fs::read(&to).unwrap(), b"b");
        assert!(from.exists());
    }
}
