use std::path::{Path, PathBuf};
use crate::models::UndoError;

/// Validates that a path is absolute.
/// The file list and the undo log only ever hold absolute paths, relative ones would
/// resolve differently once the working directory changes.
pub fn validate_path(path: &Path) -> Result<PathBuf, UndoError> {
    if !path.is_absolute() {
        return Err(UndoError::PathError(format!("Path must be absolute: {}", path.display())));
    }

    #[cfg_attr(not(target_os = "windows"), allow(unused_mut))]
    let mut path = path.to_path_buf();

    #[cfg(target_os = "windows")]
    {
        let mut needs_update = None;
        if let Some(file_name) = path.file_name() {
            let name_str = file_name.to_string_lossy();
            let trimmed_name = name_str.trim_end_matches(['.', ' ']);
            if (!trimmed_name.is_empty() || name_str.is_empty()) && trimmed_name != name_str {
                needs_update = Some(trimmed_name.to_string());
            }
        }
        if let Some(new_name) = needs_update {
            path.set_file_name(new_name);
        }
    }

    Ok(path)
}

/// Validates a path that must name a file inside some directory.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, UndoError> {
    let path = validate_path(path)?;
    if path.file_name().is_none() {
        return Err(UndoError::PathError(format!("Path has no file name: {}", path.display())));
    }
    Ok(path)
}
