use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use crate::models::UndoConfig;
use crate::utils::compare_natural;

/// Lists the media files of a folder in natural order, ready for the navigator.
#[derive(Debug, Clone)]
pub struct MediaBrowser {
    extensions: Vec<String>,
}

impl Default for MediaBrowser {
    fn default() -> Self {
        Self::from_config(&UndoConfig::default())
    }
}

impl MediaBrowser {
    pub fn from_config(config: &UndoConfig) -> Self {
        Self {
            extensions: config
                .media_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn is_media(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }

    /// Unsorted. An unreadable or missing folder yields nothing.
    pub fn media_files(&self, folder: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read folder {}: {}", folder.display(), e);
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.is_media(path))
            .collect()
    }

    /// Naturally sorted media files plus the start index (-1 when there are none).
    pub fn process_folder(&self, folder: &Path) -> (Vec<PathBuf>, isize) {
        let mut files = self.media_files(folder);
        if files.is_empty() {
            debug!("No media files in {}", folder.display());
            return (files, -1);
        }
        files.sort_by(|a, b| {
            let a_name = a.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            let b_name = b.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            compare_natural(&a_name, &b_name)
        });
        (files, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::navigator::{FileList, FileNavigator};
    use tempfile::tempdir;

    #[test]
    fn test_process_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["img10.jpg", "img2.JPG", "notes.txt", "clip.mp4", "img1.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let (files, start) = MediaBrowser::default().process_folder(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["clip.mp4", "img1.png", "img2.JPG", "img10.jpg"]);
        assert_eq!(start, 0);

        let mut nav = FileNavigator::new();
        assert!(nav.set_files(files, start));
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let dir = tempdir().unwrap();
        let (files, start) = MediaBrowser::default().process_folder(&dir.path().join("gone"));
        assert!(files.is_empty());
        assert_eq!(start, -1);
    }

    #[test]
    fn test_custom_extensions() {
        let config = UndoConfig {
            media_extensions: vec![".RAW".to_string()],
            ..UndoConfig::default()
        };
        let browser = MediaBrowser::from_config(&config);
        assert!(browser.is_media(Path::new("/a/shot.raw")));
        assert!(!browser.is_media(Path::new("/a/shot.jpg")));
    }
}
