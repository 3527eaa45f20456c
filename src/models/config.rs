use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use crate::models::history::DEFAULT_CAPACITY;
use crate::models::UndoError;

const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &[
    // Images
    "jpg", "jpeg", "png", "bmp", "tiff", "tif", "ico", "jfif", "jp2", "jpe", "jps", "tga",
    "heic", "heif", "avif",
    // Raw
    "cr2", "nef", "arw", "orf", "rw2", "dng", "pef", "raf", "srw", "crw", "raw", "kdc", "mrw",
    "dcr", "sr2", "3fr", "mef", "erf", "rwl", "mdc", "mos", "x3f", "bay", "nrw",
    // Animation
    "gif", "webp",
    // Video
    "mp4", "avi", "wav", "ts", "m2ts", "mov", "qt", "mkv", "flv", "webm", "3gp", "m4v", "mpg",
    "mpeg", "vob", "wmv",
    // Audio
    "mp3", "flac", "aac", "m4a", "ogg",
    // Design
    "psd",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UndoConfig {
    pub capacity: usize,
    pub create_missing_parents: bool,
    pub permanent_delete_fallback: bool,
    pub media_extensions: Vec<String>,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            create_missing_parents: true,
            permanent_delete_fallback: false,
            media_extensions: DEFAULT_MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl UndoConfig {
    pub fn effective_capacity(&self) -> usize {
        self.capacity.max(1)
    }
}

pub struct ConfigManager(pub Mutex<UndoConfig>);

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self(Mutex::new(UndoConfig::default()))
    }

    pub fn get(&self) -> Result<UndoConfig, UndoError> {
        self.0
            .lock()
            .map(|c| c.clone())
            .map_err(|_| UndoError::ConfigError("Failed to lock config".to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), UndoError> {
        let config = self.get()?;
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&config)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Missing file keeps the current values.
    pub fn load(&self, path: &Path) -> Result<(), UndoError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let loaded: UndoConfig = serde_json::from_str(&content)?;

            let mut config = self
                .0
                .lock()
                .map_err(|_| UndoError::ConfigError("Failed to lock config".to_string()))?;
            *config = loaded;
        }
        Ok(())
    }
}
