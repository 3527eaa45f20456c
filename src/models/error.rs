use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UndoErrorKind {
    NothingToUndo,
    DestinationOccupied,
    SourceMissing,
    NotFoundInTrash,
    TrashUnavailable,
    ListUpdateFailed,
    Io,
    Path,
    Trash,
    Config,
}

#[derive(Debug, Serialize)]
pub enum UndoError {
    NothingToUndo,
    DestinationOccupied(PathBuf),
    SourceMissing(PathBuf),
    NotFoundInTrash(String),
    TrashUnavailable(String),
    ListUpdateFailed(String),
    IoError(String),
    PathError(String),
    TrashError(String),
    ConfigError(String),
}

impl UndoError {
    pub fn kind(&self) -> UndoErrorKind {
        match self {
            UndoError::NothingToUndo => UndoErrorKind::NothingToUndo,
            UndoError::DestinationOccupied(_) => UndoErrorKind::DestinationOccupied,
            UndoError::SourceMissing(_) => UndoErrorKind::SourceMissing,
            UndoError::NotFoundInTrash(_) => UndoErrorKind::NotFoundInTrash,
            UndoError::TrashUnavailable(_) => UndoErrorKind::TrashUnavailable,
            UndoError::ListUpdateFailed(_) => UndoErrorKind::ListUpdateFailed,
            UndoError::IoError(_) => UndoErrorKind::Io,
            UndoError::PathError(_) => UndoErrorKind::Path,
            UndoError::TrashError(_) => UndoErrorKind::Trash,
            UndoError::ConfigError(_) => UndoErrorKind::Config,
        }
    }
}

impl std::error::Error for UndoError {}

impl fmt::Display for UndoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoError::NothingToUndo => write!(f, "Nothing to undo"),
            UndoError::DestinationOccupied(path) => {
                write!(f, "A file already exists at {}", path.display())
            }
            UndoError::SourceMissing(path) => write!(f, "File no longer exists: {}", path.display()),
            UndoError::NotFoundInTrash(name) => write!(f, "Could not find {} in the trash", name),
            UndoError::TrashUnavailable(msg) => write!(f, "Trash Unavailable: {}", msg),
            UndoError::ListUpdateFailed(msg) => write!(f, "List Update Failed: {}", msg),
            UndoError::IoError(msg) => write!(f, "IO Error: {}", msg),
            UndoError::PathError(msg) => write!(f, "Path Error: {}", msg),
            UndoError::TrashError(msg) => write!(f, "Trash Error: {}", msg),
            UndoError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl From<std::io::Error> for UndoError {
    fn from(err: std::io::Error) -> Self {
        UndoError::IoError(err.to_string())
    }
}

impl From<trash::Error> for UndoError {
    fn from(err: trash::Error) -> Self {
        UndoError::TrashError(err.to_string())
    }
}

impl From<serde_json::Error> for UndoError {
    fn from(err: serde_json::Error) -> Self {
        UndoError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(UndoError::NothingToUndo.kind(), UndoErrorKind::NothingToUndo);
        assert_eq!(
            UndoError::DestinationOccupied(PathBuf::from("/a/1.jpg")).kind(),
            UndoErrorKind::DestinationOccupied
        );
        let io: UndoError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert_eq!(io.kind(), UndoErrorKind::Io);
    }

    #[test]
    fn test_display_names_the_path() {
        let err = UndoError::SourceMissing(PathBuf::from("/b/2.jpg"));
        assert!(err.to_string().contains("/b/2.jpg"));
    }
}
