use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAction {
    pub path: PathBuf,
    pub original_index: isize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveAction {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    pub original_index: isize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyAction {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    pub original_index: isize,
}

/// A file operation that has already succeeded and may be compensated later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    Delete(DeleteAction),
    Move(MoveAction),
    Copy(CopyAction),
}

impl Action {
    pub fn original_index(&self) -> isize {
        match self {
            Action::Delete(a) => a.original_index,
            Action::Move(a) => a.original_index,
            Action::Copy(a) => a.original_index,
        }
    }

    /// The path the user would recognise the action by.
    pub fn primary_path(&self) -> &Path {
        match self {
            Action::Delete(a) => &a.path,
            Action::Move(a) => &a.source_path,
            Action::Copy(a) => &a.dest_path,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Delete(_) => "delete",
            Action::Move(_) => "move",
            Action::Copy(_) => "copy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedAction {
    pub id: String,
    // Diagnostics only, the log is ordered by insertion.
    pub timestamp: DateTime<Utc>,
    pub action: Action,
}

impl LoggedAction {
    pub fn new(action: Action) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            action,
        }
    }
}
