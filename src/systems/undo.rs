use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use log::{info, warn};
use crate::models::{
    Action, ActionLog, CopyAction, DeleteAction, LogObserver, LoggedAction, MoveAction, Result,
    UndoConfig, UndoError, UndoObserver,
};
use crate::systems::file_ops::{DeleteOutcome, FileOperator, FsOperator};
use crate::systems::navigator::{clamp_index, FileList};
use crate::systems::trash::{SystemTrash, TrashResolver};
use crate::utils::{file_name_lossy, shorten_for_display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UndoState {
    Idle,
    Compensating,
}

/// Records completed file operations and reverses the newest one on request.
///
/// Calls must be serialised by the caller. A popped action is gone whether or not
/// its compensation works; there is no retry and no redo.
pub struct UndoManager<T: TrashResolver = SystemTrash, E: FileOperator = FsOperator> {
    log: ActionLog,
    config: UndoConfig,
    trash: T,
    executor: E,
    observer: Box<dyn UndoObserver>,
    state: UndoState,
}

impl UndoManager {
    /// Platform trash, real file system, status text to the log.
    pub fn with_defaults(config: UndoConfig) -> Self {
        let executor = FsOperator::with_permanent_fallback(config.permanent_delete_fallback);
        Self::new(config, SystemTrash::new(), executor)
    }
}

impl<T: TrashResolver, E: FileOperator> UndoManager<T, E> {
    pub fn new(config: UndoConfig, trash: T, executor: E) -> Self {
        Self {
            log: ActionLog::with_capacity(config.effective_capacity()),
            config,
            trash,
            executor,
            observer: Box::new(LogObserver),
            state: UndoState::Idle,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn UndoObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn UndoObserver>) {
        self.observer = observer;
    }

    pub fn trash(&self) -> &T {
        &self.trash
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn config(&self) -> &UndoConfig {
        &self.config
    }

    pub fn state(&self) -> UndoState {
        self.state
    }

    pub fn can_undo(&self) -> bool {
        !self.log.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.log.len()
    }

    /// Newest first.
    pub fn history(&self) -> Vec<LoggedAction> {
        self.log.snapshot()
    }

    pub fn clear(&mut self) {
        if !self.log.is_empty() {
            self.log.clear();
            self.observer.on_undo_availability_changed(false);
        }
    }

    // Recording

    pub fn record_delete(&mut self, path: &Path, succeeded: bool, original_index: isize) {
        if !succeeded {
            return;
        }
        self.record(Action::Delete(DeleteAction {
            path: path.to_path_buf(),
            original_index,
        }));
    }

    pub fn record_move(&mut self, source_path: &Path, dest_path: &Path, succeeded: bool, original_index: isize) {
        if !succeeded {
            return;
        }
        self.record(Action::Move(MoveAction {
            source_path: source_path.to_path_buf(),
            dest_path: dest_path.to_path_buf(),
            original_index,
        }));
    }

    pub fn record_copy(&mut self, source_path: &Path, dest_path: &Path, succeeded: bool, original_index: isize) {
        if !succeeded {
            return;
        }
        self.record(Action::Copy(CopyAction {
            source_path: source_path.to_path_buf(),
            dest_path: dest_path.to_path_buf(),
            original_index,
        }));
    }

    fn record(&mut self, action: Action) {
        let was_empty = self.log.is_empty();
        let logged = LoggedAction::new(action);
        info!("Recorded {} of {}", logged.action.label(), logged.action.primary_path().display());
        if let Some(evicted) = self.log.push(logged) {
            info!("History full, dropped {} of {}", evicted.action.label(), evicted.action.primary_path().display());
        }
        if was_empty {
            self.observer.on_undo_availability_changed(true);
        }
    }

    // Tracked operations: run the primitive, record only on success

    /// Only a delete that landed in the trash is recorded; a permanent fallback removal
    /// has nothing to restore from.
    pub fn delete(&mut self, path: &Path, original_index: isize) -> bool {
        let outcome = self.executor.delete_to_trash(path);
        match outcome {
            DeleteOutcome::Trashed => self.observer.on_message("File moved to trash"),
            DeleteOutcome::RemovedPermanently => self
                .observer
                .on_message(&format!("Deleted permanently, cannot be undone: {}", file_name_lossy(path))),
            DeleteOutcome::Failed => {
                self.observer.on_message(&format!("Could not delete {}", file_name_lossy(path)))
            }
        }
        self.record_delete(path, outcome == DeleteOutcome::Trashed, original_index);
        outcome.is_gone()
    }

    pub fn copy(&mut self, path: &Path, dest_dir: &Path, original_index: isize) -> Result<PathBuf> {
        match self.executor.copy_to_unique_path(path, dest_dir) {
            Ok(target) => {
                self.observer.on_message(&format!("Copied to {}", shorten_for_display(&target)));
                self.record_copy(path, &target, true, original_index);
                Ok(target)
            }
            Err(e) => {
                self.observer.on_message(&format!("Copy failed: {}", e));
                Err(e)
            }
        }
    }

    pub fn move_to(&mut self, path: &Path, dest_dir: &Path, original_index: isize) -> Result<PathBuf> {
        match self.executor.move_to_unique_path(path, dest_dir) {
            Ok(target) => {
                self.observer.on_message(&format!("Moved to {}", shorten_for_display(&target)));
                self.record_move(path, &target, true, original_index);
                Ok(target)
            }
            Err(e) => {
                self.observer.on_message(&format!("Move failed: {}", e));
                Err(e)
            }
        }
    }

    // Undo

    /// Reverses the newest action. Returns the path put back into the list, if any.
    /// An empty log returns `NothingToUndo` without notifying anyone.
    pub fn undo_last(&mut self, list: &mut dyn FileList) -> Result<Option<PathBuf>> {
        let logged = self.log.pop_newest().ok_or(UndoError::NothingToUndo)?;

        info!(
            "Undoing {} of {} (recorded {})",
            logged.action.label(),
            logged.action.primary_path().display(),
            logged.timestamp
        );

        self.state = UndoState::Compensating;
        let result = match &logged.action {
            Action::Delete(action) => self.undo_delete(action, list),
            Action::Move(action) => self.undo_move(action, list),
            Action::Copy(action) => self.undo_copy(action, list),
        };
        self.state = UndoState::Idle;

        if let Err(e) = &result {
            warn!("Undo of {} failed: {}", logged.action.label(), e);
            self.observer.on_message(&e.to_string());
        }
        if self.log.is_empty() {
            self.observer.on_undo_availability_changed(false);
        }
        result
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if !self.config.create_missing_parents {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn insert_into_list(&self, list: &mut dyn FileList, path: &Path, original_index: isize) -> Result<usize> {
        let index = clamp_index(original_index, list.files().len());
        list.insert_at(index, path.to_path_buf())
            .map_err(|e| UndoError::ListUpdateFailed(format!("{}: {}", path.display(), e)))
    }

    fn undo_delete(&mut self, action: &DeleteAction, list: &mut dyn FileList) -> Result<Option<PathBuf>> {
        let path = &action.path;
        let name = file_name_lossy(path);
        if path.exists() {
            return Err(UndoError::DestinationOccupied(path.clone()));
        }

        let matches = self.trash.find_by_name(&name)?;
        // Several entries may share the name; the first one wins
        let entry = matches
            .first()
            .ok_or_else(|| UndoError::NotFoundInTrash(name.clone()))?;

        self.observer.on_message(&format!("Restoring file: {}", name));
        self.ensure_parent(path)?;
        self.trash.restore(entry, path)?;

        if let Err(e) = self.insert_into_list(list, path, action.original_index) {
            self.observer.on_message(&format!("File restored but not added to the list: {}", name));
            return Err(e);
        }
        self.observer.on_message(&format!("File restored: {}", name));
        Ok(Some(path.clone()))
    }

    fn undo_move(&mut self, action: &MoveAction, list: &mut dyn FileList) -> Result<Option<PathBuf>> {
        if !action.dest_path.exists() {
            return Err(UndoError::SourceMissing(action.dest_path.clone()));
        }
        if action.source_path.exists() {
            return Err(UndoError::DestinationOccupied(action.source_path.clone()));
        }

        self.ensure_parent(&action.source_path)?;
        self.executor.move_file(&action.dest_path, &action.source_path)?;
        self.insert_into_list(list, &action.source_path, action.original_index)?;

        self.observer.on_message(&format!("Moved back: {}", file_name_lossy(&action.source_path)));
        Ok(Some(action.source_path.clone()))
    }

    fn undo_copy(&mut self, action: &CopyAction, list: &mut dyn FileList) -> Result<Option<PathBuf>> {
        if !action.dest_path.exists() {
            return Err(UndoError::SourceMissing(action.dest_path.clone()));
        }

        // Irreversible, and not logged
        self.executor.remove_permanently(&action.dest_path)?;

        if action.source_path.exists() {
            list.select(&action.source_path);
        }

        self.observer.on_message(&format!("Copy removed: {}", shorten_for_display(&action.dest_path)));
        Ok(None)
    }
}
