pub mod models;
pub mod systems;
pub mod utils;

pub use models::{
    Action, ActionLog, ConfigManager, LoggedAction, Result, TrashEntry, UndoConfig, UndoError,
    UndoErrorKind, UndoEvent, UndoObserver,
};
pub use systems::browser::MediaBrowser;
pub use systems::file_ops::{DeleteOutcome, FileOperator, FsOperator};
pub use systems::navigator::{FileList, FileNavigator};
pub use systems::trash::{SystemTrash, TrashResolver};
pub use systems::undo::{UndoManager, UndoState};

/// Routes `log` output through env_logger, defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }

    #[test]
    fn test_public_surface_drives_an_undo() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.jpg");
        let target_dir = dir.path().join("sorted");
        std::fs::write(&source, b"x").unwrap();
        std::fs::create_dir(&target_dir).unwrap();

        let mut nav = FileNavigator::new();
        nav.set_files(vec![source.clone()], 0);
        let mut manager = UndoManager::with_defaults(UndoConfig::default());

        let copied = manager.copy(&source, &target_dir, nav.current_index()).unwrap();
        assert_eq!(copied, target_dir.join("a.jpg"));
        assert!(manager.can_undo());

        let restored: Option<PathBuf> = manager.undo_last(&mut nav).unwrap();
        assert!(restored.is_none());
        assert!(!copied.exists());
        assert_eq!(manager.active_count(), 0);
    }
}
