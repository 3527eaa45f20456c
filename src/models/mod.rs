pub mod error;
pub mod action;
pub mod history;
pub mod trash_entry;
pub mod events;
pub mod config;

pub use error::{UndoError, UndoErrorKind};
pub type Result<T> = std::result::Result<T, UndoError>;

pub use action::{Action, CopyAction, DeleteAction, LoggedAction, MoveAction};
pub use history::{ActionLog, DEFAULT_CAPACITY};
pub use trash_entry::TrashEntry;
pub use events::{ChannelObserver, FnObserver, LogObserver, NullObserver, UndoEvent, UndoObserver};
pub use config::{ConfigManager, UndoConfig};
