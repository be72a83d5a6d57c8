// Playlist library: the editing session and its persistence
//
// Playlister owns every playlist, tracks which one is being edited and
// routes song edits through the TransactionStack. ListStore saves and
// loads the whole catalogue as a single JSON document.

pub mod manager;
pub mod storage;

pub use manager::{LibraryError, ListSummary, Playlister, SharedPlaylist, ToolbarState};
pub use storage::{ListStore, StorageError};
