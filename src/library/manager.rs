// Playlister - Playlist catalogue, current selection and undo history

use crate::config::Config;
use crate::library::storage::{ListStore, StorageError};
use crate::playlist::model::{EditModel, PlaylistError};
use crate::playlist::types::{Playlist, Song};
use crate::transaction::trait_def::lock_model;
use crate::transaction::{
    AddSongTransaction, DeleteSongTransaction, EditSongTransaction, MoveSongTransaction,
    SharedModel, TransactionError, TransactionStack,
};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A playlist shared between the session and the transactions editing it
pub type SharedPlaylist = SharedModel<Playlist>;

/// Library error types
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("No playlist is selected")]
    NoListSelected,

    #[error("Playlist {0} not found")]
    ListNotFound(Uuid),

    #[error("Playlist name cannot be empty")]
    InvalidName,

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<PlaylistError> for LibraryError {
    fn from(e: PlaylistError) -> Self {
        LibraryError::Transaction(e.into())
    }
}

/// Which toolbar buttons are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarState {
    pub add_song: bool,
    pub undo: bool,
    pub redo: bool,
    pub close: bool,
}

/// Sidebar entry for one playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub id: Uuid,
    pub name: String,
    pub song_count: usize,
}

/// Editing session over a catalogue of playlists
///
/// Song edits on the current list go through the TransactionStack and can be
/// undone. List-level operations (create, rename, delete) are not undoable.
/// Switching or closing the current list discards the undo history, since
/// it only makes sense against the list it was recorded on.
pub struct Playlister {
    lists: Vec<SharedPlaylist>,
    current: Option<SharedPlaylist>,
    transactions: TransactionStack,
    store: Option<ListStore>,
}

impl Playlister {
    /// Create an in-memory session with no backing store
    pub fn new() -> Self {
        Self {
            lists: Vec::new(),
            current: None,
            transactions: TransactionStack::new(),
            store: None,
        }
    }

    /// Open a session over the lists held by `store`
    pub fn open(store: ListStore, transactions: TransactionStack) -> Result<Self, LibraryError> {
        let lists = store
            .load()?
            .into_iter()
            .map(|list| Arc::new(Mutex::new(list)))
            .collect();

        Ok(Self {
            lists,
            current: None,
            transactions,
            store: Some(store),
        })
    }

    /// Open a session using the storage path and history limit from `config`
    pub fn from_config(config: &Config) -> Result<Self, LibraryError> {
        let transactions = match config.history_limit {
            Some(limit) => TransactionStack::with_history_limit(limit),
            None => TransactionStack::new(),
        };
        Self::open(ListStore::new(&config.storage_path), transactions)
    }

    fn find(&self, id: Uuid) -> Result<SharedPlaylist, LibraryError> {
        for list in &self.lists {
            if lock_model(list)?.id == id {
                return Ok(list.clone());
            }
        }
        Err(LibraryError::ListNotFound(id))
    }

    fn current(&self) -> Result<&SharedPlaylist, LibraryError> {
        self.current.as_ref().ok_or(LibraryError::NoListSelected)
    }

    fn validate_name(name: &str) -> Result<String, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::InvalidName);
        }
        Ok(name.to_string())
    }

    // ---- List-level operations (not undoable) ----

    /// Create a new playlist and return its id
    pub fn add_new_list(&mut self, name: &str, songs: Vec<Song>) -> Result<Uuid, LibraryError> {
        let playlist = Playlist::with_songs(Self::validate_name(name)?, songs);
        let id = playlist.id;
        self.lists.push(Arc::new(Mutex::new(playlist)));
        log::debug!("Created playlist {}", id);
        Ok(id)
    }

    /// Make `id` the current playlist, discarding the undo history
    pub fn load_list(&mut self, id: Uuid) -> Result<(), LibraryError> {
        let list = self.find(id)?;
        log::info!("Loaded playlist \"{}\"", lock_model(&list)?.name);
        self.current = Some(list);
        self.transactions.clear_all();
        Ok(())
    }

    /// Unselect the current playlist, discarding the undo history
    pub fn close_list(&mut self) {
        self.current = None;
        self.transactions.clear_all();
    }

    /// Delete a playlist; closes it first if it is the current one
    pub fn delete_list(&mut self, id: Uuid) -> Result<(), LibraryError> {
        let list = self.find(id)?;
        if self
            .current
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &list))
        {
            self.close_list();
        }
        self.lists.retain(|l| !Arc::ptr_eq(l, &list));
        log::debug!("Deleted playlist {}", id);
        Ok(())
    }

    pub fn rename_list(&mut self, id: Uuid, name: &str) -> Result<(), LibraryError> {
        let name = Self::validate_name(name)?;
        let list = self.find(id)?;
        lock_model(&list)?.name = name;
        Ok(())
    }

    /// All playlists, sorted by name
    pub fn list_summaries(&self) -> Result<Vec<ListSummary>, LibraryError> {
        let mut summaries = Vec::with_capacity(self.lists.len());
        for list in &self.lists {
            let list = lock_model(list)?;
            summaries.push(ListSummary {
                id: list.id,
                name: list.name.clone(),
                song_count: list.len(),
            });
        }
        summaries.sort_by_key(|s| s.name.to_lowercase());
        Ok(summaries)
    }

    pub fn current_id(&self) -> Option<Uuid> {
        let current = self.current.as_ref()?;
        lock_model(current).ok().map(|list| list.id)
    }

    pub fn current_name(&self) -> Result<String, LibraryError> {
        Ok(lock_model(self.current()?)?.name.clone())
    }

    /// Snapshot of the songs in the current playlist
    pub fn current_songs(&self) -> Result<Vec<Song>, LibraryError> {
        Ok(lock_model(self.current()?)?.songs.clone())
    }

    // ---- Undoable song edits ----

    /// Append a placeholder song to the current playlist
    pub fn add_song(&mut self) -> Result<(), LibraryError> {
        let transaction = AddSongTransaction::new(self.current()?.clone());
        self.transactions.execute(Box::new(transaction))?;
        Ok(())
    }

    /// Delete the song at `index` from the current playlist
    pub fn delete_song(&mut self, index: usize) -> Result<(), LibraryError> {
        let model = self.current()?.clone();
        let song = Self::song_snapshot(&model, index)?;
        let transaction = DeleteSongTransaction::new(model, song, index);
        self.transactions.execute(Box::new(transaction))?;
        Ok(())
    }

    /// Replace the details of the song at `index`
    pub fn edit_song(&mut self, index: usize, updated: Song) -> Result<(), LibraryError> {
        let model = self.current()?.clone();
        let original = Self::song_snapshot(&model, index)?;
        let transaction = EditSongTransaction::in_place(model, index, original, updated);
        self.transactions.execute(Box::new(transaction))?;
        Ok(())
    }

    /// Move a song within the current playlist
    ///
    /// Both positions must be in range. Returns `false` without recording
    /// anything when `from == to`.
    pub fn move_song(&mut self, from: usize, to: usize) -> Result<bool, LibraryError> {
        let model = self.current()?.clone();
        {
            let list = lock_model(&model)?;
            let len = list.len();
            if let Some(index) = [from, to].into_iter().find(|&i| i >= len) {
                return Err(PlaylistError::IndexOutOfRange { index, len }.into());
            }
        }
        if from == to {
            return Ok(false);
        }
        let transaction = MoveSongTransaction::new(model, from, to);
        self.transactions.execute(Box::new(transaction))?;
        Ok(true)
    }

    fn song_snapshot(model: &SharedPlaylist, index: usize) -> Result<Song, LibraryError> {
        let list = lock_model(model)?;
        let song = list
            .song_at(index)
            .cloned()
            .ok_or(PlaylistError::IndexOutOfRange {
                index,
                len: list.len(),
            })?;
        Ok(song)
    }

    pub fn undo(&mut self) -> Result<Option<String>, LibraryError> {
        Ok(self.transactions.undo()?)
    }

    pub fn redo(&mut self) -> Result<Option<String>, LibraryError> {
        Ok(self.transactions.redo()?)
    }

    pub fn undo_size(&self) -> usize {
        self.transactions.undo_size()
    }

    pub fn redo_size(&self) -> usize {
        self.transactions.redo_size()
    }

    pub fn transactions(&self) -> &TransactionStack {
        &self.transactions
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        let selected = self.current.is_some();
        ToolbarState {
            add_song: selected,
            undo: selected && self.transactions.can_undo(),
            redo: selected && self.transactions.can_redo(),
            close: selected,
        }
    }

    // ---- Persistence ----

    /// Snapshot of every playlist, in creation order
    pub fn playlists(&self) -> Result<Vec<Playlist>, LibraryError> {
        let mut playlists = Vec::with_capacity(self.lists.len());
        for list in &self.lists {
            playlists.push(lock_model(list)?.clone());
        }
        Ok(playlists)
    }

    /// Write all playlists to the backing store, if there is one
    pub fn save(&self) -> Result<(), LibraryError> {
        match &self.store {
            Some(store) => Ok(store.save(&self.playlists()?)?),
            None => Ok(()),
        }
    }
}

impl Default for Playlister {
    fn default() -> Self {
        Self::new()
    }
}
