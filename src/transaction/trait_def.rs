// Transaction trait definition

use crate::playlist::model::PlaylistError;
use std::sync::{Arc, Mutex, MutexGuard};

/// Result type for transaction operations
pub type TransactionResult<T> = Result<T, TransactionError>;

/// Model handle a transaction holds for its whole lifetime
pub type SharedModel<M> = Arc<Mutex<M>>;

/// Errors that can occur while applying or reverting a transaction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// The captured index or song no longer matches the model
    #[error("Stale reference: {0}")]
    StaleReference(String),

    /// The model rejected the mutation
    #[error(transparent)]
    Model(#[from] PlaylistError),

    /// The model lock was poisoned by a panic elsewhere
    #[error("Playlist model is unavailable")]
    ModelUnavailable,
}

/// A reversible edit bound to a model
///
/// Implementations capture everything they need at construction time and
/// never mutate it afterwards, so `apply` and `revert` take `&self`.
///
/// # Thread Safety
/// Transactions must be Send as the stack owning them may be moved between threads.
///
/// # Example
/// ```
/// use playlister::playlist::{EditModel, Playlist};
/// use playlister::transaction::{SharedModel, Transaction, TransactionResult};
/// use std::sync::{Arc, Mutex};
///
/// struct RenameFirstSong {
///     model: SharedModel<Playlist>,
///     old_title: String,
///     new_title: String,
/// }
///
/// impl Transaction for RenameFirstSong {
///     fn apply(&self) -> TransactionResult<()> {
///         let mut playlist = self.model.lock().unwrap();
///         playlist.songs[0].title = self.new_title.clone();
///         Ok(())
///     }
///
///     fn revert(&self) -> TransactionResult<()> {
///         let mut playlist = self.model.lock().unwrap();
///         playlist.songs[0].title = self.old_title.clone();
///         Ok(())
///     }
///
///     fn description(&self) -> String {
///         format!("Rename to {}", self.new_title)
///     }
/// }
///
/// let mut playlist = Playlist::new("Demo");
/// playlist.add_default_song();
/// let model = Arc::new(Mutex::new(playlist));
///
/// let rename = RenameFirstSong {
///     model: model.clone(),
///     old_title: "Untitled".into(),
///     new_title: "Intro".into(),
/// };
/// rename.apply().unwrap();
/// assert_eq!(model.lock().unwrap().songs[0].title, "Intro");
/// ```
pub trait Transaction: Send {
    /// Perform the forward edit against the bound model
    fn apply(&self) -> TransactionResult<()>;

    /// Undo the most recent `apply`, restoring the model field for field
    fn revert(&self) -> TransactionResult<()>;

    /// Human-readable label (e.g., "Undo: Delete Song \"Africa\"")
    fn description(&self) -> String;
}

/// Lock the shared model, mapping a poisoned lock to `ModelUnavailable`
pub(crate) fn lock_model<M>(model: &SharedModel<M>) -> TransactionResult<MutexGuard<'_, M>> {
    model.lock().map_err(|_| TransactionError::ModelUnavailable)
}
