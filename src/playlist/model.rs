// EditModel trait definition

use crate::playlist::types::Song;

/// Result type for playlist mutations
pub type PlaylistResult<T> = Result<T, PlaylistError>;

/// Errors raised by the playlist model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaylistError {
    #[error("Playlist is empty")]
    EmptyList,

    #[error("Index {index} out of range for playlist of {len} songs")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Mutations an undoable transaction may perform on a song list
///
/// Transactions never touch the song vector directly; they go through this
/// trait so that any list-like model can be driven by the transaction stack.
///
/// # Example
/// ```
/// use playlister::playlist::{EditModel, Playlist, Song};
///
/// let mut playlist = Playlist::new("Road Trip");
/// playlist.add_default_song();
/// playlist
///     .replace_song_at(0, Song::new("Africa", "Toto", "FTQbiNvZqaY"))
///     .unwrap();
///
/// assert_eq!(playlist.song_at(0).unwrap().title, "Africa");
/// ```
pub trait EditModel {
    /// Number of songs currently in the list
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Song at `index`, if any
    fn song_at(&self, index: usize) -> Option<&Song>;

    /// Append one song with placeholder details
    fn add_default_song(&mut self);

    /// Remove the song at the highest index
    fn delete_last_song(&mut self) -> PlaylistResult<Song>;

    /// Remove the song at `index`, shifting later songs down
    fn delete_song(&mut self, index: usize) -> PlaylistResult<Song>;

    /// Insert `song` at `index`, shifting later songs up
    ///
    /// `index == len()` appends.
    fn insert_song_at(&mut self, song: Song, index: usize) -> PlaylistResult<()>;

    /// Overwrite the fields of the song at `index` in place
    fn replace_song_at(&mut self, index: usize, song: Song) -> PlaylistResult<()>;

    /// Remove the song at `from` and reinsert it at `to`
    fn move_song(&mut self, from: usize, to: usize) -> PlaylistResult<()>;
}
