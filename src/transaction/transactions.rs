// Concrete transaction implementations

use crate::playlist::model::EditModel;
use crate::playlist::types::Song;
use crate::transaction::trait_def::{
    SharedModel, Transaction, TransactionError, TransactionResult, lock_model,
};

/// Check that the model still holds `expected` at `index`
fn verify_song_at<M: EditModel>(model: &M, index: usize, expected: &Song) -> TransactionResult<()> {
    match model.song_at(index) {
        Some(song) if song == expected => Ok(()),
        Some(song) => Err(TransactionError::StaleReference(format!(
            "expected \"{}\" at index {}, found \"{}\"",
            expected.title, index, song.title
        ))),
        None => Err(TransactionError::StaleReference(format!(
            "index {} is past the end of a {}-song list",
            index,
            model.len()
        ))),
    }
}

/// Transaction that appends a placeholder song
///
/// Reverting removes the last song, which is only correct because the stack
/// reverts in strict LIFO order: nothing else can have changed the tail of
/// the list between apply and revert.
pub struct AddSongTransaction<M> {
    model: SharedModel<M>,
}

impl<M: EditModel> AddSongTransaction<M> {
    pub fn new(model: SharedModel<M>) -> Self {
        Self { model }
    }
}

impl<M: EditModel + Send> Transaction for AddSongTransaction<M> {
    fn apply(&self) -> TransactionResult<()> {
        lock_model(&self.model)?.add_default_song();
        Ok(())
    }

    fn revert(&self) -> TransactionResult<()> {
        let mut model = lock_model(&self.model)?;

        // An empty list falls through so the model reports EmptyList itself
        if let Some(last) = model.len().checked_sub(1) {
            verify_song_at(&*model, last, &Song::default_details())?;
        }
        model.delete_last_song()?;
        Ok(())
    }

    fn description(&self) -> String {
        "Add Song".to_string()
    }
}

/// Transaction that removes one song and can put it back where it was
pub struct DeleteSongTransaction<M> {
    model: SharedModel<M>,
    song: Song,
    index: usize,
}

impl<M: EditModel> DeleteSongTransaction<M> {
    /// Create a DeleteSongTransaction
    ///
    /// # Arguments
    /// * `song` - Full snapshot of the song being deleted
    /// * `index` - Its position at the time of deletion
    pub fn new(model: SharedModel<M>, song: Song, index: usize) -> Self {
        Self { model, song, index }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<M: EditModel + Send> Transaction for DeleteSongTransaction<M> {
    fn apply(&self) -> TransactionResult<()> {
        let mut model = lock_model(&self.model)?;
        verify_song_at(&*model, self.index, &self.song)?;
        model.delete_song(self.index)?;
        Ok(())
    }

    fn revert(&self) -> TransactionResult<()> {
        let mut model = lock_model(&self.model)?;
        model.insert_song_at(self.song.clone(), self.index)?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete Song \"{}\"", self.song.title)
    }
}

/// Transaction that overwrites a song's details
///
/// `apply` writes the new details at `new_index`, `revert` writes the
/// original details at `original_index`. The session always edits in place,
/// but the two indices are kept separate so either direction targets its
/// own position.
pub struct EditSongTransaction<M> {
    model: SharedModel<M>,
    original_index: usize,
    original: Song,
    new_index: usize,
    updated: Song,
}

impl<M: EditModel> EditSongTransaction<M> {
    pub fn new(
        model: SharedModel<M>,
        original_index: usize,
        original: Song,
        new_index: usize,
        updated: Song,
    ) -> Self {
        Self {
            model,
            original_index,
            original,
            new_index,
            updated,
        }
    }

    /// Edit that keeps the song at the same position
    pub fn in_place(model: SharedModel<M>, index: usize, original: Song, updated: Song) -> Self {
        Self::new(model, index, original, index, updated)
    }
}

impl<M: EditModel + Send> Transaction for EditSongTransaction<M> {
    fn apply(&self) -> TransactionResult<()> {
        let mut model = lock_model(&self.model)?;
        verify_song_at(&*model, self.original_index, &self.original)?;
        model.replace_song_at(self.new_index, self.updated.clone())?;
        Ok(())
    }

    fn revert(&self) -> TransactionResult<()> {
        let mut model = lock_model(&self.model)?;
        verify_song_at(&*model, self.new_index, &self.updated)?;
        model.replace_song_at(self.original_index, self.original.clone())?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Edit Song \"{}\"", self.original.title)
    }
}

/// Transaction that drags a song from one position to another
pub struct MoveSongTransaction<M> {
    model: SharedModel<M>,
    from: usize,
    to: usize,
}

impl<M: EditModel> MoveSongTransaction<M> {
    pub fn new(model: SharedModel<M>, from: usize, to: usize) -> Self {
        Self { model, from, to }
    }

    fn move_checked(&self, from: usize, to: usize) -> TransactionResult<()> {
        let mut model = lock_model(&self.model)?;
        let len = model.len();
        if from >= len || to >= len {
            return Err(TransactionError::StaleReference(format!(
                "cannot move {} to {} in a {}-song list",
                from, to, len
            )));
        }
        model.move_song(from, to)?;
        Ok(())
    }
}

impl<M: EditModel + Send> Transaction for MoveSongTransaction<M> {
    fn apply(&self) -> TransactionResult<()> {
        self.move_checked(self.from, self.to)
    }

    fn revert(&self) -> TransactionResult<()> {
        self.move_checked(self.to, self.from)
    }

    fn description(&self) -> String {
        format!("Move Song {} to {}", self.from + 1, self.to + 1)
    }
}
