//! Integration tests for the transaction stack driving a real playlist
//!
//! Covers the canonical add/delete/edit scenarios and randomized sequences
//! checking the round-trip and history-size laws.

use playlister::playlist::{EditModel, Playlist, Song};
use playlister::transaction::{
    AddSongTransaction, DeleteSongTransaction, EditSongTransaction, MoveSongTransaction,
    SharedModel, Transaction, TransactionStack,
};
use rand::Rng;
use std::sync::{Arc, Mutex};

fn shared(songs: Vec<Song>) -> SharedModel<Playlist> {
    Arc::new(Mutex::new(Playlist::with_songs("Integration", songs)))
}

fn songs_of(model: &SharedModel<Playlist>) -> Vec<Song> {
    model.lock().unwrap().songs.clone()
}

/// Build a random transaction that is valid against the model's current state
fn random_transaction(
    rng: &mut impl Rng,
    model: &SharedModel<Playlist>,
    counter: &mut u32,
) -> Box<dyn Transaction> {
    let songs = songs_of(model);
    let len = songs.len();
    *counter += 1;

    match rng.gen_range(0..4) {
        1 if len > 0 => {
            let index = rng.gen_range(0..len);
            Box::new(DeleteSongTransaction::new(
                model.clone(),
                songs[index].clone(),
                index,
            ))
        }
        2 if len > 0 => {
            let index = rng.gen_range(0..len);
            let updated = Song::new(
                format!("Title {}", counter),
                format!("Artist {}", counter),
                format!("id{}", counter),
            );
            Box::new(EditSongTransaction::in_place(
                model.clone(),
                index,
                songs[index].clone(),
                updated,
            ))
        }
        3 if len > 1 => {
            let from = rng.gen_range(0..len);
            let to = rng.gen_range(0..len);
            Box::new(MoveSongTransaction::new(model.clone(), from, to))
        }
        _ => Box::new(AddSongTransaction::new(model.clone())),
    }
}

/// Scenario A: add to an empty list, undo, redo
#[test]
fn test_add_song_undo_redo() {
    let model = shared(vec![]);
    let mut stack = TransactionStack::new();

    stack
        .execute(Box::new(AddSongTransaction::new(model.clone())))
        .unwrap();
    assert_eq!(songs_of(&model), vec![Song::default_details()]);

    stack.undo().unwrap();
    assert!(songs_of(&model).is_empty());

    stack.redo().unwrap();
    assert_eq!(songs_of(&model), vec![Song::default_details()]);
}

/// Scenario B: delete the first of two songs and undo
#[test]
fn test_delete_song_undo_restores_field_for_field() {
    let song_x = Song::new("Song X", "Artist X", "xxxxxxxxxxx");
    let song_y = Song::new("Song Y", "Artist Y", "yyyyyyyyyyy");
    let model = shared(vec![song_x.clone(), song_y.clone()]);
    let mut stack = TransactionStack::new();

    stack
        .execute(Box::new(DeleteSongTransaction::new(
            model.clone(),
            song_x.clone(),
            0,
        )))
        .unwrap();
    assert_eq!(songs_of(&model), vec![song_y.clone()]);

    stack.undo().unwrap();
    assert_eq!(songs_of(&model), vec![song_x, song_y]);
}

/// Scenario C: edit a title in place, undo, redo
#[test]
fn test_edit_song_undo_redo() {
    let original = Song::new("A", "Artist", "media");
    let updated = Song::new("B", "Artist", "media");
    let model = shared(vec![original.clone()]);
    let mut stack = TransactionStack::new();

    stack
        .execute(Box::new(EditSongTransaction::new(
            model.clone(),
            0,
            original.clone(),
            0,
            updated.clone(),
        )))
        .unwrap();
    assert_eq!(songs_of(&model)[0].title, "B");

    stack.undo().unwrap();
    assert_eq!(songs_of(&model), vec![original]);

    stack.redo().unwrap();
    assert_eq!(songs_of(&model), vec![updated]);
}

/// Scenario D: a new edit after an undo makes the undone edit unreachable
#[test]
fn test_execute_after_undo_discards_redo() {
    let model = shared(vec![]);
    let mut stack = TransactionStack::new();

    stack
        .execute(Box::new(AddSongTransaction::new(model.clone())))
        .unwrap(); // T1
    stack
        .execute(Box::new(AddSongTransaction::new(model.clone())))
        .unwrap(); // T2
    stack.undo().unwrap();
    stack
        .execute(Box::new(EditSongTransaction::in_place(
            model.clone(),
            0,
            Song::default_details(),
            Song::new("T3", "Artist", "t3"),
        )))
        .unwrap(); // T3

    assert_eq!(stack.redo_size(), 0);
    assert_eq!(stack.undo_size(), 2);
    assert_eq!(stack.undo_description().as_deref(), Some("Edit Song \"Untitled\""));
    assert_eq!(stack.redo(), Ok(None));
    assert_eq!(songs_of(&model).len(), 1);
}

/// Undo/redo on empty histories leaves everything unchanged
#[test]
fn test_noop_undo_redo_leave_state_unchanged() {
    let songs = vec![Song::new("A", "B", "c")];
    let model = shared(songs.clone());
    let mut stack = TransactionStack::new();

    assert_eq!(stack.undo(), Ok(None));
    assert_eq!(stack.redo(), Ok(None));
    assert_eq!(songs_of(&model), songs);

    stack
        .execute(Box::new(AddSongTransaction::new(model.clone())))
        .unwrap();
    let after_execute = songs_of(&model);
    assert_eq!(stack.redo(), Ok(None));
    assert_eq!(songs_of(&model), after_execute);
    assert_eq!(stack.undo_size(), 1);
    assert_eq!(stack.redo_size(), 0);
}

/// k undos followed by k redos reproduce the state after the executes
#[test]
fn test_random_round_trip() {
    let mut rng = rand::thread_rng();

    for _ in 0..100 {
        let model = shared(vec![
            Song::new("Seed 1", "Artist 1", "s1"),
            Song::new("Seed 2", "Artist 2", "s2"),
        ]);
        let mut stack = TransactionStack::new();
        let mut counter = 0;

        let mut states = vec![songs_of(&model)];
        let executed = rng.gen_range(1..30);
        for _ in 0..executed {
            let transaction = random_transaction(&mut rng, &model, &mut counter);
            stack.execute(transaction).unwrap();
            states.push(songs_of(&model));
        }

        let k = rng.gen_range(0..=executed);
        for step in 0..k {
            stack.undo().unwrap();
            assert_eq!(songs_of(&model), states[executed - step - 1]);
        }
        for _ in 0..k {
            stack.redo().unwrap();
        }

        assert_eq!(songs_of(&model), states[executed]);
        assert_eq!(stack.undo_size(), executed);
        assert_eq!(stack.redo_size(), 0);
    }
}

/// History sizes never exceed the number of executes since the last clear
#[test]
fn test_random_history_sizes_are_bounded() {
    let mut rng = rand::thread_rng();
    let model = shared(vec![]);
    let mut stack = TransactionStack::new();
    let mut counter = 0;
    let mut executed_since_clear = 0;

    for _ in 0..2000 {
        match rng.gen_range(0..10) {
            0..=3 => {
                let transaction = random_transaction(&mut rng, &model, &mut counter);
                stack.execute(transaction).unwrap();
                executed_since_clear += 1;
                assert_eq!(stack.redo_size(), 0);
            }
            4..=6 => {
                let before = stack.undo_size();
                let moved = stack.undo().unwrap();
                assert_eq!(moved.is_some(), before > 0);
            }
            7..=8 => {
                let before = stack.redo_size();
                let moved = stack.redo().unwrap();
                assert_eq!(moved.is_some(), before > 0);
            }
            _ => {
                stack.clear_all();
                executed_since_clear = 0;
            }
        }

        assert!(stack.undo_size() + stack.redo_size() <= executed_since_clear);
    }
}

/// A failed undo leaves the histories and the model as they were
#[test]
fn test_stale_undo_is_reported_and_not_committed() {
    let model = shared(vec![]);
    let mut stack = TransactionStack::new();
    stack
        .execute(Box::new(AddSongTransaction::new(model.clone())))
        .unwrap();

    // Untracked change to the song the add transaction appended
    model
        .lock()
        .unwrap()
        .replace_song_at(0, Song::new("Renamed", "Someone", "zzz"))
        .unwrap();

    assert!(stack.undo().is_err());
    assert_eq!(stack.undo_size(), 1);
    assert_eq!(stack.redo_size(), 0);
    assert_eq!(songs_of(&model).len(), 1);
}
