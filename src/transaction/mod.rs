// Transaction Pattern for Undo/Redo of playlist edits
//
// Every undoable edit to a playlist is wrapped in a Transaction and handed
// to the TransactionStack, which applies it and records it for undo.
//
// Architecture:
// - Transaction trait: apply(), revert(), description()
// - TransactionStack: applied history + undone history, strict LIFO
// - Concrete transactions: AddSong, DeleteSong, EditSong, MoveSong
//
// Each concrete transaction holds the SharedModel it was built against and
// the before/after values it needs to reverse itself. Captured values never
// change after construction; undo/redo only move the transaction between
// the two histories.

pub mod stack;
pub mod trait_def;
pub mod transactions;

pub use stack::TransactionStack;
pub use trait_def::{SharedModel, Transaction, TransactionError, TransactionResult};
pub use transactions::{
    AddSongTransaction, DeleteSongTransaction, EditSongTransaction, MoveSongTransaction,
};
