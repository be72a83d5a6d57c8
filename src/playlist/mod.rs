// Playlist data model
//
// Songs and playlists, plus the EditModel contract that undoable
// transactions call into. Everything here is plain data manipulation;
// undo/redo bookkeeping lives in the transaction module.

pub mod model;
pub mod types;

pub use model::{EditModel, PlaylistError, PlaylistResult};
pub use types::{Playlist, Song};
