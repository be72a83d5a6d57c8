// Playlister - Library exports for the shell, tests and benchmarks

pub mod config;
pub mod library;
pub mod playlist;
pub mod transaction;

// Re-export commonly used types for convenience
pub use config::Config;
pub use library::{ListStore, Playlister, ToolbarState};
pub use playlist::{EditModel, Playlist, Song};
pub use transaction::{Transaction, TransactionStack};
