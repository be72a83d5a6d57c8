// Songs and playlists

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::playlist::model::{EditModel, PlaylistError, PlaylistResult};

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_ARTIST: &str = "Unknown";
const DEFAULT_MEDIA_ID: &str = "dQw4w9WgXcQ";

/// A single playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    /// External media identifier (YouTube video id)
    #[serde(rename = "youTubeId")]
    pub media_id: String,
}

impl Song {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        media_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            media_id: media_id.into(),
        }
    }

    /// Placeholder song appended by the "add song" action
    pub fn default_details() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_ARTIST, DEFAULT_MEDIA_ID)
    }

    /// Link to the song's video
    pub fn media_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.media_id)
    }
}

impl std::fmt::Display for Song {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

/// A named, ordered list of songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Playlist {
    /// Create an empty playlist with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_songs(name, Vec::new())
    }

    pub fn with_songs(name: impl Into<String>, songs: Vec<Song>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            songs,
        }
    }

    fn out_of_range(&self, index: usize) -> PlaylistError {
        PlaylistError::IndexOutOfRange {
            index,
            len: self.songs.len(),
        }
    }
}

impl EditModel for Playlist {
    fn len(&self) -> usize {
        self.songs.len()
    }

    fn song_at(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    fn add_default_song(&mut self) {
        self.songs.push(Song::default_details());
    }

    fn delete_last_song(&mut self) -> PlaylistResult<Song> {
        self.songs.pop().ok_or(PlaylistError::EmptyList)
    }

    fn delete_song(&mut self, index: usize) -> PlaylistResult<Song> {
        if index >= self.songs.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.songs.remove(index))
    }

    fn insert_song_at(&mut self, song: Song, index: usize) -> PlaylistResult<()> {
        if index > self.songs.len() {
            return Err(self.out_of_range(index));
        }
        self.songs.insert(index, song);
        Ok(())
    }

    fn replace_song_at(&mut self, index: usize, song: Song) -> PlaylistResult<()> {
        let len = self.songs.len();
        let slot = self
            .songs
            .get_mut(index)
            .ok_or(PlaylistError::IndexOutOfRange { index, len })?;
        *slot = song;
        Ok(())
    }

    fn move_song(&mut self, from: usize, to: usize) -> PlaylistResult<()> {
        if from >= self.songs.len() {
            return Err(self.out_of_range(from));
        }
        if to >= self.songs.len() {
            return Err(self.out_of_range(to));
        }
        let song = self.songs.remove(from);
        self.songs.insert(to, song);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_playlist() -> Playlist {
        Playlist::with_songs(
            "Test",
            vec![
                Song::new("A", "Artist A", "aaa"),
                Song::new("B", "Artist B", "bbb"),
                Song::new("C", "Artist C", "ccc"),
            ],
        )
    }

    fn titles(playlist: &Playlist) -> Vec<&str> {
        playlist.songs.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_add_default_song() {
        let mut playlist = Playlist::new("Empty");
        playlist.add_default_song();

        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.song_at(0), Some(&Song::default_details()));
    }

    #[test]
    fn test_delete_last_song_on_empty_list() {
        let mut playlist = Playlist::new("Empty");
        assert_eq!(playlist.delete_last_song(), Err(PlaylistError::EmptyList));
    }

    #[test]
    fn test_delete_song_shifts_later_songs() {
        let mut playlist = sample_playlist();
        let removed = playlist.delete_song(1).unwrap();

        assert_eq!(removed.title, "B");
        assert_eq!(titles(&playlist), vec!["A", "C"]);
    }

    #[test]
    fn test_delete_song_out_of_range() {
        let mut playlist = sample_playlist();
        assert_eq!(
            playlist.delete_song(3),
            Err(PlaylistError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_insert_song_at_end_and_past_end() {
        let mut playlist = sample_playlist();
        playlist.insert_song_at(Song::new("D", "", ""), 3).unwrap();
        assert_eq!(titles(&playlist), vec!["A", "B", "C", "D"]);

        let result = playlist.insert_song_at(Song::new("E", "", ""), 5);
        assert!(matches!(
            result,
            Err(PlaylistError::IndexOutOfRange { index: 5, len: 4 })
        ));
    }

    #[test]
    fn test_replace_song_at() {
        let mut playlist = sample_playlist();
        playlist
            .replace_song_at(2, Song::new("Z", "Artist Z", "zzz"))
            .unwrap();

        assert_eq!(playlist.song_at(2).unwrap().media_id, "zzz");
        assert!(playlist.replace_song_at(3, Song::default_details()).is_err());
    }

    #[test]
    fn test_move_song_both_directions() {
        let mut playlist = sample_playlist();
        playlist.move_song(0, 2).unwrap();
        assert_eq!(titles(&playlist), vec!["B", "C", "A"]);

        playlist.move_song(2, 0).unwrap();
        assert_eq!(titles(&playlist), vec!["A", "B", "C"]);

        assert!(playlist.move_song(0, 3).is_err());
    }

    #[test]
    fn test_song_serializes_media_id_as_youtube_id() {
        let json = serde_json::to_string(&Song::new("A", "B", "xyz")).unwrap();
        assert_eq!(json, r#"{"title":"A","artist":"B","youTubeId":"xyz"}"#);
    }
}
