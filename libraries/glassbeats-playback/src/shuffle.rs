//! Queue randomization
//!
//! Uniform Fisher-Yates permutation; the queue keeps the current song
//! pinned in front and shuffles only the rest.

use glassbeats_core::types::Song;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle songs in place with a uniformly random permutation.
pub(crate) fn shuffle_songs(songs: &mut [Song]) {
    let mut rng = thread_rng();
    songs.shuffle(&mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glassbeats_core::types::{SongId, VideoId};
    use std::collections::HashSet;

    fn test_song(id: &str) -> Song {
        Song {
            id: SongId::new(id),
            title: id.to_string(),
            artist: "Test Artist".to_string(),
            video_id: VideoId::parse("aaaaaaaaaaa").unwrap(),
            thumbnail: String::new(),
            duration_seconds: None,
            user_id: None,
            created_at: None,
        }
    }

    #[test]
    fn shuffle_preserves_all_songs() {
        let mut songs: Vec<Song> = (0..20).map(|i| test_song(&format!("s{i}"))).collect();
        shuffle_songs(&mut songs);

        let ids: HashSet<String> = songs.iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn shuffle_changes_order_eventually() {
        let original: Vec<Song> = (0..10).map(|i| test_song(&format!("s{i}"))).collect();

        // One shot can come back identical with probability 1/10!; ten shots
        // in a row cannot realistically.
        let changed = (0..10).any(|_| {
            let mut songs = original.clone();
            shuffle_songs(&mut songs);
            songs.iter().map(|s| s.id.as_str()).ne(original.iter().map(|s| s.id.as_str()))
        });
        assert!(changed);
    }

    #[test]
    fn shuffle_empty_and_single() {
        let mut none: Vec<Song> = Vec::new();
        shuffle_songs(&mut none);
        assert!(none.is_empty());

        let mut one = vec![test_song("only")];
        shuffle_songs(&mut one);
        assert_eq!(one[0].id.as_str(), "only");
    }
}
