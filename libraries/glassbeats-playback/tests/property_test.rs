//! Property-based tests for the queue engine
//!
//! Uses proptest to verify the pointer and ordering invariants across many
//! random queues and operation sequences.

use glassbeats_core::types::{Song, SongId, VideoId};
use glassbeats_playback::PlaybackManager;
use proptest::prelude::*;

// ===== Helpers =====

fn song_at(index: usize) -> Song {
    // Unique row id and video id per position; both are valid identifiers.
    Song {
        id: SongId::new(format!("song-{index}")),
        title: format!("Track {index}"),
        artist: format!("Artist {}", index % 7),
        video_id: VideoId::parse(format!("vid{index:08}")).unwrap(),
        thumbnail: String::new(),
        duration_seconds: Some(180),
        user_id: None,
        created_at: None,
    }
}

fn manager_of(len: usize, current: usize) -> PlaybackManager {
    let mut manager = PlaybackManager::default();
    for i in 0..len {
        manager.add_to_queue(song_at(i));
    }
    manager.play_at(current);
    manager.drain_events();
    manager
}

fn multiset(manager: &PlaybackManager) -> Vec<String> {
    let mut ids: Vec<String> = manager.queue().iter().map(|s| s.id.to_string()).collect();
    ids.sort();
    ids
}

// ===== Properties =====

proptest! {
    /// Removing any song other than the playing one leaves the same song
    /// playing.
    #[test]
    fn remove_preserves_current_unless_removed(
        len in 2usize..30,
        current in 0usize..30,
        remove in 0usize..30,
    ) {
        let current = current % len;
        let remove = remove % len;
        prop_assume!(remove != current);

        let mut manager = manager_of(len, current);
        let playing_before = manager.current_song().unwrap().id.clone();

        manager.remove_from_queue(remove);

        prop_assert_eq!(manager.current_song().unwrap().id.clone(), playing_before);
    }

    /// After any removal the pointer is in bounds and the song count
    /// dropped by exactly one.
    #[test]
    fn remove_keeps_pointer_in_bounds(
        len in 1usize..30,
        current in 0usize..30,
        remove in 0usize..30,
    ) {
        let current = current % len;
        let remove = remove % len;

        let mut manager = manager_of(len, current);
        manager.remove_from_queue(remove);

        prop_assert_eq!(manager.queue_len(), len - 1);
        if manager.queue_len() > 0 {
            prop_assert!(manager.current_index() < manager.queue_len());
            prop_assert!(manager.current_song().is_some());
        }
    }

    /// Reorders preserve the multiset of songs and leave a well-defined
    /// current song.
    #[test]
    fn reorder_preserves_multiset_and_pointer(
        len in 1usize..30,
        current in 0usize..30,
        old_index in 0usize..30,
        new_index in 0usize..30,
    ) {
        let current = current % len;
        let old_index = old_index % len;
        let new_index = new_index % len;

        let mut manager = manager_of(len, current);
        let before = multiset(&manager);
        let playing_before = manager.current_song().unwrap().id.clone();

        manager.reorder_queue(old_index, new_index);

        prop_assert_eq!(multiset(&manager), before);
        prop_assert!(manager.current_index() < manager.queue_len());
        // The pointer follows the playing song wherever it lands.
        prop_assert_eq!(manager.current_song().unwrap().id.clone(), playing_before);
    }

    /// Shuffle then unshuffle restores the original order exactly and the
    /// playing song is unchanged across the round trip.
    #[test]
    fn shuffle_round_trip_is_identity(
        len in 1usize..30,
        current in 0usize..30,
    ) {
        let current = current % len;

        let mut manager = manager_of(len, current);
        let order_before: Vec<String> =
            manager.queue().iter().map(|s| s.id.to_string()).collect();
        let playing_before = manager.current_song().unwrap().id.clone();

        manager.toggle_shuffle();
        prop_assert_eq!(manager.current_song().unwrap().id.clone(), playing_before.clone());
        prop_assert_eq!(manager.current_index(), 0);
        prop_assert_eq!(multiset(&manager).len(), len);

        manager.toggle_shuffle();
        let order_after: Vec<String> =
            manager.queue().iter().map(|s| s.id.to_string()).collect();
        prop_assert_eq!(order_after, order_before);
        prop_assert_eq!(manager.current_song().unwrap().id.clone(), playing_before);
    }

    /// Arbitrary operation sequences never leave the pointer out of bounds.
    #[test]
    fn random_operations_keep_invariants(
        len in 1usize..15,
        ops in prop::collection::vec((0u8..6, 0usize..20), 1..40),
    ) {
        let mut manager = manager_of(len, 0);
        let mut extra = len;

        for (op, arg) in ops {
            match op {
                0 => {
                    manager.add_to_queue(song_at(extra));
                    extra += 1;
                }
                1 => manager.remove_from_queue(arg),
                2 => manager.reorder_queue(arg, arg.wrapping_mul(7) % 20),
                3 => manager.play_next(),
                4 => manager.play_previous(),
                _ => manager.toggle_shuffle(),
            }

            if manager.queue_len() > 0 {
                prop_assert!(manager.current_index() < manager.queue_len());
                prop_assert!(manager.current_song().is_some());
            } else {
                prop_assert!(manager.current_song().is_none());
            }
        }
    }
}
