use rand::Rng;

use crate::episodes::Episode;

/// A message applied to the player through [`PlayerState::apply`]
#[derive(Debug, Clone)]
pub enum PlayerAction {
    /// Replace the playlist with a single episode and start playing
    Play(Episode),
    /// Replace the playlist and start playing at the given position
    ///
    /// The index is trusted as-is; callers are responsible for keeping it
    /// within bounds of `list`.
    PlayList { list: Vec<Episode>, index: usize },
    /// Flip the playing flag
    TogglePlay,
    /// Flip the looping flag
    ToggleLoop,
    /// Flip the shuffling flag
    ToggleShuffle,
    /// Direct setter, used by audio-element callbacks such as natural
    /// playback end
    SetPlaying(bool),
    /// Empty the playlist and reset the cursor
    ///
    /// The playing, looping and shuffling flags keep their previous values;
    /// callers that want a full reset must clear those too.
    Clear,
    /// Advance the cursor: a random position while shuffling, otherwise one
    /// step forward when not already on the last episode
    Next,
    /// Step the cursor back one episode when not already at the front
    Previous,
}

/// Snapshot of the shared player
///
/// The state is an explicit value, not an ambient singleton: whoever owns it
/// feeds actions through [`apply`](PlayerState::apply) and keeps the returned
/// snapshot. Each application is pure apart from the shuffle RNG, which can
/// be injected through [`apply_with_rng`](PlayerState::apply_with_rng).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub episode_list: Vec<Episode>,
    pub current_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
}

impl PlayerState {
    /// An empty, stopped player
    pub fn new() -> PlayerState {
        PlayerState::default()
    }

    /// Apply an action, drawing shuffle picks from the thread-local RNG
    pub fn apply(&self, action: PlayerAction) -> PlayerState {
        self.apply_with_rng(action, &mut rand::rng())
    }

    /// Apply an action with an explicit RNG source
    ///
    /// Only [`PlayerAction::Next`] consults the RNG, and only while
    /// shuffling. Tests pass a seeded RNG to make shuffle picks
    /// reproducible.
    pub fn apply_with_rng<R: Rng>(&self, action: PlayerAction, rng: &mut R) -> PlayerState {
        let mut next = self.clone();

        match action {
            PlayerAction::Play(episode) => {
                next.episode_list = vec![episode];
                next.current_index = 0;
                next.is_playing = true;
            }

            PlayerAction::PlayList { list, index } => {
                next.episode_list = list;
                next.current_index = index;
                next.is_playing = true;
            }

            PlayerAction::TogglePlay => next.is_playing = !next.is_playing,
            PlayerAction::ToggleLoop => next.is_looping = !next.is_looping,
            PlayerAction::ToggleShuffle => next.is_shuffling = !next.is_shuffling,
            PlayerAction::SetPlaying(state) => next.is_playing = state,

            PlayerAction::Clear => {
                next.episode_list.clear();
                next.current_index = 0;
            }

            PlayerAction::Next => {
                if next.is_shuffling {
                    // A uniform pick over the whole list; repeating the
                    // current episode is allowed.
                    let len = next.episode_list.len();
                    next.current_index = if len > 0 { rng.random_range(0..len) } else { 0 };
                } else if next.current_index + 1 < next.episode_list.len() {
                    next.current_index += 1;
                }
            }

            PlayerAction::Previous => {
                if next.current_index > 0 {
                    next.current_index -= 1;
                }
            }
        }

        next
    }

    /// Whether a "next" control should be enabled
    ///
    /// Always true while shuffling, even on a single-item playlist.
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index + 1 < self.episode_list.len()
    }

    /// Whether a "previous" control should be enabled
    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// The episode under the cursor, if the index is in bounds
    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_index)
    }

    pub fn is_empty(&self) -> bool {
        self.episode_list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use url::Url;

    fn make_episode(index: usize) -> Episode {
        Episode {
            id: format!("ep-{index}"),
            title: format!("Episode {index}"),
            members: "Host".to_string(),
            thumbnail: Url::parse("https://example.com/thumb.jpg").unwrap(),
            url: Url::parse("https://example.com/audio.mp3").unwrap(),
            duration: 65,
            duration_as_string: "00:01:05".to_string(),
            published_at: "08 Jan 21".to_string(),
        }
    }

    fn make_list(count: usize) -> Vec<Episode> {
        (0..count).map(make_episode).collect()
    }

    #[test]
    fn play_replaces_playlist_with_single_episode() {
        let state = PlayerState::new()
            .apply(PlayerAction::PlayList {
                list: make_list(3),
                index: 2,
            })
            .apply(PlayerAction::Play(make_episode(7)));

        assert_eq!(state.episode_list.len(), 1);
        assert_eq!(state.current_index, 0);
        assert!(state.is_playing);
        assert_eq!(state.current_episode().unwrap().id, "ep-7");
    }

    #[test]
    fn play_list_sets_index_and_playing() {
        let state = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(5),
            index: 3,
        });

        assert_eq!(state.current_index, 3);
        assert!(state.is_playing);
        assert_eq!(state.current_episode().unwrap().id, "ep-3");
    }

    #[test]
    fn toggles_flip_their_flags() {
        let state = PlayerState::new()
            .apply(PlayerAction::TogglePlay)
            .apply(PlayerAction::ToggleLoop)
            .apply(PlayerAction::ToggleShuffle);

        assert!(state.is_playing);
        assert!(state.is_looping);
        assert!(state.is_shuffling);

        let state = state.apply(PlayerAction::TogglePlay);
        assert!(!state.is_playing);
    }

    #[test]
    fn set_playing_overrides_flag() {
        let state = PlayerState::new()
            .apply(PlayerAction::Play(make_episode(0)))
            .apply(PlayerAction::SetPlaying(false));

        assert!(!state.is_playing);
    }

    #[test]
    fn clear_empties_playlist_but_keeps_flags() {
        let state = PlayerState::new()
            .apply(PlayerAction::PlayList {
                list: make_list(3),
                index: 1,
            })
            .apply(PlayerAction::ToggleLoop)
            .apply(PlayerAction::ToggleShuffle)
            .apply(PlayerAction::Clear);

        assert!(state.episode_list.is_empty());
        assert_eq!(state.current_index, 0);
        assert!(state.is_playing);
        assert!(state.is_looping);
        assert!(state.is_shuffling);
    }

    #[test]
    fn next_advances_sequentially() {
        let state = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(3),
            index: 0,
        });

        let state = state.apply(PlayerAction::Next);
        assert_eq!(state.current_index, 1);
    }

    #[test]
    fn next_is_noop_on_last_episode() {
        let state = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(3),
            index: 2,
        });

        let state = state.apply(PlayerAction::Next);
        assert_eq!(state.current_index, 2);
    }

    #[test]
    fn next_while_shuffling_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = PlayerState::new()
            .apply(PlayerAction::PlayList {
                list: make_list(5),
                index: 0,
            })
            .apply(PlayerAction::ToggleShuffle);

        for _ in 0..50 {
            state = state.apply_with_rng(PlayerAction::Next, &mut rng);
            assert!(state.current_index < 5);
        }
    }

    #[test]
    fn next_while_shuffling_is_deterministic_with_seeded_rng() {
        let list = make_list(5);
        let start = PlayerState::new()
            .apply(PlayerAction::PlayList {
                list,
                index: 0,
            })
            .apply(PlayerAction::ToggleShuffle);

        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        let a = start.apply_with_rng(PlayerAction::Next, &mut rng_a);
        let b = start.apply_with_rng(PlayerAction::Next, &mut rng_b);

        assert_eq!(a.current_index, b.current_index);
    }

    #[test]
    fn next_while_shuffling_empty_list_stays_at_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = PlayerState::new()
            .apply(PlayerAction::ToggleShuffle)
            .apply_with_rng(PlayerAction::Next, &mut rng);

        assert_eq!(state.current_index, 0);
        assert!(state.is_empty());
    }

    #[test]
    fn previous_is_noop_at_front() {
        let state = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(3),
            index: 0,
        });

        let state = state.apply(PlayerAction::Previous);
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn previous_steps_back() {
        let state = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(3),
            index: 2,
        });

        let state = state.apply(PlayerAction::Previous);
        assert_eq!(state.current_index, 1);
    }

    #[test]
    fn has_next_follows_position() {
        let state = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(2),
            index: 0,
        });
        assert!(state.has_next());

        let state = state.apply(PlayerAction::Next);
        assert!(!state.has_next());
    }

    #[test]
    fn has_next_is_always_true_while_shuffling() {
        let state = PlayerState::new()
            .apply(PlayerAction::Play(make_episode(0)))
            .apply(PlayerAction::ToggleShuffle);

        assert_eq!(state.episode_list.len(), 1);
        assert!(state.has_next());
    }

    #[test]
    fn has_previous_follows_position() {
        let state = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(3),
            index: 1,
        });
        assert!(state.has_previous());

        let state = state.apply(PlayerAction::Previous);
        assert!(!state.has_previous());
    }

    #[test]
    fn empty_player_has_no_current_episode() {
        let state = PlayerState::new();

        assert!(state.current_episode().is_none());
        assert!(!state.has_next());
        assert!(!state.has_previous());
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn apply_leaves_original_snapshot_untouched() {
        let start = PlayerState::new().apply(PlayerAction::PlayList {
            list: make_list(3),
            index: 0,
        });

        let advanced = start.apply(PlayerAction::Next);

        assert_eq!(start.current_index, 0);
        assert_eq!(advanced.current_index, 1);
    }
}
