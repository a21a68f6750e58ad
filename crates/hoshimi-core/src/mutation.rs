//! Named, synchronous state transitions.
//!
//! Every change to [`State`] goes through a [`Mutation`]. Mutations never
//! fail: removals of absent items and updates to unknown records are no-ops.

use tracing::trace;

use crate::models::{Anime, AnimeDetails, AnimeId, GenreId, Release, VideoLinkSet};
use crate::state::{State, WindowMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetAnimes(Vec<Anime>),
    AddAnimes(Anime),
    SetLastReleases(Vec<Release>),
    SetCurrentAnime(Option<AnimeDetails>),
    /// Insert a detail record, carrying forward episode watch times from
    /// the record it replaces.
    AddAnimeDetails {
        id: AnimeId,
        data: AnimeDetails,
    },
    AddPreferredGenre(GenreId),
    RemovePreferredGenre(GenreId),
    AddToFavorites(AnimeDetails),
    RemoveFromFavorites(AnimeId),
    AddToWatching(AnimeDetails),
    RemoveFromWatching(AnimeId),
    UpdateSearchQuery(Option<String>),
    SetWindowMode(WindowMode),
    /// Set the playback position of one episode. `episode` is 1-based.
    SetCurrentTime {
        anime: AnimeId,
        episode: u32,
        time: f64,
    },
    /// Replace a detail record as-is, without carrying anything forward.
    UpdateDetailedAnime {
        anime_id: AnimeId,
        new_data: AnimeDetails,
    },
    SetSearchedAnimes(Vec<Anime>),
    SetCurrentVideoLinks(Option<VideoLinkSet>),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetAnimes(_) => "SET_ANIMES",
            Self::AddAnimes(_) => "ADD_ANIMES",
            Self::SetLastReleases(_) => "SET_LAST_RELEASES",
            Self::SetCurrentAnime(_) => "SET_CURRENT_ANIME",
            Self::AddAnimeDetails { .. } => "ADD_ANIME_DETAILS",
            Self::AddPreferredGenre(_) => "ADD_PREFERRED_GENRE",
            Self::RemovePreferredGenre(_) => "REMOVE_PREFERRED_GENRE",
            Self::AddToFavorites(_) => "ADD_TO_FAVORITES",
            Self::RemoveFromFavorites(_) => "REMOVE_FROM_FAVORITES",
            Self::AddToWatching(_) => "ADD_TO_WATCHING",
            Self::RemoveFromWatching(_) => "REMOVE_FROM_WATCHING",
            Self::UpdateSearchQuery(_) => "UPDATE_SEARCH_QUERY",
            Self::SetWindowMode(_) => "SET_WINDOW_MODE",
            Self::SetCurrentTime { .. } => "SET_CURRENT_TIME",
            Self::UpdateDetailedAnime { .. } => "UPDATE_DETAILED_ANIME",
            Self::SetSearchedAnimes(_) => "SET_SEARCHED_ANIMES",
            Self::SetCurrentVideoLinks(_) => "SET_CURRENT_VIDEO_LINKS",
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl State {
    /// Apply one mutation in place.
    pub fn apply(&mut self, mutation: Mutation) {
        trace!(mutation = mutation.name(), "apply");
        match mutation {
            Mutation::SetAnimes(animes) => self.animes = Some(animes),
            Mutation::AddAnimes(anime) => self.animes.get_or_insert_with(Vec::new).push(anime),
            Mutation::SetLastReleases(releases) => self.last_releases = Some(releases),
            Mutation::SetCurrentAnime(anime) => self.current_anime = anime,
            Mutation::AddAnimeDetails { id, mut data } => {
                if let Some(existing) = self.animes_w_details.get(&id) {
                    // Episodes are positional: index i is episode i + 1 in both records.
                    for (episode, previous) in data.episodes.iter_mut().zip(&existing.episodes) {
                        episode.current_time = previous.current_time;
                    }
                }
                self.animes_w_details.insert(id, data);
            }
            Mutation::AddPreferredGenre(genre) => self.preferred_genres.push(genre),
            Mutation::RemovePreferredGenre(genre) => {
                if let Some(index) = self.preferred_genres.iter().position(|g| *g == genre) {
                    self.preferred_genres.remove(index);
                }
            }
            Mutation::AddToFavorites(anime) => {
                if !self.is_favorite(anime.id()) {
                    self.favorite_animes.push(anime);
                }
            }
            Mutation::RemoveFromFavorites(anime_id) => {
                if let Some(index) = self.favorite_animes.iter().position(|a| a.id() == anime_id) {
                    self.favorite_animes.remove(index);
                }
            }
            Mutation::AddToWatching(anime) => {
                self.watching_animes.insert(anime.id(), anime);
            }
            Mutation::RemoveFromWatching(anime_id) => {
                self.watching_animes.remove(&anime_id);
            }
            Mutation::UpdateSearchQuery(query) => self.search_query = query,
            Mutation::SetWindowMode(mode) => self.window_mode = mode,
            Mutation::SetCurrentTime {
                anime,
                episode,
                time,
            } => {
                let slot = match episode.checked_sub(1) {
                    Some(index) => self
                        .animes_w_details
                        .get_mut(&anime)
                        .and_then(|details| details.episodes.get_mut(index as usize)),
                    None => None,
                };
                match slot {
                    Some(ep) => ep.current_time = Some(time),
                    None => trace!(anime, episode, "no such episode, ignoring watch time"),
                }
            }
            Mutation::UpdateDetailedAnime { anime_id, new_data } => {
                self.animes_w_details.insert(anime_id, new_data);
            }
            Mutation::SetSearchedAnimes(animes) => self.searched_animes = animes,
            Mutation::SetCurrentVideoLinks(links) => self.current_anime_video_links = links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{anime, details, mirror};

    #[test]
    fn test_set_and_add_animes() {
        let mut state = State::default();
        state.apply(Mutation::AddAnimes(anime(1, "Mushishi")));
        assert_eq!(state.animes.as_ref().map(Vec::len), Some(1));

        state.apply(Mutation::SetAnimes(vec![anime(2, "Monster"), anime(3, "Planetes")]));
        state.apply(Mutation::AddAnimes(anime(4, "Haibane Renmei")));
        let ids: Vec<_> = state.animes.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_add_anime_details_preserves_watch_time() {
        let mut state = State::default();
        state.apply(Mutation::AddAnimeDetails {
            id: 10,
            data: details(10, "Mushishi", 3),
        });
        state.apply(Mutation::SetCurrentTime {
            anime: 10,
            episode: 2,
            time: 431.5,
        });

        let mut refreshed = details(10, "Mushishi Zoku Shou", 3);
        refreshed.info.synopsis = Some("Second season".into());
        state.apply(Mutation::AddAnimeDetails {
            id: 10,
            data: refreshed,
        });

        let record = &state.animes_w_details[&10];
        assert_eq!(record.info.title, "Mushishi Zoku Shou");
        assert_eq!(record.info.synopsis.as_deref(), Some("Second season"));
        let times: Vec<_> = record.episodes.iter().map(|e| e.current_time).collect();
        assert_eq!(times, vec![None, Some(431.5), None]);
    }

    #[test]
    fn test_add_anime_details_with_more_episodes_than_before() {
        let mut state = State::default();
        state.apply(Mutation::AddAnimeDetails {
            id: 10,
            data: details(10, "Mushishi", 1),
        });
        state.apply(Mutation::SetCurrentTime {
            anime: 10,
            episode: 1,
            time: 12.0,
        });
        state.apply(Mutation::AddAnimeDetails {
            id: 10,
            data: details(10, "Mushishi", 3),
        });

        let record = &state.animes_w_details[&10];
        assert_eq!(record.episodes.len(), 3);
        assert_eq!(record.episodes[0].current_time, Some(12.0));
        assert_eq!(record.episodes[2].current_time, None);
    }

    #[test]
    fn test_set_current_time_unknown_anime_is_noop() {
        let mut state = State::default();
        state.apply(Mutation::AddAnimeDetails {
            id: 10,
            data: details(10, "Mushishi", 2),
        });
        let before = state.clone();

        state.apply(Mutation::SetCurrentTime {
            anime: 99,
            episode: 1,
            time: 5.0,
        });
        state.apply(Mutation::SetCurrentTime {
            anime: 10,
            episode: 0,
            time: 5.0,
        });
        state.apply(Mutation::SetCurrentTime {
            anime: 10,
            episode: 3,
            time: 5.0,
        });
        assert_eq!(state, before);
    }

    #[test]
    fn test_preferred_genres() {
        let mut state = State::default();
        state.apply(Mutation::AddPreferredGenre(4));
        state.apply(Mutation::AddPreferredGenre(9));
        state.apply(Mutation::AddPreferredGenre(4));
        state.apply(Mutation::RemovePreferredGenre(4));
        assert_eq!(state.preferred_genres, vec![9, 4]);

        state.apply(Mutation::RemovePreferredGenre(77));
        assert_eq!(state.preferred_genres, vec![9, 4]);
    }

    #[test]
    fn test_favorites_add_then_remove_restores_list() {
        let mut state = State::default();
        state.apply(Mutation::AddToFavorites(details(1, "Monster", 0)));
        state.apply(Mutation::AddToFavorites(details(2, "Planetes", 0)));
        let before = state.favorite_animes.clone();

        state.apply(Mutation::AddToFavorites(details(3, "Mushishi", 0)));
        assert_eq!(state.favorite_animes.len(), 3);
        state.apply(Mutation::RemoveFromFavorites(3));
        assert_eq!(state.favorite_animes, before);
    }

    #[test]
    fn test_favorites_are_unique_by_id() {
        let mut state = State::default();
        state.apply(Mutation::AddToFavorites(details(1, "Monster", 0)));
        state.apply(Mutation::AddToFavorites(details(1, "Monster", 0)));
        assert_eq!(state.favorite_animes.len(), 1);

        state.apply(Mutation::RemoveFromFavorites(42));
        assert_eq!(state.favorite_animes.len(), 1);
    }

    #[test]
    fn test_watching_is_independent_of_favorites() {
        let mut state = State::default();
        state.apply(Mutation::AddToFavorites(details(1, "Monster", 0)));
        state.apply(Mutation::AddToWatching(details(1, "Monster", 0)));
        assert!(state.is_watching(1));

        state.apply(Mutation::RemoveFromWatching(1));
        assert!(!state.is_watching(1));
        assert!(state.is_favorite(1));
    }

    #[test]
    fn test_update_detailed_anime_replaces_wholesale() {
        let mut state = State::default();
        state.apply(Mutation::AddAnimeDetails {
            id: 10,
            data: details(10, "Mushishi", 2),
        });
        state.apply(Mutation::SetCurrentTime {
            anime: 10,
            episode: 1,
            time: 90.0,
        });
        state.apply(Mutation::UpdateDetailedAnime {
            anime_id: 10,
            new_data: details(10, "Mushishi", 2),
        });
        assert_eq!(state.animes_w_details[&10].episodes[0].current_time, None);
    }

    #[test]
    fn test_scalar_fields() {
        let mut state = State::default();
        state.apply(Mutation::UpdateSearchQuery(Some("mono".into())));
        state.apply(Mutation::SetWindowMode(WindowMode::Mini));
        state.apply(Mutation::SetCurrentVideoLinks(Some(vec![mirror(1)])));
        state.apply(Mutation::SetCurrentAnime(Some(details(5, "Aria", 1))));
        assert_eq!(state.search_query.as_deref(), Some("mono"));
        assert_eq!(state.window_mode, WindowMode::Mini);
        assert_eq!(state.current_anime_video_links.map(|l| l.len()), Some(1));
        assert_eq!(state.current_anime.map(|a| a.id()), Some(5));
    }

    #[test]
    fn test_mutation_names() {
        assert_eq!(Mutation::AddPreferredGenre(1).name(), "ADD_PREFERRED_GENRE");
        assert_eq!(
            Mutation::SetCurrentTime {
                anime: 1,
                episode: 1,
                time: 0.0
            }
            .to_string(),
            "SET_CURRENT_TIME"
        );
    }
}
