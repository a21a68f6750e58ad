//! Derived read views over [`State`].

use std::collections::BTreeMap;

use crate::cdn::Cdn;
use crate::models::{Anime, AnimeId, AnimeView};
use crate::state::State;

/// Every derived view, computed from one state revision.
#[derive(Debug, Clone, PartialEq)]
pub struct Getters {
    pub normalized_animes: Option<BTreeMap<AnimeId, Anime>>,
    pub filtered_animes: Option<Vec<Anime>>,
    pub currently_watching: Option<Vec<AnimeView>>,
    pub favorite_animes: Vec<AnimeView>,
    pub searched: Vec<Anime>,
}

impl Getters {
    pub fn derive(state: &State, cdn: &Cdn) -> Self {
        Self {
            normalized_animes: normalized_animes(state),
            filtered_animes: filtered_animes(state),
            currently_watching: currently_watching(state, cdn),
            favorite_animes: favorite_animes(state, cdn),
            searched: searched(state).to_vec(),
        }
    }
}

/// Catalog keyed by id. `None` while the catalog is unset.
pub fn normalized_animes(state: &State) -> Option<BTreeMap<AnimeId, Anime>> {
    state
        .animes
        .as_ref()
        .map(|animes| animes.iter().map(|a| (a.id, a.clone())).collect())
}

/// Catalog minus favorites. Watching entries are not excluded.
pub fn filtered_animes(state: &State) -> Option<Vec<Anime>> {
    state.animes.as_ref().map(|animes| {
        animes
            .iter()
            .filter(|a| !state.is_favorite(a.id))
            .cloned()
            .collect()
    })
}

/// Watching entries as views. `None` when nothing is being watched, which
/// callers distinguish from an empty list.
pub fn currently_watching(state: &State, cdn: &Cdn) -> Option<Vec<AnimeView>> {
    if state.watching_animes.is_empty() {
        return None;
    }
    Some(
        state
            .watching_animes
            .values()
            .map(|details| AnimeView::from_details(details, cdn))
            .collect(),
    )
}

pub fn favorite_animes(state: &State, cdn: &Cdn) -> Vec<AnimeView> {
    state
        .favorite_animes
        .iter()
        .map(|details| AnimeView::from_details(details, cdn))
        .collect()
}

pub fn searched(state: &State) -> &[Anime] {
    &state.searched_animes
}
