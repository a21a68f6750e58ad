use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tokio::sync::RwLock;
use tracing::debug;

use crate::cdn::Cdn;
use crate::getters::Getters;
use crate::models::{Anime, AnimeId, AnimeView};
use crate::mutation::Mutation;
use crate::plugin::Plugin;
use crate::seed::StaffPick;
use crate::state::State;

struct Inner {
    state: State,
    /// Getters for the current revision, computed on first read.
    getters: OnceLock<Arc<Getters>>,
}

/// Application state container.
///
/// All writes go through [`Store::commit`]; each commit is applied under the
/// write lock, so a single mutation is never observed half-applied. Actions
/// that commit several mutations are not atomic as a group.
pub struct Store {
    inner: RwLock<Inner>,
    cdn: Cdn,
    plugins: Vec<Box<dyn Plugin>>,
}

#[derive(Default)]
pub struct StoreBuilder {
    cdn: Cdn,
    staff_picks: Vec<StaffPick>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cdn(mut self, cdn: Cdn) -> Self {
        self.cdn = cdn;
        self
    }

    pub fn staff_picks(mut self, picks: Vec<StaffPick>) -> Self {
        self.staff_picks = picks;
        self
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Build the store, letting each plugin initialize (e.g. rehydrate) the state.
    pub fn build(mut self) -> Store {
        let mut state = State::new(self.staff_picks);
        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), "init plugin");
            plugin.init(&mut state);
        }
        Store {
            inner: RwLock::new(Inner {
                state,
                getters: OnceLock::new(),
            }),
            cdn: self.cdn,
            plugins: self.plugins,
        }
    }
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub fn cdn(&self) -> &Cdn {
        &self.cdn
    }

    /// Apply one mutation and notify plugins.
    pub async fn commit(&self, mutation: Mutation) {
        let mut inner = self.inner.write().await;
        let record = (!self.plugins.is_empty()).then(|| mutation.clone());
        inner.state.apply(mutation);
        inner.getters = OnceLock::new();
        if let Some(record) = record {
            for plugin in &self.plugins {
                plugin.on_commit(&record, &inner.state);
            }
        }
    }

    /// Wait until plugins have finished the work queued by earlier commits.
    pub async fn flush(&self) {
        for plugin in &self.plugins {
            if let Some(done) = plugin.flush() {
                if done.await.is_err() {
                    debug!(plugin = plugin.name(), "plugin dropped flush");
                }
            }
        }
    }

    /// Run `f` against the current state under the read lock.
    pub async fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        let inner = self.inner.read().await;
        f(&inner.state)
    }

    /// Clone of the whole state tree.
    pub async fn snapshot(&self) -> State {
        self.read(State::clone).await
    }

    /// Derived views for the current state, memoized until the next commit.
    pub async fn getters(&self) -> Arc<Getters> {
        let inner = self.inner.read().await;
        inner
            .getters
            .get_or_init(|| Arc::new(Getters::derive(&inner.state, &self.cdn)))
            .clone()
    }

    pub async fn normalized_animes(&self) -> Option<BTreeMap<AnimeId, Anime>> {
        self.getters().await.normalized_animes.clone()
    }

    pub async fn filtered_animes(&self) -> Option<Vec<Anime>> {
        self.getters().await.filtered_animes.clone()
    }

    pub async fn currently_watching(&self) -> Option<Vec<AnimeView>> {
        self.getters().await.currently_watching.clone()
    }

    pub async fn favorite_animes(&self) -> Vec<AnimeView> {
        self.getters().await.favorite_animes.clone()
    }

    pub async fn searched(&self) -> Vec<Anime> {
        self.getters().await.searched.clone()
    }
}
