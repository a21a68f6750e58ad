//! Store plugins: hooks run at construction and after every commit.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::HoshimiError;
use crate::mutation::Mutation;
use crate::state::State;
use crate::storage::StateStorage;

pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs once while the store is built, before the first read.
    fn init(&mut self, _state: &mut State) {}

    /// Runs after `mutation` has been applied to `state`, under the store's
    /// write lock. Must not block.
    fn on_commit(&self, _mutation: &Mutation, _state: &State) {}

    /// Resolves once work queued by earlier commits is done.
    fn flush(&self) -> Option<oneshot::Receiver<()>> {
        None
    }
}

/// Emits a debug event for every commit.
#[derive(Debug, Default)]
pub struct LoggerPlugin;

impl Plugin for LoggerPlugin {
    fn name(&self) -> &'static str {
        "logger"
    }

    fn on_commit(&self, mutation: &Mutation, state: &State) {
        debug!(
            mutation = mutation.name(),
            catalog = state.animes.as_ref().map_or(0, Vec::len),
            favorites = state.favorite_animes.len(),
            watching = state.watching_animes.len(),
            details = state.animes_w_details.len(),
            "commit"
        );
    }
}

/// Mirrors the whole state tree into [`StateStorage`] on every commit and
/// restores it when the store is built.
///
/// The stored tree is read synchronously in [`PersistedState::open`]. After
/// that the storage belongs to a dedicated writer thread; commits only queue
/// a snapshot, so no disk I/O happens under the store's write lock.
pub struct PersistedState {
    tx: mpsc::UnboundedSender<WriteCommand>,
    restored: Option<State>,
    key: String,
}

enum WriteCommand {
    Save {
        state: Box<State>,
        mutation: &'static str,
    },
    Flush {
        reply: oneshot::Sender<()>,
    },
}

impl PersistedState {
    pub fn open(storage: StateStorage, key: impl Into<String>) -> Result<Self, HoshimiError> {
        let key = key.into();
        let restored = match storage.load(&key) {
            Ok(restored) => restored,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to rehydrate state");
                None
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let writer_key = key.clone();
        std::thread::Builder::new()
            .name("state-writer".into())
            .spawn(move || writer_loop(storage, writer_key, rx))?;

        Ok(Self { tx, restored, key })
    }
}

impl Plugin for PersistedState {
    fn name(&self) -> &'static str {
        "persisted-state"
    }

    fn init(&mut self, state: &mut State) {
        match self.restored.take() {
            Some(mut restored) => {
                // Staff picks come from the seed, never from storage.
                restored.staff_picks = std::mem::take(&mut state.staff_picks);
                *state = restored;
                info!(key = %self.key, "rehydrated persisted state");
            }
            None => debug!(key = %self.key, "no persisted state"),
        }
    }

    fn on_commit(&self, mutation: &Mutation, state: &State) {
        let command = WriteCommand::Save {
            state: Box::new(state.clone()),
            mutation: mutation.name(),
        };
        if self.tx.send(command).is_err() {
            warn!(mutation = mutation.name(), "state writer closed, commit not persisted");
        }
    }

    fn flush(&self) -> Option<oneshot::Receiver<()>> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(WriteCommand::Flush { reply });
        Some(rx)
    }
}

fn writer_loop(storage: StateStorage, key: String, mut rx: mpsc::UnboundedReceiver<WriteCommand>) {
    while let Some(cmd) = rx.blocking_recv() {
        match cmd {
            WriteCommand::Save { state, mutation } => {
                if let Err(e) = storage.save(&key, &state) {
                    warn!(mutation, error = %e, "failed to persist state");
                }
            }
            WriteCommand::Flush { reply } => {
                let _ = reply.send(());
            }
        }
    }
    debug!(key = %key, "state writer stopped");
}
