//! Observable, paginated mod store.
//!
//! Deliberately the same reducer + sequence-number + broadcast shape as the
//! game catalog store: operations are tagged, transitions are a synchronous
//! reducer over [`ModsEvent`] values, and stale completions are dropped.
//! Failures are recorded in [`ModsState::error`] and converted into empty
//! returns — never propagated to callers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use crate::error::ModsError;
use crate::repository::ModRepository;
use crate::types::{Mod, Page};

/// Shared state of the mod store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModsState {
    /// The most recently fetched page.
    pub mods: Vec<Mod>,
    /// True while the newest operation is in flight.
    pub loading: bool,
    /// Human-readable message of the newest failure, cleared on every start.
    pub error: Option<String>,
    /// Sequence number of the newest started operation.
    latest_seq: u64,
}

/// Events applied to [`ModsState`] and republished to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ModsEvent {
    /// An operation started: sets `loading`, clears `error`.
    Started { seq: u64 },
    /// A page fetch completed; `mods` is replaced with the page.
    PageLoaded { seq: u64, mods: Vec<Mod> },
    /// An operation failed.
    Failed { seq: u64, message: String },
}

impl ModsEvent {
    /// Sequence number of the operation this event belongs to.
    pub fn seq(&self) -> u64 {
        match self {
            ModsEvent::Started { seq }
            | ModsEvent::PageLoaded { seq, .. }
            | ModsEvent::Failed { seq, .. } => *seq,
        }
    }
}

impl ModsState {
    /// Applies an event, returning whether it was accepted.
    ///
    /// Same staleness rules as the game catalog reducer: only the newest
    /// started operation may settle `loading`, `error`, and the page.
    pub fn apply(&mut self, event: &ModsEvent) -> bool {
        if let ModsEvent::Started { seq } = event {
            if *seq <= self.latest_seq {
                return false;
            }
            self.latest_seq = *seq;
            self.loading = true;
            self.error = None;
            return true;
        }

        if event.seq() != self.latest_seq {
            return false;
        }

        match event {
            ModsEvent::Started { .. } => unreachable!("handled above"),
            ModsEvent::PageLoaded { mods, .. } => {
                self.mods = mods.clone();
            }
            ModsEvent::Failed { message, .. } => {
                self.error = Some(message.clone());
            }
        }
        self.loading = false;
        true
    }
}

/// Observable store over a [`ModRepository`].
pub struct ModsStore {
    repo: Arc<dyn ModRepository>,
    state: RwLock<ModsState>,
    events_tx: broadcast::Sender<ModsEvent>,
    next_seq: AtomicU64,
}

impl ModsStore {
    /// Creates a store over the given repository.
    pub fn new(repo: Arc<dyn ModRepository>) -> Self {
        let (events_tx, _) = broadcast::channel(64);
        Self {
            repo,
            state: RwLock::new(ModsState::default()),
            events_tx,
            next_seq: AtomicU64::new(1),
        }
    }

    /// Subscribes to the events the store applies to its state.
    pub fn subscribe(&self) -> broadcast::Receiver<ModsEvent> {
        self.events_tx.subscribe()
    }

    /// Returns a cloned snapshot of the current state.
    pub async fn snapshot(&self) -> ModsState {
        self.state.read().await.clone()
    }

    /// Fetches the mods for a game, optionally windowed by `page`, and
    /// replaces the stored page with the result. Returns the page, empty on
    /// failure.
    pub async fn fetch_mods(&self, game_id: u32, page: Option<Page>) -> Vec<Mod> {
        let seq = self.begin().await;
        match self.repo.list_for_game(game_id).await {
            Ok(filtered) => {
                let mods: Vec<Mod> = match page {
                    Some(p) => filtered.into_iter().skip(p.offset).take(p.limit).collect(),
                    None => filtered,
                };
                self.dispatch(ModsEvent::PageLoaded {
                    seq,
                    mods: mods.clone(),
                })
                .await;
                mods
            }
            Err(e) => {
                warn!(%e, game_id, "mod fetch failed");
                self.dispatch(ModsEvent::Failed {
                    seq,
                    message: e.to_string(),
                })
                .await;
                Vec::new()
            }
        }
    }

    /// Counts the mods belonging to a game. Synchronous; does not touch the
    /// observable state.
    pub fn mod_count(&self, game_id: u32) -> usize {
        self.repo.count_for_game(game_id)
    }

    /// Claims the next sequence number and marks the operation started.
    async fn begin(&self) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.dispatch(ModsEvent::Started { seq }).await;
        seq
    }

    /// Applies an event to the state and republishes it if accepted.
    async fn dispatch(&self, event: ModsEvent) {
        let accepted = self.state.write().await.apply(&event);
        if accepted {
            // Send errors just mean no one is listening.
            let _ = self.events_tx.send(event);
        } else {
            debug!(seq = event.seq(), "dropping stale mod store event");
        }
    }
}
