//! Observable game catalog store.
//!
//! [`GamesStore`] owns a [`GamesState`] snapshot that views read, and a set
//! of async operations that mutate it. Every operation is tagged with a
//! monotonically increasing sequence number; state transitions are expressed
//! as a synchronous reducer over [`GamesEvent`] values, and completions that
//! arrive after a newer operation has started are dropped as stale. Applied
//! events are republished on a broadcast channel for subscribers.
//!
//! Failures never propagate to callers: they are recorded as a
//! human-readable message in [`GamesState::error`] and converted into an
//! empty or absent return value.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use crate::error::GamesError;
use crate::repository::GameRepository;
use crate::types::Game;

/// How many catalog entries count as "recent".
///
/// Placeholder policy: the first entries in catalog order, not a real
/// recency computation.
pub const RECENT_GAMES_COUNT: usize = 2;

/// Shared state of the catalog store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamesState {
    /// The loaded catalog, in fetch order.
    pub games: Vec<Game>,
    /// The "recent" subsequence of the catalog.
    pub recent_games: Vec<Game>,
    /// True while the newest operation is in flight.
    pub loading: bool,
    /// Human-readable message of the newest failure, cleared on every start.
    pub error: Option<String>,
    /// Sequence number of the newest started operation.
    latest_seq: u64,
}

/// Events applied to [`GamesState`] and republished to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum GamesEvent {
    /// An operation started: sets `loading`, clears `error`.
    Started { seq: u64 },
    /// A full catalog fetch completed.
    CatalogLoaded { seq: u64, games: Vec<Game> },
    /// A recent-games fetch completed.
    RecentLoaded { seq: u64, recent: Vec<Game> },
    /// A game was appended to the catalog.
    GameAdded { seq: u64, game: Game },
    /// A query-style operation completed without touching the collections.
    Settled { seq: u64 },
    /// An operation failed.
    Failed { seq: u64, message: String },
}

impl GamesEvent {
    /// Sequence number of the operation this event belongs to.
    pub fn seq(&self) -> u64 {
        match self {
            GamesEvent::Started { seq }
            | GamesEvent::CatalogLoaded { seq, .. }
            | GamesEvent::RecentLoaded { seq, .. }
            | GamesEvent::GameAdded { seq, .. }
            | GamesEvent::Settled { seq }
            | GamesEvent::Failed { seq, .. } => *seq,
        }
    }
}

impl GamesState {
    /// Applies an event, returning whether it was accepted.
    ///
    /// A `Started` event is accepted only if its sequence number is newer
    /// than everything seen so far; it then owns `loading` and `error`.
    /// Completion events are accepted only while their operation is still
    /// the newest one — stale completions must not clobber newer state.
    pub fn apply(&mut self, event: &GamesEvent) -> bool {
        if let GamesEvent::Started { seq } = event {
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
            GamesEvent::Started { .. } => unreachable!("handled above"),
            GamesEvent::CatalogLoaded { games, .. } => {
                self.games = games.clone();
                self.recent_games = games.iter().take(RECENT_GAMES_COUNT).cloned().collect();
            }
            GamesEvent::RecentLoaded { recent, .. } => {
                self.recent_games = recent.clone();
            }
            GamesEvent::GameAdded { game, .. } => {
                self.games.push(game.clone());
            }
            GamesEvent::Settled { .. } => {}
            GamesEvent::Failed { message, .. } => {
                self.error = Some(message.clone());
            }
        }
        self.loading = false;
        true
    }
}

/// Observable store over a [`GameRepository`].
pub struct GamesStore {
    repo: Arc<dyn GameRepository>,
    state: RwLock<GamesState>,
    events_tx: broadcast::Sender<GamesEvent>,
    next_seq: AtomicU64,
}

impl GamesStore {
    /// Creates a store over the given repository.
    pub fn new(repo: Arc<dyn GameRepository>) -> Self {
        let (events_tx, _) = broadcast::channel(64);
        Self {
            repo,
            state: RwLock::new(GamesState::default()),
            events_tx,
            next_seq: AtomicU64::new(1),
        }
    }

    /// Subscribes to the events the store applies to its state.
    pub fn subscribe(&self) -> broadcast::Receiver<GamesEvent> {
        self.events_tx.subscribe()
    }

    /// Returns a cloned snapshot of the current state.
    pub async fn snapshot(&self) -> GamesState {
        self.state.read().await.clone()
    }

    /// Appends a game to the catalog.
    pub async fn add_game(&self, game: Game) {
        let seq = self.begin().await;
        match self.repo.add(game.clone()).await {
            Ok(()) => {
                self.dispatch(GamesEvent::GameAdded { seq, game }).await;
            }
            Err(e) => self.fail(seq, &e).await,
        }
    }

    /// Replaces the catalog with the full game list and derives the recent
    /// subsequence from it. Returns the fetched catalog, empty on failure.
    pub async fn fetch_games(&self) -> Vec<Game> {
        let seq = self.begin().await;
        match self.repo.list().await {
            Ok(games) => {
                self.dispatch(GamesEvent::CatalogLoaded {
                    seq,
                    games: games.clone(),
                })
                .await;
                games
            }
            Err(e) => {
                self.fail(seq, &e).await;
                Vec::new()
            }
        }
    }

    /// Refreshes only the recent-games subsequence.
    pub async fn fetch_recent_games(&self) -> Vec<Game> {
        let seq = self.begin().await;
        match self.repo.list().await {
            Ok(games) => {
                let recent: Vec<Game> = games.into_iter().take(RECENT_GAMES_COUNT).collect();
                self.dispatch(GamesEvent::RecentLoaded {
                    seq,
                    recent: recent.clone(),
                })
                .await;
                recent
            }
            Err(e) => {
                self.fail(seq, &e).await;
                Vec::new()
            }
        }
    }

    /// Returns the games detected as installed. Never mutates the catalog.
    pub async fn fetch_installed_games(&self) -> Vec<Game> {
        let seq = self.begin().await;
        match self.repo.installed().await {
            Ok(games) => {
                self.dispatch(GamesEvent::Settled { seq }).await;
                games
            }
            Err(e) => {
                self.fail(seq, &e).await;
                Vec::new()
            }
        }
    }

    /// Returns the game with the given id, or `None` with `error` set.
    pub async fn fetch_game_by_id(&self, id: u32) -> Option<Game> {
        let seq = self.begin().await;
        match self.repo.find_by_id(id).await {
            Ok(game) => {
                self.dispatch(GamesEvent::Settled { seq }).await;
                Some(game)
            }
            Err(e) => {
                self.fail(seq, &e).await;
                None
            }
        }
    }

    /// Matches the final `/`-delimited segment of `path` against game slugs.
    /// Returns `None` with `error` set when no game matches.
    pub async fn detect_game(&self, path: &str) -> Option<Game> {
        debug!(path, "detecting game for path");
        let slug = path.rsplit('/').next().unwrap_or(path);

        let seq = self.begin().await;
        match self.repo.find_by_slug(slug).await {
            Ok(game) => {
                self.dispatch(GamesEvent::Settled { seq }).await;
                Some(game)
            }
            Err(e) => {
                self.fail(seq, &e).await;
                None
            }
        }
    }

    /// Case-insensitive substring search on game names. An empty result is
    /// not an error.
    pub async fn search_games(&self, query: &str) -> Vec<Game> {
        let seq = self.begin().await;
        match self.repo.search(query).await {
            Ok(games) => {
                self.dispatch(GamesEvent::Settled { seq }).await;
                games
            }
            Err(e) => {
                self.fail(seq, &e).await;
                Vec::new()
            }
        }
    }

    /// Claims the next sequence number and marks the operation started.
    async fn begin(&self) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.dispatch(GamesEvent::Started { seq }).await;
        seq
    }

    async fn fail(&self, seq: u64, error: &GamesError) {
        warn!(%error, "game catalog operation failed");
        self.dispatch(GamesEvent::Failed {
            seq,
            message: error.to_string(),
        })
        .await;
    }

    /// Applies an event to the state and republishes it if accepted.
    async fn dispatch(&self, event: GamesEvent) {
        let accepted = self.state.write().await.apply(&event);
        if accepted {
            // Send errors just mean no one is listening.
            let _ = self.events_tx.send(event);
        } else {
            debug!(seq = event.seq(), "dropping stale catalog store event");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::repository::{InMemoryGameRepository, seed_catalog};
    use crate::types::ExternalIds;

    fn game(id: u32, slug: &str, name: &str) -> Game {
        Game {
            id,
            slug: slug.into(),
            name: name.into(),
            description: String::new(),
            external_ids: ExternalIds::default(),
            game_path: String::new(),
        }
    }

    fn seeded_store() -> GamesStore {
        GamesStore::new(Arc::new(InMemoryGameRepository::new()))
    }

    // -----------------------------------------------------------------------
    // reducer
    // -----------------------------------------------------------------------

    #[test]
    fn started_sets_loading_and_clears_error() {
        let mut state = GamesState {
            error: Some("old failure".into()),
            ..GamesState::default()
        };

        assert!(state.apply(&GamesEvent::Started { seq: 1 }));
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn completion_settles_loading() {
        let mut state = GamesState::default();
        state.apply(&GamesEvent::Started { seq: 1 });

        assert!(state.apply(&GamesEvent::Settled { seq: 1 }));
        assert!(!state.loading);
    }

    #[test]
    fn failed_records_message() {
        let mut state = GamesState::default();
        state.apply(&GamesEvent::Started { seq: 1 });
        state.apply(&GamesEvent::Failed {
            seq: 1,
            message: "game 999 not found".into(),
        });

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("game 999 not found"));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = GamesState::default();
        state.apply(&GamesEvent::Started { seq: 1 });
        state.apply(&GamesEvent::Started { seq: 2 });

        // Op 1 finishes after op 2 started: must not touch anything.
        let accepted = state.apply(&GamesEvent::CatalogLoaded {
            seq: 1,
            games: vec![game(1, "stale", "Stale")],
        });

        assert!(!accepted);
        assert!(state.games.is_empty());
        assert!(state.loading, "op 2 still owns the loading flag");
    }

    #[test]
    fn stale_start_is_ignored() {
        let mut state = GamesState::default();
        state.apply(&GamesEvent::Started { seq: 5 });
        assert!(!state.apply(&GamesEvent::Started { seq: 3 }));
    }

    #[test]
    fn stale_failure_does_not_overwrite_newer_state() {
        let mut state = GamesState::default();
        state.apply(&GamesEvent::Started { seq: 1 });
        state.apply(&GamesEvent::Started { seq: 2 });
        state.apply(&GamesEvent::Settled { seq: 2 });

        let accepted = state.apply(&GamesEvent::Failed {
            seq: 1,
            message: "late failure".into(),
        });

        assert!(!accepted);
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn catalog_loaded_derives_recent() {
        let mut state = GamesState::default();
        state.apply(&GamesEvent::Started { seq: 1 });
        state.apply(&GamesEvent::CatalogLoaded {
            seq: 1,
            games: seed_catalog(),
        });

        assert_eq!(state.games.len(), 7);
        assert_eq!(state.recent_games.len(), RECENT_GAMES_COUNT);
        assert_eq!(state.recent_games[0].slug, "dying-light");
        assert_eq!(state.recent_games[1].slug, "dying-light-2");
    }

    // -----------------------------------------------------------------------
    // store operations
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_games_populates_state() {
        let store = seeded_store();
        let games = store.fetch_games().await;
        assert_eq!(games.len(), 7);

        let state = store.snapshot().await;
        assert_eq!(state.games, games);
        assert_eq!(state.recent_games.len(), 2);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn fetch_recent_games_sets_first_two() {
        let store = seeded_store();
        let recent = store.fetch_recent_games().await;

        let names: Vec<&str> = recent.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Dying Light", "Dying Light 2"]);

        let state = store.snapshot().await;
        assert_eq!(state.recent_games, recent);
        assert!(state.games.is_empty(), "recent fetch leaves catalog alone");
    }

    #[tokio::test]
    async fn fetch_game_by_id_present() {
        let store = seeded_store();
        let game = store.fetch_game_by_id(3).await.unwrap();
        assert_eq!(game.name, "Factorio");
        assert!(store.snapshot().await.error.is_none());
    }

    #[tokio::test]
    async fn fetch_game_by_id_absent_records_error() {
        let store = seeded_store();
        let game = store.fetch_game_by_id(999).await;
        assert!(game.is_none());

        let state = store.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("game 999 not found"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn detect_game_matches_last_path_segment() {
        let store = seeded_store();
        let game = store.detect_game("/mnt/games/factorio").await.unwrap();
        assert_eq!(game.id, 3);
    }

    #[tokio::test]
    async fn detect_game_unknown_records_error() {
        let store = seeded_store();
        let game = store.detect_game("/mnt/games/unknown").await;
        assert!(game.is_none());

        let state = store.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("no game matches slug 'unknown'"));
    }

    #[tokio::test]
    async fn search_games_case_insensitive() {
        let store = seeded_store();
        let hits = store.search_games("DYING").await;
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn search_games_no_match_is_not_an_error() {
        let store = seeded_store();
        let hits = store.search_games("zzz").await;
        assert!(hits.is_empty());
        assert!(store.snapshot().await.error.is_none());
    }

    #[tokio::test]
    async fn fetch_installed_games_never_mutates_catalog() {
        let store = seeded_store();
        store.fetch_games().await;

        let installed = store.fetch_installed_games().await;
        let ids: Vec<u32> = installed.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 4, 6]);

        let state = store.snapshot().await;
        assert_eq!(state.games.len(), 7, "catalog must be untouched");
    }

    #[tokio::test]
    async fn add_game_twice_yields_two_entries() {
        let store = seeded_store();
        let g = game(42, "rimworld", "RimWorld");

        store.add_game(g.clone()).await;
        store.add_game(g.clone()).await;

        let state = store.snapshot().await;
        assert_eq!(state.games.len(), 2);
        assert_eq!(state.games[0], state.games[1]);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn subscribers_see_applied_events() {
        let store = seeded_store();
        let mut rx = store.subscribe();

        store.fetch_games().await;

        assert!(matches!(rx.try_recv(), Ok(GamesEvent::Started { seq: 1 })));
        assert!(matches!(
            rx.try_recv(),
            Ok(GamesEvent::CatalogLoaded { seq: 1, .. })
        ));
    }

    // -----------------------------------------------------------------------
    // overlapping operations
    // -----------------------------------------------------------------------

    /// Repository whose `list` answers follow a per-call script of
    /// (delay, catalog) pairs, consumed in call order.
    struct ScriptedRepo {
        scripts: Mutex<VecDeque<(Duration, Vec<Game>)>>,
    }

    impl ScriptedRepo {
        fn new(scripts: Vec<(Duration, Vec<Game>)>) -> Self {
            Self {
                scripts: Mutex::new(scripts.into()),
            }
        }
    }

    impl GameRepository for ScriptedRepo {
        fn list(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>> {
            let (delay, games) = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left");
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                Ok(games)
            })
        }

        fn add(
            &self,
            _game: Game,
        ) -> Pin<Box<dyn Future<Output = Result<(), GamesError>> + Send + '_>> {
            Box::pin(async { Err(GamesError::Repository("unscripted".into())) })
        }

        fn find_by_id(
            &self,
            id: u32,
        ) -> Pin<Box<dyn Future<Output = Result<Game, GamesError>> + Send + '_>> {
            Box::pin(async move { Err(GamesError::NotFound(id)) })
        }

        fn find_by_slug(
            &self,
            slug: &str,
        ) -> Pin<Box<dyn Future<Output = Result<Game, GamesError>> + Send + '_>> {
            let slug = slug.to_owned();
            Box::pin(async move { Err(GamesError::UnknownSlug(slug)) })
        }

        fn search(
            &self,
            _query: &str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn installed(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_fetches_newest_wins() {
        let slow_catalog = vec![game(1, "slow", "Slow")];
        let fast_catalog = vec![game(2, "fast", "Fast")];

        let repo = Arc::new(ScriptedRepo::new(vec![
            (Duration::from_millis(1000), slow_catalog.clone()),
            (Duration::from_millis(100), fast_catalog.clone()),
        ]));
        let store = Arc::new(GamesStore::new(repo));

        let s1 = Arc::clone(&store);
        let first = tokio::spawn(async move { s1.fetch_games().await });
        tokio::task::yield_now().await; // let the first call claim its script

        let s2 = Arc::clone(&store);
        let second = tokio::spawn(async move { s2.fetch_games().await });

        // Each caller still receives its own result...
        assert_eq!(first.await.unwrap(), slow_catalog);
        assert_eq!(second.await.unwrap(), fast_catalog);

        // ...but shared state reflects the newest operation only.
        let state = store.snapshot().await;
        assert_eq!(state.games, fast_catalog);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }
}
