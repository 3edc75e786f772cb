use std::fmt;
use std::sync::Arc;

use cards_core::model::{Record, RecordId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::RecordStore;

use super::progress::SessionProgress;
use super::round::Round;
use super::state::{GuessOutcome, RoundContext, SessionEvent, SessionState};
use crate::prefetch::{NoopPrefetch, Prefetch};

//
// ─── BUILDER ───────────────────────────────────────────────────────────────────
//

/// Configures a `SessionEngine` before its first round is drawn.
pub struct EngineBuilder {
    store: Arc<RecordStore>,
    filter: Option<String>,
    seed: Option<u64>,
    prefetch: Arc<dyn Prefetch>,
}

impl EngineBuilder {
    #[must_use]
    pub fn with_filter(mut self, group: Option<&str>) -> Self {
        self.filter = group.map(str::to_owned);
        self
    }

    /// Make every shuffle deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_prefetch(mut self, prefetch: Arc<dyn Prefetch>) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// Shuffle the initial queue and draw the first round.
    #[must_use]
    pub fn start(self) -> SessionEngine {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut engine = SessionEngine {
            store: self.store,
            state: SessionState::default(),
            rng,
            prefetch: self.prefetch,
        };
        engine.set_filter(self.filter.as_deref());
        engine
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Owns one user's quiz: the draw queue, the current round and progress.
///
/// Every method runs its whole state transition before returning, so callers
/// only ever observe settled state.
pub struct SessionEngine {
    store: Arc<RecordStore>,
    state: SessionState,
    rng: StdRng,
    prefetch: Arc<dyn Prefetch>,
}

impl SessionEngine {
    #[must_use]
    pub fn builder(store: Arc<RecordStore>) -> EngineBuilder {
        EngineBuilder {
            store,
            filter: None,
            seed: None,
            prefetch: Arc::new(NoopPrefetch),
        }
    }

    /// Start a session over `store`, optionally filtered to one group.
    #[must_use]
    pub fn start(store: Arc<RecordStore>, filter: Option<&str>) -> Self {
        Self::builder(store).with_filter(filter).start()
    }

    /// Feed an inbound event through the state machine.
    ///
    /// Returns the guess outcome for `SessionEvent::Guess`, `None` otherwise.
    pub fn handle(&mut self, event: SessionEvent) -> Option<GuessOutcome> {
        let state = std::mem::take(&mut self.state);
        let mut ctx = RoundContext {
            store: &self.store,
            rng: &mut self.rng,
            prefetch: self.prefetch.as_ref(),
        };
        let (next, outcome) = state.apply(event, &mut ctx);
        self.state = next;
        outcome
    }

    /// Switch the group filter; blank or `None` means every record.
    pub fn set_filter(&mut self, group: Option<&str>) {
        self.handle(SessionEvent::SelectFilter(group.map(str::to_owned)));
    }

    /// Register the user's pick for the current round.
    pub fn guess(&mut self, choice: &RecordId) -> GuessOutcome {
        self.handle(SessionEvent::Guess(choice.clone()))
            .unwrap_or(GuessOutcome::Ignored)
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.state.current_round()
    }

    #[must_use]
    pub fn previous_round(&self) -> Option<&Round> {
        self.state.previous_round()
    }

    /// Target of the previous round, for "previous answer" display.
    #[must_use]
    pub fn previous_answer(&self) -> Option<&Arc<Record>> {
        self.state.previous_round().map(Round::target)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.state.progress()
    }

    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.state.filter_group()
    }

    #[must_use]
    pub fn groups(&self) -> &[String] {
        self.store.groups()
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("records_len", &self.store.len())
            .field("filter", &self.state.filter_group())
            .field("progress", &self.state.progress())
            .field(
                "target",
                &self.state.current_round().map(|r| r.target().id()),
            )
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use cards_core::model::RecordDraft;
    use std::sync::Mutex;

    fn store(n: u64) -> Arc<RecordStore> {
        Arc::new(RecordStore::from_records((1..=n).map(|id| {
            RecordDraft::new(id.to_string(), format!("P{id}"), format!("https://img/{id}.jpg"))
                .with_group(if id % 2 == 0 { "Even" } else { "Odd" })
                .validate()
                .unwrap()
        })))
    }

    fn target_id(engine: &SessionEngine) -> RecordId {
        engine.current_round().unwrap().target().id().clone()
    }

    #[test]
    fn start_draws_a_round_immediately() {
        let engine = SessionEngine::builder(store(6)).with_seed(1).start();

        let round = engine.current_round().unwrap();
        assert_eq!(round.choices().len(), 4);
        assert!(round.disabled_ids().is_empty());
        assert_eq!(engine.progress(), SessionProgress { consumed: 0, total: 6 });
        assert!(engine.previous_round().is_none());
    }

    #[test]
    fn same_seed_same_session() {
        let a = SessionEngine::builder(store(8)).with_seed(42).start();
        let b = SessionEngine::builder(store(8)).with_seed(42).start();

        assert_eq!(a.current_round(), b.current_round());
    }

    #[test]
    fn correct_guess_moves_target_to_previous_round() {
        let mut engine = SessionEngine::builder(store(6)).with_seed(3).start();
        let first = target_id(&engine);

        assert_eq!(engine.guess(&first), GuessOutcome::Correct);

        assert_eq!(engine.previous_answer().unwrap().id(), &first);
        assert_eq!(engine.progress().consumed, 1);
    }

    #[test]
    fn prefetches_photos_of_upcoming_records() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&seen);
        let engine = SessionEngine::builder(store(6))
            .with_seed(5)
            .with_prefetch(Arc::new(move |url: &str| {
                sink.lock().unwrap().push(url.to_owned());
            }))
            .start();

        let upcoming: Vec<String> = engine
            .state()
            .queue()
            .upcoming(3)
            .map(|r| r.photo_url().to_owned())
            .collect();
        assert_eq!(*seen.lock().unwrap(), upcoming);
        assert_eq!(upcoming.len(), 3);
    }

    #[test]
    fn debug_output_is_compact() {
        let engine = SessionEngine::builder(store(2)).with_seed(0).start();
        let rendered = format!("{engine:?}");
        assert!(rendered.contains("records_len: 2"));
    }
}
