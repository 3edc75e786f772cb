use cards_core::model::RecordId;
use rand::Rng;
use storage::RecordStore;
use storage::store::normalize_group;
use tracing::{debug, info};

use super::progress::SessionProgress;
use super::queue::DrawQueue;
use super::round::Round;
use crate::prefetch::Prefetch;

/// Photos of this many upcoming records are prefetched each round.
pub const PREFETCH_AHEAD: usize = 3;

/// Inbound events a session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Restrict the draw queue to a group; `None` or blank clears the filter.
    SelectFilter(Option<String>),
    /// The user picked the choice with this id.
    Guess(RecordId),
}

/// What a guess did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The target was named; a new round has started.
    Correct,
    /// A wrong choice, now disabled for the rest of the round.
    Wrong,
    /// A wrong choice that was already disabled. Nothing changed.
    AlreadyDisabled,
    /// The id is not a choice of the current round, or there is no round.
    Ignored,
}

/// Collaborators a transition needs besides the state itself.
pub struct RoundContext<'a, R: Rng + ?Sized> {
    pub store: &'a RecordStore,
    pub rng: &'a mut R,
    pub prefetch: &'a dyn Prefetch,
}

/// Everything that changes while a user plays.
///
/// Transitions consume the state and return the next one; nothing here is
/// mutated from outside.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    filter_group: Option<String>,
    queue: DrawQueue,
    current_round: Option<Round>,
    total_in_filtered_set: usize,
    consumed_count: usize,
    previous_round: Option<Round>,
}

impl SessionState {
    #[must_use]
    pub fn filter_group(&self) -> Option<&str> {
        self.filter_group.as_deref()
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    /// The last round answered correctly, for "previous answer" display.
    #[must_use]
    pub fn previous_round(&self) -> Option<&Round> {
        self.previous_round.as_ref()
    }

    #[must_use]
    pub fn total_in_filtered_set(&self) -> usize {
        self.total_in_filtered_set
    }

    #[must_use]
    pub fn consumed_count(&self) -> usize {
        self.consumed_count
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            consumed: self.consumed_count,
            total: self.total_in_filtered_set,
        }
    }

    #[must_use]
    pub fn queue(&self) -> &DrawQueue {
        &self.queue
    }

    /// Dispatch `event` to the matching transition.
    ///
    /// The outcome is `Some` for guesses only.
    #[must_use]
    pub fn apply<R: Rng + ?Sized>(
        self,
        event: SessionEvent,
        ctx: &mut RoundContext<'_, R>,
    ) -> (Self, Option<GuessOutcome>) {
        match event {
            SessionEvent::SelectFilter(group) => (self.select_filter(group.as_deref(), ctx), None),
            SessionEvent::Guess(id) => {
                let (state, outcome) = self.guess(&id, ctx);
                (state, Some(outcome))
            }
        }
    }

    /// Reset the session onto a freshly shuffled queue over `group`.
    ///
    /// Progress starts over and the previous round is forgotten.
    #[must_use]
    pub fn select_filter<R: Rng + ?Sized>(
        self,
        group: Option<&str>,
        ctx: &mut RoundContext<'_, R>,
    ) -> Self {
        let filter_group = normalize_group(group).map(str::to_owned);
        let pool = ctx.store.filtered(filter_group.as_deref());
        let total_in_filtered_set = pool.len();
        let queue = DrawQueue::new(pool, &mut *ctx.rng);
        info!(
            group = filter_group.as_deref().unwrap_or("<all>"),
            total = total_in_filtered_set,
            "filter applied"
        );

        let state = Self {
            filter_group,
            queue,
            current_round: None,
            total_in_filtered_set,
            consumed_count: 0,
            previous_round: None,
        };
        state.next_round(ctx)
    }

    /// Register a guess against the current round.
    #[must_use]
    pub fn guess<R: Rng + ?Sized>(
        mut self,
        id: &RecordId,
        ctx: &mut RoundContext<'_, R>,
    ) -> (Self, GuessOutcome) {
        let Some(round) = self.current_round.as_mut() else {
            return (self, GuessOutcome::Ignored);
        };
        if !round.has_choice(id) {
            debug!(%id, "ignoring guess for a choice not in this round");
            return (self, GuessOutcome::Ignored);
        }
        if round.is_target(id) {
            self.consumed_count += 1;
            return (self.next_round(ctx), GuessOutcome::Correct);
        }
        let outcome = if round.disable(id.clone()) {
            GuessOutcome::Wrong
        } else {
            GuessOutcome::AlreadyDisabled
        };
        (self, outcome)
    }

    /// Draw the next target and build its round. The finished round, if any,
    /// becomes the previous round.
    fn next_round<R: Rng + ?Sized>(mut self, ctx: &mut RoundContext<'_, R>) -> Self {
        if let Some(finished) = self.current_round.take() {
            self.previous_round = Some(finished);
        }

        let Some(target) = self.queue.draw(&mut *ctx.rng) else {
            debug!("no records to draw from");
            return self;
        };

        for upcoming in self.queue.upcoming(PREFETCH_AHEAD) {
            ctx.prefetch.prefetch(upcoming.photo_url());
        }

        let round = Round::build(target, ctx.store.records(), &mut *ctx.rng);
        debug!(
            target = %round.target().id(),
            choices = round.choices().len(),
            remaining = self.queue.remaining(),
            "round started"
        );
        self.current_round = Some(round);
        self
    }
}
