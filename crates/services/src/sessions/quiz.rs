use cards_core::model::RecordId;

use super::engine::SessionEngine;
use super::state::GuessOutcome;

/// What the UI talks to: either still waiting for records, or playing.
///
/// A failed load leaves the quiz in `Loading`; there is no retry.
#[derive(Debug, Default)]
pub enum Quiz {
    #[default]
    Loading,
    Ready(Box<SessionEngine>),
}

impl Quiz {
    #[must_use]
    pub fn ready(engine: SessionEngine) -> Self {
        Self::Ready(Box::new(engine))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Quiz::Loading)
    }

    #[must_use]
    pub fn engine(&self) -> Option<&SessionEngine> {
        match self {
            Quiz::Loading => None,
            Quiz::Ready(engine) => Some(&**engine),
        }
    }

    /// Apply a filter selection. Returns false while loading.
    pub fn select_filter(&mut self, group: Option<&str>) -> bool {
        match self {
            Quiz::Loading => false,
            Quiz::Ready(engine) => {
                engine.set_filter(group);
                true
            }
        }
    }

    /// Forward a choice click. Ignored while loading.
    pub fn select_choice(&mut self, id: &RecordId) -> GuessOutcome {
        match self {
            Quiz::Loading => GuessOutcome::Ignored,
            Quiz::Ready(engine) => engine.guess(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_core::model::RecordDraft;
    use std::sync::Arc;
    use storage::RecordStore;

    #[test]
    fn loading_quiz_ignores_events() {
        let mut quiz = Quiz::default();

        assert!(quiz.is_loading());
        assert!(!quiz.select_filter(Some("Eng")));
        assert_eq!(
            quiz.select_choice(&RecordId::new("1")),
            GuessOutcome::Ignored
        );
        assert!(quiz.engine().is_none());
    }

    #[test]
    fn ready_quiz_forwards_to_engine() {
        let store = Arc::new(RecordStore::from_records(vec![
            RecordDraft::new("1", "A", "u1").validate().unwrap(),
            RecordDraft::new("2", "B", "u2").validate().unwrap(),
        ]));
        let mut quiz = Quiz::ready(SessionEngine::builder(store).with_seed(1).start());

        let target = quiz
            .engine()
            .and_then(SessionEngine::current_round)
            .map(|round| round.target().id().clone())
            .unwrap();
        assert_eq!(quiz.select_choice(&target), GuessOutcome::Correct);
        assert_eq!(quiz.engine().unwrap().progress().consumed, 1);
    }
}
