use std::collections::BTreeSet;
use std::sync::Arc;

use cards_core::model::{Record, RecordId};
use rand::Rng;

use super::queue::shuffle;

/// Wrong answers shown next to the target.
pub const DISTRACTORS: usize = 3;

/// One quiz prompt: the person to name and the names to pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    target: Arc<Record>,
    choices: Vec<Arc<Record>>,
    disabled: BTreeSet<RecordId>,
}

impl Round {
    /// Build a round for `target`, drawing distractors from `candidates`.
    ///
    /// `candidates` is the whole unfiltered record set, even when the session
    /// is filtered to a group.
    pub fn build<R: Rng + ?Sized>(
        target: Arc<Record>,
        candidates: &[Arc<Record>],
        rng: &mut R,
    ) -> Self {
        let mut choices: Vec<Arc<Record>> = candidates
            .iter()
            .filter(|candidate| is_fair_distractor(&target, candidate))
            .cloned()
            .collect();
        shuffle(&mut choices, rng);
        choices.truncate(DISTRACTORS);
        choices.push(Arc::clone(&target));
        shuffle(&mut choices, rng);

        Self {
            target,
            choices,
            disabled: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &Arc<Record> {
        &self.target
    }

    /// Choices in display order; the target is among them exactly once.
    #[must_use]
    pub fn choices(&self) -> &[Arc<Record>] {
        &self.choices
    }

    /// Ids of wrong choices already picked this round.
    #[must_use]
    pub fn disabled_ids(&self) -> &BTreeSet<RecordId> {
        &self.disabled
    }

    #[must_use]
    pub fn is_disabled(&self, id: &RecordId) -> bool {
        self.disabled.contains(id)
    }

    #[must_use]
    pub fn has_choice(&self, id: &RecordId) -> bool {
        self.choices.iter().any(|c| c.id() == id)
    }

    #[must_use]
    pub fn is_target(&self, id: &RecordId) -> bool {
        self.target.id() == id
    }

    /// Returns false when `id` was already disabled.
    pub(crate) fn disable(&mut self, id: RecordId) -> bool {
        self.disabled.insert(id)
    }
}

/// Gender is only compared when both sides know it, so a wrong answer can
/// never be ruled out by gender alone. The target itself is never a distractor.
#[must_use]
pub fn is_fair_distractor(target: &Record, candidate: &Record) -> bool {
    if candidate.id() == target.id() {
        return false;
    }
    match (target.gender(), candidate.gender()) {
        (Some(target_gender), Some(candidate_gender)) => target_gender == candidate_gender,
        _ => true,
    }
}
