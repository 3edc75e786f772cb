use std::collections::VecDeque;
use std::sync::Arc;

use cards_core::model::Record;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// No-repeat-until-exhausted draw order over a fixed pool of records.
///
/// `pending` is always a suffix of some uniformly random permutation of
/// `pool`. Once it runs dry the next draw reshuffles the whole pool, so the
/// queue never ends as long as the pool is non-empty.
#[derive(Debug, Clone, Default)]
pub struct DrawQueue {
    pool: Vec<Arc<Record>>,
    pending: VecDeque<Arc<Record>>,
}

impl DrawQueue {
    /// Queue over `pool`, shuffled immediately.
    pub fn new<R: Rng + ?Sized>(pool: Vec<Arc<Record>>, rng: &mut R) -> Self {
        let mut queue = Self {
            pool,
            pending: VecDeque::new(),
        };
        queue.refill(rng);
        queue
    }

    /// Records left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Pop the next record, reshuffling the pool first if the current pass is used up.
    ///
    /// Returns `None` only when the pool itself is empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Arc<Record>> {
        if self.pending.is_empty() {
            self.refill(rng);
        }
        self.pending.pop_front()
    }

    /// Up to `n` records that will be drawn next, without consuming them.
    pub fn upcoming(&self, n: usize) -> impl Iterator<Item = &Arc<Record>> {
        self.pending.iter().take(n)
    }

    fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.pool.is_empty() {
            return;
        }
        let mut order = self.pool.clone();
        shuffle(&mut order, rng);
        debug!(pool = order.len(), "draw queue reshuffled");
        self.pending = order.into();
    }
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_core::model::{RecordDraft, RecordId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn pool(n: u64) -> Vec<Arc<Record>> {
        (1..=n)
            .map(|id| {
                Arc::new(
                    RecordDraft::new(id.to_string(), format!("P{id}"), format!("u{id}"))
                        .validate()
                        .unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 0..20_u32 {
            let original: Vec<u32> = (0..len).collect();
            let mut shuffled = original.clone();
            shuffle(&mut shuffled, &mut rng);
            shuffled.sort_unstable();
            assert_eq!(shuffled, original);
        }
    }

    #[test]
    fn full_pass_draws_each_record_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut queue = DrawQueue::new(pool(6), &mut rng);

        let drawn: HashSet<RecordId> = (0..6)
            .map(|_| queue.draw(&mut rng).unwrap().id().clone())
            .collect();

        assert_eq!(drawn.len(), 6);
        assert_eq!(queue.remaining(), 0);
    }

    #[test]
    fn exhausted_queue_reshuffles_the_same_pool() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = pool(3);
        let ids: HashSet<RecordId> = records.iter().map(|r| r.id().clone()).collect();
        let mut queue = DrawQueue::new(records, &mut rng);

        for _ in 0..3 {
            queue.draw(&mut rng).unwrap();
        }
        let next = queue.draw(&mut rng).unwrap();

        assert!(ids.contains(next.id()));
        assert_eq!(queue.remaining(), 2);
    }

    #[test]
    fn empty_pool_never_draws() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut queue = DrawQueue::new(Vec::new(), &mut rng);
        assert!(queue.draw(&mut rng).is_none());
        assert!(queue.draw(&mut rng).is_none());
    }

    #[test]
    fn upcoming_peeks_without_consuming() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut queue = DrawQueue::new(pool(5), &mut rng);

        let peeked: Vec<RecordId> = queue.upcoming(3).map(|r| r.id().clone()).collect();
        assert_eq!(peeked.len(), 3);
        assert_eq!(queue.remaining(), 5);
        assert_eq!(queue.draw(&mut rng).unwrap().id(), &peeked[0]);
    }
}
