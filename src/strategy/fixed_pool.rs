//! Implementation of the FIXED POOL strategy via the [`Strategy`] trait.

use tracing::trace;

use crate::{candidate::Candidate, draw::DrawSource, top_k::seed_pool};

use super::{finalize_all, Budget, Strategy};

/// Seeds a pool with the best `size` draws of the first round, then in each
/// round works through the pool in seeding order, moving on only once a
/// candidate strictly beats its own minimum.
///
/// Candidates left unreached when the round's hashes run out are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPool {
    size: usize,
}

impl FixedPool {
    /// Pool size used by [`FixedPool::new`].
    pub const DEFAULT_SIZE: usize = 16;

    pub fn new() -> Self {
        Self::with_size(Self::DEFAULT_SIZE)
    }

    pub fn with_size(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for FixedPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for FixedPool {
    fn name(&self) -> String {
        if self.size == Self::DEFAULT_SIZE {
            "Fixed Pool".into()
        } else {
            format!("Fixed Pool ({})", self.size)
        }
    }

    fn run(
        &self,
        budget: Budget,
        source: &mut dyn DrawSource,
    ) -> Vec<Candidate> {
        let mut pool = seed_pool(self.size, budget.hashpower, source);

        for round in 1..budget.rounds {
            let mut hashes = budget.hashpower;
            let mut id = 0;

            while hashes > 0 && id < pool.len() {
                hashes -= 1;
                pool[id].receive_draw(source.draw());
                if pool[id].latest() > pool[id].minimum() {
                    id += 1;
                }
            }
            pool.truncate(id + 1);

            finalize_all(&mut pool);

            trace!(strategy = %self.name(), round, survivors = pool.len());
        }

        pool
    }
}
