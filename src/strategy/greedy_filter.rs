//! Implementation of the GREEDY FILTER strategy via the [`Strategy`] trait.

use tracing::{debug, trace};

use crate::{candidate::Candidate, draw::DrawSource};

use super::{finalize_all, sort_by_minimum, Budget, Strategy};

/// Seeds a pool from every draw above `threshold`, keeps the best `limit`,
/// and in each later round first pushes every candidate back over
/// `threshold` (in pool order) before spending what's left on matching each
/// candidate's own minimum.
///
/// Candidates the first phase never reaches are dropped, so the pool can
/// only shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyFilter {
    threshold: u64,
    limit: usize,
}

impl GreedyFilter {
    pub fn new(threshold: u64, limit: usize) -> Self {
        Self { threshold, limit }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Strategy for GreedyFilter {
    fn name(&self) -> String {
        format!("Greedy Filter ({})", self.limit)
    }

    fn run(
        &self,
        budget: Budget,
        source: &mut dyn DrawSource,
    ) -> Vec<Candidate> {
        let mut pool: Vec<_> = (0..budget.hashpower)
            .map(|_| source.draw())
            .filter(|&value| value > self.threshold)
            .map(Candidate::seed)
            .collect();

        sort_by_minimum(&mut pool);
        pool.truncate(self.limit);
        if pool.is_empty() {
            debug!(strategy = %self.name(), "no seeds above threshold");
            return vec![];
        }
        finalize_all(&mut pool);

        for round in 1..budget.rounds {
            let mut hashes = budget.hashpower;
            let mut id = 0;

            // Get every candidate above the threshold
            while hashes > 0 && id < pool.len() {
                hashes -= 1;
                pool[id].receive_draw(source.draw());
                if pool[id].latest() > self.threshold {
                    id += 1;
                }
            }
            pool.truncate(id + 1);

            // Spend the rest matching each candidate's minimum
            id = 0;
            while hashes > 0 && id < pool.len() {
                hashes -= 1;
                pool[id].receive_draw(source.draw());
                if !pool[id].wants_more() {
                    id += 1;
                }
            }

            if pool.is_empty() {
                debug!(strategy = %self.name(), round, "pool ran dry");
                return vec![];
            }

            finalize_all(&mut pool);
            sort_by_minimum(&mut pool);

            trace!(strategy = %self.name(), round, survivors = pool.len());
        }

        pool
    }
}
