//! Implementation of the ROUND-ROBIN PRIORITY strategy via the [`Strategy`]
//! trait.

use tracing::trace;

use crate::{candidate::Candidate, draw::DrawSource, top_k::seed_pool};

use super::{finalize_all, sort_by_minimum, Budget, Strategy};

/// Seeds a pool with the best `amount` draws of the first round, then hands
/// out draws one at a time in a circle, trying to bring every candidate back
/// up to its opening score.
///
/// A candidate that has already caught up passes its turn to the first
/// candidate in pool order that hasn't. Once every candidate has caught up,
/// the remaining hashes go around the circle unconditionally. The pool never
/// shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    amount: usize,
}

impl RoundRobin {
    pub fn new(amount: usize) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> usize {
        self.amount
    }
}

/// Returns true while the round in progress is below the opening score.
#[inline]
fn behind(candidate: &Candidate) -> bool {
    candidate
        .opening()
        .is_some_and(|opening| candidate.latest() < opening)
}

impl Strategy for RoundRobin {
    fn name(&self) -> String {
        format!("Round-Robin Priority ({})", self.amount)
    }

    fn run(
        &self,
        budget: Budget,
        source: &mut dyn DrawSource,
    ) -> Vec<Candidate> {
        let mut pool = seed_pool(self.amount, budget.hashpower, source);
        if pool.is_empty() {
            return pool;
        }

        for round in 1..budget.rounds {
            let mut hashes = budget.hashpower;
            let mut base = 0;
            let mut done = vec![false; pool.len()];
            let mut num_done = 0;

            while hashes > 0 && num_done < pool.len() {
                if behind(&pool[base]) {
                    pool[base].receive_draw(source.draw());
                    hashes -= 1;
                } else {
                    // Help the best candidate that's still behind
                    if let Some(lagging) = pool.iter_mut().find(|c| behind(c))
                    {
                        lagging.receive_draw(source.draw());
                        hashes -= 1;
                    }

                    if !done[base] {
                        done[base] = true;
                        num_done += 1;
                    }
                }
                base = (base + 1) % pool.len();
            }

            while hashes > 0 {
                pool[base].receive_draw(source.draw());
                hashes -= 1;
                base = (base + 1) % pool.len();
            }

            finalize_all(&mut pool);
            sort_by_minimum(&mut pool);

            trace!(strategy = %self.name(), round, best = pool[0].minimum());
        }

        pool
    }
}
