/*!
Definitions for hashpower allocation strategies

A strategy is any type which implements the [`Strategy`] trait. Given a
[`Budget`] and a [`DrawSource`], a strategy seeds a pool of [`Candidate`]s,
spends `hashpower` draws on them in each round, and returns the survivors.

# Examples
A strategy which pours every draw of every round into one candidate.

```
use hashpower_sim::prelude::*;

#[derive(Debug, Clone)]
struct AllIn;

impl Strategy for AllIn {
    fn name(&self) -> String {
        "All In".to_string()
    }

    fn run(&self, budget: Budget, source: &mut dyn DrawSource) -> Vec<Candidate> {
        let mut candidate = Candidate::seed(source.draw());
        candidate.finalize();

        for _ in 1..budget.rounds {
            for _ in 0..budget.hashpower {
                candidate.receive_draw(source.draw());
            }
            candidate.finalize();
        }

        vec![candidate]
    }
}
```

# Built-In Strategies
- Greedy Filter [`greedy_filter::GreedyFilter`]
- Fixed Pool [`fixed_pool::FixedPool`]
- Round-Robin Priority [`round_robin::RoundRobin`]
*/

use std::fmt::Debug;

use crate::{candidate::Candidate, draw::DrawSource};

pub mod fixed_pool;
pub mod greedy_filter;
pub mod round_robin;

pub use fixed_pool::FixedPool;
pub use greedy_filter::GreedyFilter;
pub use round_robin::RoundRobin;

/// Number of rounds in a run unless configured otherwise.
pub const DEFAULT_ROUNDS: usize = 8;

/// Pool sizes compared by [`catalog`].
pub const CATALOG_POOL_SIZES: [usize; 5] = [1, 2, 4, 8, 16];

/// Work available to a single strategy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Budget {
    /// Draws available in each round.
    pub hashpower: usize,
    /// Rounds in the run, including the seeding round.
    pub rounds: usize,
}

impl Budget {
    pub fn new(hashpower: usize) -> Self {
        Self {
            hashpower,
            rounds: DEFAULT_ROUNDS,
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;

        self
    }
}

/// Defines how a strategy spends its draws.
pub trait Strategy: Debug + dyn_clone::DynClone + Send + Sync {
    /// Returns the name of this strategy.
    ///
    /// The return value of this method appears in the "Strategy" column of
    /// [`ResultsTable`](crate::results::ResultsTable).
    fn name(&self) -> String;

    /// Executes one run and returns the surviving candidates, each with
    /// `budget.rounds` finished rounds.
    ///
    /// An empty vector means nothing qualified in this run. It is not an
    /// error.
    fn run(&self, budget: Budget, source: &mut dyn DrawSource)
        -> Vec<Candidate>;
}

dyn_clone::clone_trait_object!(Strategy);

/// Sorts a pool best first by [`Candidate::minimum`]. Ties keep their
/// previous order.
pub fn sort_by_minimum(pool: &mut [Candidate]) {
    pool.sort_by(|a, b| b.minimum().cmp(&a.minimum()));
}

/// Finishes the round in progress for every candidate in `pool`.
fn finalize_all(pool: &mut [Candidate]) {
    pool.iter_mut().for_each(Candidate::finalize);
}

/// Returns the standard line-up of strategies to compare against each other.
pub fn catalog(threshold: u64) -> Vec<Box<dyn Strategy>> {
    let mut strategies: Vec<Box<dyn Strategy>> = vec![];

    for limit in CATALOG_POOL_SIZES {
        strategies.push(Box::new(GreedyFilter::new(threshold, limit)));
    }
    strategies.push(Box::new(FixedPool::new()));
    for amount in CATALOG_POOL_SIZES {
        strategies.push(Box::new(RoundRobin::new(amount)));
    }

    strategies
}

#[cfg(test)]
mod tests {
    use crate::candidate::Candidate;

    use super::{catalog, sort_by_minimum, Budget, DEFAULT_ROUNDS};

    #[test]
    fn sort_is_descending_and_stable() {
        let mut pool: Vec<_> = [3, 9, 3, 5].map(Candidate::seed).into();
        pool[2].receive_draw(100);

        sort_by_minimum(&mut pool);

        let minimums: Vec<_> = pool.iter().map(|c| c.minimum()).collect();
        assert_eq!(minimums, vec![9, 5, 3, 3]);
        assert_eq!(pool[2].latest(), 3);
        assert_eq!(pool[3].latest(), 100);
    }

    #[test]
    fn budget_defaults() {
        let budget = Budget::new(10);

        assert_eq!(budget.rounds, DEFAULT_ROUNDS);
        assert_eq!(budget.with_rounds(3).rounds, 3);
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<_> = catalog(0).iter().map(|s| s.name()).collect();
        let total = names.len();
        names.sort();
        names.dedup();

        assert_eq!(total, 11);
        assert_eq!(names.len(), total);
    }
}
