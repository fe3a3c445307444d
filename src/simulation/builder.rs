use std::num::NonZeroUsize;

use rand::Rng;

use crate::strategy::{Strategy, DEFAULT_ROUNDS};

use super::SimulationGroup;

/// Builds a [`SimulationGroup`].
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    pub hashpower: Option<usize>,
    pub rounds: Option<usize>,
    pub samples: Option<usize>,
    pub seed: Option<u64>,
    strategies: Vec<Box<dyn Strategy>>,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationBuildError {
    #[error("no strategies were added")]
    NoStrategies,
    #[error("hashpower must be greater than 0")]
    ZeroHashpower,
    #[error("number of rounds must be greater than 0")]
    ZeroRounds,
    #[error("number of samples must be greater than 0")]
    ZeroSamples,
}

impl SimulationBuilder {
    /// Draws available to a strategy in each round unless configured
    /// otherwise.
    pub const DEFAULT_HASHPOWER: usize = 1_000_000;

    /// Runs of each strategy unless configured otherwise.
    pub const DEFAULT_SAMPLES: usize = 1000;

    /// Creates a new [`SimulationBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `strategy` to the simulation group.
    pub fn add_strategy<S: Strategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));

        self
    }

    /// Add every strategy in `strategies`, in order.
    pub fn add_strategies<I>(mut self, strategies: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Strategy>>,
    {
        self.strategies.extend(strategies);

        self
    }

    /// Sets the number of draws available in each round (default
    /// [`Self::DEFAULT_HASHPOWER`]).
    pub fn hashpower(mut self, hashpower: usize) -> Self {
        self.hashpower = Some(hashpower);

        self
    }

    /// Sets the number of rounds in each run, including the seeding round
    /// (default [`DEFAULT_ROUNDS`]).
    pub fn rounds(mut self, rounds: usize) -> Self {
        self.rounds = Some(rounds);

        self
    }

    /// Sets the number of times each strategy is run (default
    /// [`Self::DEFAULT_SAMPLES`]).
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);

        self
    }

    /// Fixes the master seed so that results can be reproduced. A random seed
    /// is picked otherwise.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);

        self
    }

    /// Creates a [`SimulationGroup`] from the specified parameters.
    pub fn build(self) -> Result<SimulationGroup, SimulationBuildError> {
        use SimulationBuildError::*;

        let SimulationBuilder {
            hashpower,
            rounds,
            samples,
            seed,
            strategies,
        } = self;

        if strategies.is_empty() {
            return Err(NoStrategies);
        }

        let hashpower =
            NonZeroUsize::new(hashpower.unwrap_or(Self::DEFAULT_HASHPOWER))
                .ok_or(ZeroHashpower)?;
        let rounds = NonZeroUsize::new(rounds.unwrap_or(DEFAULT_ROUNDS))
            .ok_or(ZeroRounds)?;
        let samples =
            NonZeroUsize::new(samples.unwrap_or(Self::DEFAULT_SAMPLES))
                .ok_or(ZeroSamples)?;
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());

        Ok(SimulationGroup {
            strategies,
            hashpower,
            rounds,
            samples,
            seed,
        })
    }
}
