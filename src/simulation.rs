//! Running repeated strategy samples and collecting their output

use std::num::NonZeroUsize;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    candidate::Candidate,
    draw::sample_rng,
    results::ResultsBuilder,
    strategy::{Budget, Strategy},
};

pub mod builder;

pub use builder::{SimulationBuildError, SimulationBuilder};

/// Container for a group of strategies which are sampled under the same
/// budget. Simulations should be run using this struct's `run_all` method.
#[derive(Debug, Clone)]
pub struct SimulationGroup {
    strategies: Vec<Box<dyn Strategy>>,
    hashpower: NonZeroUsize,
    rounds: NonZeroUsize,
    samples: NonZeroUsize,
    seed: u64,
}

/// Contains the output of every sample of one strategy.
#[derive(Debug, Clone)]
pub struct StrategyOutput {
    pub strategy: Box<dyn Strategy>,
    pub budget: Budget,
    /// Samples in the order they were numbered, not the order they ran in.
    pub samples: Vec<SampleOutput>,
}

/// Contains the candidates surviving a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOutput {
    /// 0-based index of this sample.
    pub sample: usize,
    /// Empty when nothing qualified in this run.
    pub candidates: Vec<Candidate>,
}

impl StrategyOutput {
    pub fn name(&self) -> String {
        self.strategy.name()
    }
}

impl SimulationGroup {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Returns the master seed every sample's draw source is derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn budget(&self) -> Budget {
        Budget::new(self.hashpower.get()).with_rounds(self.rounds.get())
    }

    /// Runs every sample of every strategy. Each sample draws from its own
    /// generator, so the output is the same whether or not samples are run
    /// in parallel.
    pub fn run_all(self) -> ResultsBuilder {
        let budget = self.budget();
        let samples = self.samples.get();
        let seed = self.seed;

        info!(
            strategies = self.strategies.len(),
            samples,
            hashpower = budget.hashpower,
            rounds = budget.rounds,
            seed,
            "running simulation group"
        );

        let outputs = self
            .strategies
            .into_iter()
            .enumerate()
            .map(|(index, strategy)| {
                let run = |sample: usize| {
                    let mut rng = sample_rng(seed, index, sample);
                    SampleOutput {
                        sample,
                        candidates: strategy.run(budget, &mut rng),
                    }
                };

                #[cfg(feature = "rayon")]
                let samples: Vec<_> =
                    (0..samples).into_par_iter().map(run).collect();
                #[cfg(not(feature = "rayon"))]
                let samples: Vec<_> = (0..samples).map(run).collect();

                debug!(strategy = %strategy.name(), "finished sampling");

                StrategyOutput { strategy, budget, samples }
            })
            .collect();

        ResultsBuilder::new(outputs)
    }
}
