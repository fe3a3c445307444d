/*!
Re-export of common values and datatypes

Must be imported manually.

```
use hashpower_sim::prelude::*;
```
*/

use crate::{candidate, draw, results, simulation, strategy, top_k};

pub use candidate::Candidate;

pub use draw::{sample_rng, DrawSource, Replay, ReplayError};

pub use results::{
    Format, ResultsBuilder, ResultsTable, SubmissionLog, DEFAULT_THRESHOLD,
};

pub use simulation::{
    SampleOutput, SimulationBuildError, SimulationBuilder, SimulationGroup,
    StrategyOutput,
};

pub use strategy::{
    catalog, sort_by_minimum, Budget, FixedPool, GreedyFilter, RoundRobin,
    Strategy, DEFAULT_ROUNDS,
};

pub use top_k::{seed_pool, TopK};
