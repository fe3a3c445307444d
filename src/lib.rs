/*!
Monte-Carlo simulator for spreading a fixed hashpower budget across scored
mining rounds.

Every unit of hashpower yields one uniformly random `u64`. A
[`Candidate`](candidate::Candidate) scores the highest draw it received in a
round, and its worth is the *lowest* of those per-round scores. Strategies
decide which candidate each draw goes to, and are compared by how often (and
by how much) their candidates finish above a reporting threshold.
*/

pub mod candidate;
pub mod draw;
pub mod prelude;
pub mod results;
pub mod simulation;
pub mod strategy;
pub mod top_k;
