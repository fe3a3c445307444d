//! Per-round score tracking for a single allocation target

/// One allocation target. Receives draws during a round and keeps the
/// running maximum as that round's score.
///
/// # Invariants
/// - `latest` never decreases within a round.
/// - Once two or more rounds are finished, `minimum` is no greater than any
///   entry of `history`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    minimum: u64,
    history: Vec<u64>,
    latest: u64,
}

impl Candidate {
    /// Creates a [`Candidate`] whose `minimum` and `latest` both start at
    /// `value`.
    pub fn seed(value: u64) -> Self {
        Self {
            minimum: value,
            history: vec![],
            latest: value,
        }
    }

    /// Feeds one draw to the round in progress.
    #[inline]
    pub fn receive_draw(&mut self, value: u64) {
        if value > self.latest {
            self.latest = value;
        }
    }

    /// Commits the round in progress to `history` and starts a new one.
    ///
    /// The first finished round never lowers `minimum`, which still holds the
    /// seed value at that point.
    pub fn finalize(&mut self) {
        if !self.history.is_empty() && self.latest < self.minimum {
            self.minimum = self.latest;
        }
        self.history.push(self.latest);
        self.latest = 0;
    }

    /// Returns true if the round in progress has not yet matched the worst
    /// finished round.
    #[inline]
    pub fn wants_more(&self) -> bool {
        self.latest < self.minimum
    }

    /// Lowest finished round score seen so far.
    pub fn minimum(&self) -> u64 {
        self.minimum
    }

    /// Score of the round in progress.
    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// Finished round scores, in round order.
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// Number of finished rounds.
    pub fn rounds(&self) -> usize {
        self.history.len()
    }

    /// Score of the first finished round (the seed, for seeded pools).
    pub fn opening(&self) -> Option<u64> {
        self.history.first().copied()
    }
}
