//! Cheap selection of the best seeds from a stream of draws

use crate::{candidate::Candidate, draw::DrawSource};

/// Keeps the `k` largest values added so far, in non-increasing order.
///
/// Values are always accepted while fewer than `k` are held. Once full, a
/// value is inserted before the first strictly smaller entry and the
/// smallest entry falls off; values no larger than every held entry are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopK {
    capacity: usize,
    values: Vec<u64>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self {
            capacity: k,
            values: Vec::with_capacity(k),
        }
    }

    pub fn add(&mut self, value: u64) {
        match self.values.iter().position(|&v| v < value) {
            Some(i) => {
                self.values.insert(i, value);
                self.values.truncate(self.capacity);
            }
            None if !self.is_full() => self.values.push(value),
            None => (),
        }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Turns every held value into a seeded [`Candidate`] with its first
    /// round already finished.
    pub fn materialize(self) -> Vec<Candidate> {
        self.values
            .into_iter()
            .map(|value| {
                let mut candidate = Candidate::seed(value);
                candidate.finalize();
                candidate
            })
            .collect()
    }
}

/// Draws `hashpower` values and returns the best `k` of them as a finalized
/// pool, best first.
pub fn seed_pool(
    k: usize,
    hashpower: usize,
    source: &mut dyn DrawSource,
) -> Vec<Candidate> {
    let mut top = TopK::new(k);
    for _ in 0..hashpower {
        top.add(source.draw());
    }

    top.materialize()
}

#[cfg(test)]
mod tests {
    use crate::draw::Replay;

    use super::{seed_pool, TopK};

    #[test]
    fn fills_under_capacity() {
        let mut top = TopK::new(3);
        top.add(5);
        top.add(2);
        top.add(9);

        assert_eq!(top.values(), &[9, 5, 2]);
        assert!(top.is_full());
    }

    #[test]
    fn full_selector_inserts_or_drops() {
        let mut top = TopK::new(3);
        for v in [5, 2, 9] {
            top.add(v);
        }

        top.add(1);
        assert_eq!(top.values(), &[9, 5, 2]);

        top.add(6);
        assert_eq!(top.values(), &[9, 6, 5]);

        top.add(100);
        assert_eq!(top.values(), &[100, 9, 6]);
    }

    #[test]
    fn zero_capacity_holds_nothing() {
        let mut top = TopK::new(0);
        top.add(7);

        assert!(top.is_empty());
        assert!(top.materialize().is_empty());
    }

    #[test]
    fn materialize_finishes_first_round() {
        let mut top = TopK::new(2);
        top.add(3);
        top.add(8);

        let pool = top.materialize();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].history(), &[8]);
        assert_eq!(pool[0].minimum(), 8);
        assert_eq!(pool[0].latest(), 0);
        assert_eq!(pool[1].history(), &[3]);
    }

    #[test]
    fn seed_pool_consumes_hashpower() {
        let mut source = Replay::new([4, 1, 7, 3, 9]).unwrap();
        let pool = seed_pool(2, 5, &mut source);

        assert_eq!(source.consumed(), 5);
        let seeds: Vec<_> = pool.iter().map(|c| c.minimum()).collect();
        assert_eq!(seeds, vec![9, 7]);
    }
}
