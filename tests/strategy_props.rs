//! Property-based tests for candidates, the top-k selector and strategies.

use proptest::prelude::*;

use hashpower_sim::{
    prelude::{
        catalog, sample_rng, Budget, Candidate, FixedPool, GreedyFilter,
        Replay, RoundRobin, TopK, DEFAULT_ROUNDS,
    },
    strategy::Strategy as Allocation,
};

fn run_seeded<S: Allocation>(
    strategy: &S,
    budget: Budget,
    seed: u64,
) -> Vec<Candidate> {
    let mut rng = sample_rng(seed, 0, 0);
    strategy.run(budget, &mut rng)
}

fn budget_strategy() -> impl proptest::strategy::Strategy<Value = Budget> {
    (16..256usize, 1..10usize)
        .prop_map(|(hashpower, rounds)| Budget { hashpower, rounds })
}

fn pool_size() -> impl proptest::strategy::Strategy<Value = usize> {
    prop::sample::select(vec![1usize, 2, 4, 8, 16])
}

fn is_sorted_by_minimum(pool: &[Candidate]) -> bool {
    pool.windows(2).all(|w| w[0].minimum() >= w[1].minimum())
}

proptest! {
    // 1. The minimum never exceeds any finished round
    #[test]
    fn minimum_tracks_worst_round(
        seed in any::<u64>(),
        rounds in prop::collection::vec(
            prop::collection::vec(any::<u64>(), 0..5),
            2..8,
        ),
    ) {
        let mut candidate = Candidate::seed(seed);
        for draws in rounds {
            for draw in draws {
                candidate.receive_draw(draw);
            }
            candidate.finalize();
        }

        let minimum = candidate.minimum();
        prop_assert!(candidate.history().iter().all(|&h| minimum <= h));
    }

    // 2. The round in progress starts from scratch after every finalize
    #[test]
    fn finalize_resets_latest(seed in any::<u64>(), draw in any::<u64>()) {
        let mut candidate = Candidate::seed(seed);
        candidate.finalize();
        candidate.receive_draw(draw);
        let before = candidate.minimum();
        candidate.finalize();

        prop_assert_eq!(candidate.latest(), 0);
        prop_assert_eq!(candidate.minimum(), before.min(draw));
        prop_assert_eq!(candidate.wants_more(), candidate.minimum() > 0);
    }

    // 3. Top-k keeps the largest values in order
    #[test]
    fn top_k_keeps_largest(
        k in 0..20usize,
        values in prop::collection::hash_set(any::<u64>(), 0..100),
    ) {
        let values: Vec<_> = values.into_iter().collect();
        let mut top = TopK::new(k);
        for &v in values.iter() {
            top.add(v);
        }

        let kept = top.values().to_vec();
        prop_assert!(kept.len() <= k);
        prop_assert_eq!(kept.len(), k.min(values.len()));
        prop_assert!(kept.windows(2).all(|w| w[0] > w[1]));

        let mut expected = values.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.truncate(k);
        prop_assert_eq!(&kept, &expected);

        let materialized = top.materialize();
        prop_assert!(materialized
            .iter()
            .zip(kept.iter())
            .all(|(c, &v)| c.history() == [v].as_slice()));
    }

    // 4. Fixed pool never grows, neither overall nor round over round
    #[test]
    fn fixed_pool_never_grows(
        seed in any::<u64>(),
        budget in budget_strategy(),
    ) {
        let mut previous = FixedPool::DEFAULT_SIZE;
        for rounds in 1..=budget.rounds {
            let budget = budget.with_rounds(rounds);
            let pool = run_seeded(&FixedPool::new(), budget, seed);
            prop_assert!(pool.len() <= previous);
            prop_assert!(pool.iter().all(|c| c.rounds() == rounds));
            previous = pool.len();
        }
    }

    // 5. Round-robin never drops a candidate
    #[test]
    fn round_robin_keeps_whole_pool(
        seed in any::<u64>(),
        budget in budget_strategy(),
        amount in pool_size(),
    ) {
        let pool = run_seeded(&RoundRobin::new(amount), budget, seed);

        prop_assert_eq!(pool.len(), amount);
        prop_assert!(is_sorted_by_minimum(&pool));
        prop_assert!(pool.iter().all(|c| c.rounds() == budget.rounds));
    }

    // 6. Greedy filter survivors are sorted and have finished every round
    #[test]
    fn greedy_filter_survivors(
        seed in any::<u64>(),
        budget in budget_strategy(),
        limit in pool_size(),
        threshold in prop::sample::select(
            vec![0, u64::MAX / 2, u64::MAX / 16 * 15],
        ),
    ) {
        let strategy = GreedyFilter::new(threshold, limit);
        let pool = run_seeded(&strategy, budget, seed);

        prop_assert!(pool.len() <= limit);
        prop_assert!(is_sorted_by_minimum(&pool));
        prop_assert!(pool.iter().all(|c| c.rounds() == budget.rounds));
        prop_assert!(pool
            .iter()
            .all(|c| c.opening().is_some_and(|o| o > threshold)));
    }

    // 7. Identical draw streams give identical output
    #[test]
    fn strategies_are_deterministic(
        seed in any::<u64>(),
        budget in budget_strategy(),
    ) {
        for strategy in catalog(u64::MAX / 2) {
            let mut a = sample_rng(seed, 0, 0);
            let mut b = sample_rng(seed, 0, 0);

            prop_assert_eq!(
                strategy.run(budget, &mut a),
                strategy.run(budget, &mut b)
            );
        }
    }

    // 8. A lone candidate fed no better draws can only get worse
    #[test]
    fn lone_greedy_candidate(rest in prop::collection::vec(0..=100u64, 1..20)) {
        let mut draws = vec![100];
        draws.extend(rest);
        let mut source = Replay::new(draws).unwrap();
        let budget = Budget::new(1);

        let pool = GreedyFilter::new(0, 1).run(budget, &mut source);

        prop_assert_eq!(pool.len(), 1);
        prop_assert!(pool[0].minimum() <= 100);
        prop_assert_eq!(pool[0].rounds(), DEFAULT_ROUNDS);
    }
}
