//! Colony migration.
//!
//! Each colony is split at `population_size / 2`. The first half stays; the
//! second half is replaced by the second half of a source colony chosen by
//! the [`MigrationPolicy`]. Individual counts never change.

use super::config::MigrationPolicy;
use crate::swarm::Swarm;
use rand::seq::SliceRandom;
use rand::Rng;

/// Source colony for each destination colony.
///
/// `order[s]` is the colony whose second half moves into colony `s`. The
/// result is always a permutation of `0..colonies`.
pub fn migration_order<R: Rng>(
    policy: MigrationPolicy,
    colonies: usize,
    rng: &mut R,
) -> Vec<usize> {
    match policy {
        MigrationPolicy::Rotation => (0..colonies).map(|s| (s + 1) % colonies).collect(),
        MigrationPolicy::Random => {
            let mut order: Vec<usize> = (0..colonies).collect();
            order.shuffle(rng);
            order
        }
    }
}

/// Applies a migration order to the swarm.
///
/// # Panics
/// Panics if `order.len()` differs from the number of colonies or an entry
/// is out of range.
pub fn migrate(swarm: &Swarm, order: &[usize]) -> Swarm {
    assert_eq!(
        order.len(),
        swarm.colonies(),
        "migration order must name one source per colony"
    );

    let dims = swarm.dimensions();
    let split = (swarm.population_size() / 2) * dims;
    let mut next = Vec::with_capacity(swarm.as_slice().len());

    for (s, &source) in order.iter().enumerate() {
        next.extend_from_slice(&swarm.colony(s)[..split]);
        next.extend_from_slice(&swarm.colony(source)[split..]);
    }

    swarm.with_positions(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    /// Colony `s`, individual `i` has the single coordinate `10 * s + i`.
    fn labelled(colonies: usize, pop: usize) -> Swarm {
        let positions = (0..colonies)
            .flat_map(|s| (0..pop).map(move |i| (10 * s + i) as f64))
            .collect();
        Swarm::from_positions(colonies, pop, 1, positions).unwrap()
    }

    #[test]
    fn test_rotation_order() {
        let mut rng = create_rng(Some(1));
        assert_eq!(
            migration_order(MigrationPolicy::Rotation, 4, &mut rng),
            vec![1, 2, 3, 0]
        );
        assert_eq!(migration_order(MigrationPolicy::Rotation, 1, &mut rng), vec![0]);
    }

    #[test]
    fn test_random_order_is_permutation() {
        let mut rng = create_rng(Some(5));
        for _ in 0..50 {
            let mut order = migration_order(MigrationPolicy::Random, 6, &mut rng);
            order.sort_unstable();
            assert_eq!(order, (0..6).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_two_colony_rotation_swaps_halves() {
        let swarm = labelled(2, 4);
        let mut rng = create_rng(Some(0));
        let order = migration_order(MigrationPolicy::Rotation, 2, &mut rng);
        let next = migrate(&swarm, &order);

        assert_eq!(next.colony(0), &[0.0, 1.0, 12.0, 13.0]);
        assert_eq!(next.colony(1), &[10.0, 11.0, 2.0, 3.0]);
    }

    #[test]
    fn test_identity_order_is_noop() {
        let swarm = labelled(3, 5);
        assert_eq!(migrate(&swarm, &[0, 1, 2]), swarm);
    }

    #[test]
    fn test_odd_population_split() {
        // Midpoint of 3 is 1: first half is one individual, second half two.
        let swarm = labelled(2, 3);
        let next = migrate(&swarm, &[1, 0]);
        assert_eq!(next.colony(0), &[0.0, 11.0, 12.0]);
        assert_eq!(next.colony(1), &[10.0, 1.0, 2.0]);
    }

    #[test]
    fn test_multi_dimension_rows_move_together() {
        let swarm = Swarm::from_nested(&[
            vec![vec![0.0, 0.1], vec![1.0, 1.1]],
            vec![vec![2.0, 2.1], vec![3.0, 3.1]],
        ])
        .unwrap();
        let next = migrate(&swarm, &[1, 0]);
        assert_eq!(next.individual(0, 1), &[3.0, 3.1]);
        assert_eq!(next.individual(1, 1), &[1.0, 1.1]);
    }

    proptest! {
        #[test]
        fn prop_migration_preserves_individuals(
            seed in any::<u64>(),
            colonies in 1usize..6,
            pop in 1usize..9,
        ) {
            let mut rng = create_rng(Some(seed));
            let swarm = labelled(colonies, pop);
            let order = migration_order(MigrationPolicy::Random, colonies, &mut rng);
            let next = migrate(&swarm, &order);

            prop_assert_eq!(next.len(), colonies * pop);
            let mut before = swarm.as_slice().to_vec();
            let mut after = next.as_slice().to_vec();
            before.sort_by(f64::total_cmp);
            after.sort_by(f64::total_cmp);
            prop_assert_eq!(before, after);
        }
    }
}
