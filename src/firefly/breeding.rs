//! Tournament breeding.
//!
//! Runs per colony, independently:
//!
//! 1. Invert costs into fitness (`1 / cost`), honoring the
//!    [`ZeroCostPolicy`].
//! 2. For each child, sample `tournament_size` distinct individuals and
//!    take the two with the highest fitness as parents.
//! 3. Build the child by uniform crossover: one fair coin per dimension,
//!    heads takes `parent1`.
//! 4. Sort the colony by cost ascending, keep the best
//!    `population_size - num_children`, append the children.
//!
//! Replacement is elitist; parent selection is not.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use super::config::{FireflyConfig, ZeroCostPolicy};
use crate::error::{FireflyError, Result};
use crate::swarm::Swarm;
use rand::seq::index;
use rand::Rng;

/// Parameters of one breeding event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreedingParams {
    pub tournament_size: usize,
    pub num_children: usize,
    pub zero_cost: ZeroCostPolicy,
}

impl BreedingParams {
    pub fn from_config(config: &FireflyConfig) -> Self {
        Self {
            tournament_size: config.tournament_size,
            num_children: config.num_children,
            zero_cost: config.zero_cost,
        }
    }
}

/// Inverts `[colony][individual]` costs into fitness.
pub fn fitness(costs: &[f64], population_size: usize, policy: ZeroCostPolicy) -> Result<Vec<f64>> {
    costs
        .iter()
        .enumerate()
        .map(|(k, &c)| match policy {
            ZeroCostPolicy::Clamp { epsilon } if c.abs() < epsilon => Ok(1.0 / epsilon),
            ZeroCostPolicy::Reject if c == 0.0 => Err(FireflyError::ZeroCost {
                colony: k / population_size,
                individual: k % population_size,
            }),
            _ => Ok(1.0 / c),
        })
        .collect()
}

/// Samples `size` distinct individual indices from `0..population_size`.
///
/// # Panics
/// Panics if `size > population_size`.
pub fn tournament<R: Rng>(population_size: usize, size: usize, rng: &mut R) -> Vec<usize> {
    index::sample(rng, population_size, size).into_vec()
}

/// The two tournament entries with the highest fitness, best first.
///
/// Ties keep tournament order. A single-entry tournament returns that
/// entry as both parents.
///
/// # Panics
/// Panics if `entrants` is empty.
pub fn top_two(entrants: &[usize], fitness: &[f64]) -> (usize, usize) {
    assert!(!entrants.is_empty(), "tournament must not be empty");

    let mut first = entrants[0];
    let mut second: Option<usize> = None;
    for &idx in &entrants[1..] {
        if fitness[idx] > fitness[first] {
            second = Some(first);
            first = idx;
        } else if second.is_none_or(|s| fitness[idx] > fitness[s]) {
            second = Some(idx);
        }
    }
    (first, second.unwrap_or(first))
}

/// Uniform crossover with an explicit coin per dimension.
///
/// `true` takes the value from `parent1`, `false` from `parent2`.
///
/// # Panics
/// Panics if the slices differ in length.
pub fn crossover_with_mask(parent1: &[f64], parent2: &[f64], mask: &[bool]) -> Vec<f64> {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert_eq!(parent1.len(), mask.len(), "mask must cover every dimension");

    mask.iter()
        .zip(parent1.iter().zip(parent2))
        .map(|(&heads, (&a, &b))| if heads { a } else { b })
        .collect()
}

/// Uniform crossover with fair coin flips.
pub fn uniform_crossover<R: Rng>(parent1: &[f64], parent2: &[f64], rng: &mut R) -> Vec<f64> {
    let mask: Vec<bool> = (0..parent1.len()).map(|_| rng.random_bool(0.5)).collect();
    crossover_with_mask(parent1, parent2, &mask)
}

/// Breeds one colony.
///
/// `colony` is `[individual][dimension]` flat, `costs` and `fitness` hold
/// one value per individual. Returns the new colony with the same length.
pub fn breed_colony<R: Rng>(
    colony: &[f64],
    costs: &[f64],
    fitness: &[f64],
    dimensions: usize,
    params: &BreedingParams,
    rng: &mut R,
) -> Vec<f64> {
    let pop = costs.len();
    let rows: Vec<&[f64]> = colony.chunks_exact(dimensions).collect();

    let children: Vec<Vec<f64>> = (0..params.num_children)
        .map(|_| {
            let entrants = tournament(pop, params.tournament_size, rng);
            let (p1, p2) = top_two(&entrants, fitness);
            uniform_crossover(rows[p1], rows[p2], rng)
        })
        .collect();

    let mut ranked: Vec<usize> = (0..pop).collect();
    ranked.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));

    let survivors = pop - params.num_children;
    let mut next = Vec::with_capacity(colony.len());
    for &i in &ranked[..survivors] {
        next.extend_from_slice(rows[i]);
    }
    for child in &children {
        next.extend_from_slice(child);
    }
    next
}

/// Runs one breeding event over every colony.
///
/// `costs` must be the `[colony][individual]` costs of `swarm`.
pub fn breed<R: Rng>(
    swarm: &Swarm,
    costs: &[f64],
    params: &BreedingParams,
    rng: &mut R,
) -> Result<Swarm> {
    let pop = swarm.population_size();
    let fit = fitness(costs, pop, params.zero_cost)?;

    let mut next = Vec::with_capacity(swarm.as_slice().len());
    for s in 0..swarm.colonies() {
        let range = s * pop..(s + 1) * pop;
        next.extend(breed_colony(
            swarm.colony(s),
            &costs[range.clone()],
            &fit[range],
            swarm.dimensions(),
            params,
            rng,
        ));
    }
    Ok(swarm.with_positions(next))
}
