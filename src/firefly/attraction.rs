//! Attraction engine.
//!
//! One call to [`attract`] advances every individual of every colony with
//! simultaneous-update semantics: all pulls are computed against the
//! pre-step snapshot, then the new swarm is written once.
//!
//! For individual `i` in colony `s`:
//!
//! ```text
//! move[i, j]  = cost[i] > cost[j]
//! delta[i, j] = x[j] - x[i]
//! beta[i, j]  = beta0 * exp(-gamma * |delta[i, j]|^2)
//! pull[i]     = Σ_j move[i, j] * beta[i, j] * delta[i, j]
//! x'[i]       = clamp(x[i] + pull[i] + walk[i], lower, upper)
//! ```
//!
//! The strict inequality means equal costs never attract and the `i == j`
//! term is always zero.
//!
//! # References
//!
//! - Yang (2008), *Nature-Inspired Metaheuristic Algorithms*, ch. 8
//! - Yang (2009), "Firefly Algorithms for Multimodal Optimization"

use super::config::FireflyConfig;
use crate::swarm::Swarm;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parameters of the attraction update that stay fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionParams {
    pub beta0: f64,
    pub gamma: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl AttractionParams {
    pub fn from_config(config: &FireflyConfig) -> Self {
        Self {
            beta0: config.beta0,
            gamma: config.gamma,
            lower_bound: config.lower_bound,
            upper_bound: config.upper_bound,
        }
    }
}

/// Attractiveness at the given squared distance.
///
/// With `gamma == 0` this is `beta0` for every pair.
#[inline]
pub fn attractiveness(beta0: f64, gamma: f64, squared_distance: f64) -> f64 {
    beta0 * (-gamma * squared_distance).exp()
}

/// Draws the random-walk term for every coordinate of the swarm.
///
/// Each value is `alpha * (u - 0.5) * (upper - lower)` with `u ~ U[0, 1)`,
/// laid out like [`Swarm::as_slice`].
pub fn random_walk<R: Rng>(
    len: usize,
    alpha: f64,
    lower: f64,
    upper: f64,
    rng: &mut R,
) -> Vec<f64> {
    let span = upper - lower;
    (0..len)
        .map(|_| alpha * (rng.random::<f64>() - 0.5) * span)
        .collect()
}

/// Net pull on individual `i` of one colony, accumulated into `out`.
///
/// `colony` is `[individual][dimension]` flat, `costs` holds one cost per
/// individual.
pub fn pull(
    colony: &[f64],
    costs: &[f64],
    dimensions: usize,
    i: usize,
    beta0: f64,
    gamma: f64,
    out: &mut [f64],
) {
    debug_assert_eq!(out.len(), dimensions);
    out.fill(0.0);

    let xi = &colony[i * dimensions..(i + 1) * dimensions];
    for (j, xj) in colony.chunks_exact(dimensions).enumerate() {
        if costs[i] <= costs[j] {
            continue;
        }
        let squared_distance: f64 = xi
            .iter()
            .zip(xj)
            .map(|(a, b)| (b - a) * (b - a))
            .sum();
        let beta = attractiveness(beta0, gamma, squared_distance);
        for ((o, a), b) in out.iter_mut().zip(xi).zip(xj) {
            *o += beta * (b - a);
        }
    }
}

/// Moves every individual of one colony into `next`.
fn advance_colony(
    colony: &[f64],
    costs: &[f64],
    walk: &[f64],
    dimensions: usize,
    params: &AttractionParams,
    next: &mut [f64],
) {
    let mut net = vec![0.0; dimensions];
    let rows = next
        .chunks_exact_mut(dimensions)
        .zip(colony.chunks_exact(dimensions))
        .zip(walk.chunks_exact(dimensions));
    for (i, ((row, x), w)) in rows.enumerate() {
        pull(colony, costs, dimensions, i, params.beta0, params.gamma, &mut net);
        for (((out, &xd), &pd), &wd) in row.iter_mut().zip(x).zip(&net).zip(w) {
            *out = (xd + pd + wd).clamp(params.lower_bound, params.upper_bound);
        }
    }
}

/// Advances the whole swarm by one attraction step.
///
/// `costs` must be the `[colony][individual]` costs of `swarm` and `walk`
/// a buffer from [`random_walk`] of the same length as the positions.
/// The result is clamped into the configured bounds.
pub fn attract(
    swarm: &Swarm,
    costs: &[f64],
    walk: &[f64],
    params: &AttractionParams,
    parallel: bool,
) -> Swarm {
    debug_assert_eq!(costs.len(), swarm.len());
    debug_assert_eq!(walk.len(), swarm.as_slice().len());

    let dims = swarm.dimensions();
    let pop = swarm.population_size();
    let span = swarm.colony_span();
    let mut next = vec![0.0; swarm.as_slice().len()];

    #[cfg(feature = "parallel")]
    {
        if parallel {
            next.par_chunks_mut(span)
                .enumerate()
                .for_each(|(s, out)| {
                    advance_colony(
                        swarm.colony(s),
                        &costs[s * pop..(s + 1) * pop],
                        &walk[s * span..(s + 1) * span],
                        dims,
                        params,
                        out,
                    );
                });
            return swarm.with_positions(next);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for (s, out) in next.chunks_mut(span).enumerate() {
        advance_colony(
            swarm.colony(s),
            &costs[s * pop..(s + 1) * pop],
            &walk[s * span..(s + 1) * span],
            dims,
            params,
            out,
        );
    }
    swarm.with_positions(next)
}
