//! Population state.
//!
//! A [`Swarm`] stores every candidate solution of every colony in one flat,
//! row-major buffer with the fixed axis order
//! `[colony][individual][dimension]`. Costs produced by
//! [`Swarm::evaluate`] use the matching `[colony][individual]` layout, so
//! `costs[s * population_size + i]` belongs to individual `i` of colony `s`.

use crate::error::{FireflyError, Result};
use crate::objective::Objective;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The full set of colonies.
///
/// The shape is fixed at construction. Migration and breeding produce new
/// swarms of the same shape, never a different individual count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swarm {
    colonies: usize,
    population_size: usize,
    dimensions: usize,
    positions: Vec<f64>,
}

impl Swarm {
    /// Draws every coordinate uniformly from `[lower, upper)`.
    ///
    /// # Panics
    /// Panics if any axis length is zero or `lower >= upper`.
    pub fn uniform<R: Rng>(
        colonies: usize,
        population_size: usize,
        dimensions: usize,
        lower: f64,
        upper: f64,
        rng: &mut R,
    ) -> Self {
        assert!(
            colonies > 0 && population_size > 0 && dimensions > 0,
            "swarm axes must be non-empty"
        );
        let len = colonies * population_size * dimensions;
        let positions = (0..len).map(|_| rng.random_range(lower..upper)).collect();
        Self {
            colonies,
            population_size,
            dimensions,
            positions,
        }
    }

    /// Wraps an existing flat buffer laid out as `[colony][individual][dimension]`.
    pub fn from_positions(
        colonies: usize,
        population_size: usize,
        dimensions: usize,
        positions: Vec<f64>,
    ) -> Result<Self> {
        if colonies == 0 || population_size == 0 || dimensions == 0 {
            return Err(FireflyError::config("swarm axes must be non-empty"));
        }
        let expected = colonies * population_size * dimensions;
        if positions.len() != expected {
            return Err(FireflyError::ShapeMismatch {
                expected,
                actual: positions.len(),
            });
        }
        Ok(Self {
            colonies,
            population_size,
            dimensions,
            positions,
        })
    }

    /// Builds a swarm from nested `colonies[s][i][d]` vectors.
    ///
    /// Every colony must hold the same number of individuals and every
    /// individual the same number of coordinates.
    pub fn from_nested(colonies: &[Vec<Vec<f64>>]) -> Result<Self> {
        let population_size = colonies.first().map_or(0, Vec::len);
        let dimensions = colonies
            .first()
            .and_then(|c| c.first())
            .map_or(0, Vec::len);

        let mut positions = Vec::with_capacity(colonies.len() * population_size * dimensions);
        for colony in colonies {
            if colony.len() != population_size {
                return Err(FireflyError::config(format!(
                    "colony has {} individuals, expected {population_size}",
                    colony.len()
                )));
            }
            for individual in colony {
                if individual.len() != dimensions {
                    return Err(FireflyError::config(format!(
                        "individual has {} coordinates, expected {dimensions}",
                        individual.len()
                    )));
                }
                positions.extend_from_slice(individual);
            }
        }

        Self::from_positions(colonies.len(), population_size, dimensions, positions)
    }

    /// Same shape, new coordinates.
    pub(crate) fn with_positions(&self, positions: Vec<f64>) -> Self {
        debug_assert_eq!(positions.len(), self.positions.len());
        Self {
            colonies: self.colonies,
            population_size: self.population_size,
            dimensions: self.dimensions,
            positions,
        }
    }

    pub fn colonies(&self) -> usize {
        self.colonies
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Total number of individuals (`colonies * population_size`).
    pub fn len(&self) -> usize {
        self.colonies * self.population_size
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of `f64` values occupied by one colony.
    pub(crate) fn colony_span(&self) -> usize {
        self.population_size * self.dimensions
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.positions
    }

    /// Flat coordinates of colony `s`, `[individual][dimension]`.
    pub fn colony(&self, s: usize) -> &[f64] {
        let span = self.colony_span();
        &self.positions[s * span..(s + 1) * span]
    }

    /// Coordinates of individual `i` in colony `s`.
    pub fn individual(&self, s: usize, i: usize) -> &[f64] {
        let start = (s * self.population_size + i) * self.dimensions;
        &self.positions[start..start + self.dimensions]
    }

    /// Iterates over every individual in colony-major order.
    pub fn individuals(&self) -> impl Iterator<Item = &[f64]> {
        self.positions.chunks_exact(self.dimensions)
    }

    /// Clamps every coordinate into `[lower, upper]`.
    pub fn clamp(&mut self, lower: f64, upper: f64) {
        for x in &mut self.positions {
            *x = x.clamp(lower, upper);
        }
    }

    /// Returns `true` if every coordinate lies within `[lower, upper]`.
    pub fn within_bounds(&self, lower: f64, upper: f64) -> bool {
        self.positions.iter().all(|&x| x >= lower && x <= upper)
    }

    /// Evaluates the objective for every individual.
    ///
    /// Returns costs in `[colony][individual]` order. Fails on the first
    /// non-finite cost encountered.
    pub fn evaluate<O: Objective>(&self, objective: &O, parallel: bool) -> Result<Vec<f64>> {
        let costs = evaluate_rows(objective, &self.positions, self.dimensions, parallel);

        if let Some((k, &value)) = costs.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(FireflyError::NonFiniteCost {
                colony: k / self.population_size,
                individual: k % self.population_size,
                value,
            });
        }
        Ok(costs)
    }

    /// Flattens all colonies into one pool sorted by cost ascending.
    pub fn ranked<O: Objective>(
        &self,
        objective: &O,
        parallel: bool,
    ) -> Result<Vec<(f64, Vec<f64>)>> {
        let costs = self.evaluate(objective, parallel)?;
        let mut pool: Vec<(f64, Vec<f64>)> = costs
            .into_iter()
            .zip(self.individuals())
            .map(|(c, x)| (c, x.to_vec()))
            .collect();
        pool.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(pool)
    }
}

fn evaluate_rows<O: Objective>(
    objective: &O,
    positions: &[f64],
    dimensions: usize,
    parallel: bool,
) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return positions
                .par_chunks_exact(dimensions)
                .map(|x| objective.cost(x))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    positions
        .chunks_exact(dimensions)
        .map(|x| objective.cost(x))
        .collect()
}
