//! Multi-colony firefly optimization for continuous, derivative-free
//! problems.
//!
//! Provides a population-based metaheuristic built from four pieces:
//!
//! - **Attraction**: each firefly moves toward strictly brighter
//!   (lower-cost) neighbors, weighted by `beta0 * exp(-gamma * r²)`, plus
//!   a decaying random walk.
//! - **Migration**: colonies periodically swap the second half of their
//!   population.
//! - **Breeding** (optional): tournament selection and uniform crossover
//!   replace the weakest individuals of each colony.
//! - **Runner**: a fixed-length loop that reports the best individual of
//!   the final population.
//!
//! # Example
//!
//! ```
//! use u_firefly::{FireflyConfig, FireflyRunner};
//! use u_firefly::objective::benchmarks::rosenbrock;
//!
//! let config = FireflyConfig::default()
//!     .with_steps(100)
//!     .with_colonies(2)
//!     .with_population_size(30)
//!     .with_dimensions(3)
//!     .with_genetic_algorithm(10, 8, 10)
//!     .with_seed(7);
//!
//! let result = FireflyRunner::run(&rosenbrock, &config)?;
//! assert_eq!(result.best.len(), 3);
//! # Ok::<(), u_firefly::FireflyError>(())
//! ```
//!
//! # Architecture
//!
//! The objective is an opaque collaborator ([`Objective`]). Population
//! state is a fixed-rank [`Swarm`] with axis order
//! `[colony][individual][dimension]`. Every random draw happens on the
//! caller's thread, so runs with a fixed seed are identical with or without
//! the `parallel` feature.

pub mod error;
pub mod firefly;
pub mod objective;
pub mod random;
pub mod swarm;

pub use error::{FireflyError, Result};
pub use firefly::{
    FireflyConfig, FireflyResult, FireflyRunner, FireflyState, MigrationPolicy, StepOutcome,
    ZeroCostPolicy,
};
pub use objective::Objective;
pub use swarm::Swarm;
