//! Multi-colony firefly algorithm.
//!
//! Fireflies are candidate solution vectors. Each step, every individual is
//! drawn toward strictly brighter (lower-cost) individuals of its own
//! colony, with attractiveness decaying exponentially in squared distance,
//! plus a uniform random walk whose magnitude decays geometrically.
//! Colonies periodically exchange half their population, and an optional
//! tournament breeding phase replaces the weakest individuals with
//! uniform-crossover children.
//!
//! # Key Types
//!
//! - [`FireflyConfig`]: Run parameters, builder methods and validation
//! - [`FireflyState`]: Immutable per-step state record and the step function
//! - [`FireflyRunner`]: Executes the fixed-length optimization loop
//! - [`FireflyResult`]: Best individual of the final population and history
//!
//! # Submodules
//!
//! - [`attraction`]: Pairwise attraction and random walk
//! - [`migration`]: Half-population exchange between colonies
//! - [`breeding`]: Tournament selection and uniform crossover
//!
//! # References
//!
//! - Yang (2008), *Nature-Inspired Metaheuristic Algorithms*
//! - Yang (2010), "Firefly Algorithm, Stochastic Test Functions and Design
//!   Optimisation"
//! - Whitley, Rana & Heckendorn (1999), "The Island Model Genetic Algorithm"

pub mod attraction;
pub mod breeding;
mod config;
pub mod migration;
mod runner;
mod state;

pub use config::{FireflyConfig, MigrationPolicy, ZeroCostPolicy};
pub use runner::{FireflyResult, FireflyRunner};
pub use state::{FireflyState, StepOutcome};
