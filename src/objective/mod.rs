//! Objective function contract.
//!
//! The optimizer treats the cost function as an opaque, pure collaborator.
//! It is called once per solution vector; batching over colonies and
//! individuals is handled by [`Swarm::evaluate`](crate::swarm::Swarm::evaluate).
//!
//! Any `Fn(&[f64]) -> f64 + Send + Sync` closure is an [`Objective`].
//!
//! # Submodules
//!
//! - [`benchmarks`]: standard continuous test functions

pub mod benchmarks;

/// A cost function to be minimized.
///
/// # Contract
///
/// - Pure and deterministic: the same input always yields the same cost.
/// - Defined over the whole bounded domain.
/// - Returns a finite value. NaN or infinity aborts the run with
///   [`FireflyError::NonFiniteCost`](crate::FireflyError::NonFiniteCost).
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because colonies may be evaluated in
/// parallel using rayon.
pub trait Objective: Send + Sync {
    /// Returns the cost of one solution vector. Lower is better.
    fn cost(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn cost(&self, x: &[f64]) -> f64 {
        self(x)
    }
}
