//! Standard continuous benchmark functions.
//!
//! All are minimization problems. Useful for tests, benches, and for
//! comparing plain fireflies against runs with breeding enabled.

use std::f64::consts::PI;

/// Sphere: `f(x) = Σ x_i²`.
///
/// Unimodal, separable. Global minimum `f(0, ..., 0) = 0`.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// Rosenbrock: `f(x) = Σ 100 (x_{i+1} - x_i²)² + (1 - x_i)²`.
///
/// Narrow curved valley, non-separable. Global minimum `f(1, ..., 1) = 0`.
/// A single-coordinate input has cost 0.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

/// Rastrigin: `f(x) = 10 n + Σ (x_i² - 10 cos(2π x_i))`.
///
/// Highly multimodal with a regular lattice of local minima.
/// Global minimum `f(0, ..., 0) = 0`.
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>()
}

/// Ackley: nearly flat outer region with a deep central hole.
///
/// Global minimum `f(0, ..., 0) = 0`. An empty input has cost 0.
pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|v| v * v).sum();
    let sum_cos: f64 = x.iter().map(|v| (2.0 * PI * v).cos()).sum();
    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + std::f64::consts::E
}
