//! Firefly optimization loop.
//!
//! [`FireflyRunner`] drives the lifecycle
//! `Initialized → Running → Terminated`: draw the swarm, run exactly
//! `steps` steps, then flatten every colony and report the best individual
//! of the final population.

use super::config::FireflyConfig;
use super::state::FireflyState;
use crate::error::{FireflyError, Result};
use crate::objective::Objective;
use crate::random::create_rng;
use crate::swarm::Swarm;
use rand::Rng;

/// Result of a firefly optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireflyResult {
    /// Coordinates of the best individual in the final population.
    pub best: Vec<f64>,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Number of steps executed. Always equals the configured `steps`.
    pub steps: usize,

    /// Exploration factor after the last decay.
    pub final_alpha: f64,

    /// Swarm-wide minimum cost evaluated at the start of each step.
    pub cost_history: Vec<f64>,

    /// Final population, all colonies.
    pub final_swarm: Swarm,
}

/// Executes the firefly optimization loop.
///
/// # Usage
///
/// ```
/// use u_firefly::{FireflyConfig, FireflyRunner};
/// use u_firefly::objective::benchmarks::sphere;
///
/// let config = FireflyConfig::default()
///     .with_steps(50)
///     .with_colonies(2)
///     .with_population_size(20)
///     .with_dimensions(2)
///     .with_migrate_every(10)
///     .with_breeding_sizes(2, 1)
///     .with_seed(42);
///
/// let result = FireflyRunner::run(&sphere, &config).unwrap();
/// assert_eq!(result.steps, 50);
/// assert_eq!(result.cost_history.len(), 50);
/// ```
pub struct FireflyRunner;

impl FireflyRunner {
    /// Runs the optimizer with a generator built from `config.seed`.
    pub fn run<O: Objective>(objective: &O, config: &FireflyConfig) -> Result<FireflyResult> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let state = FireflyState::initialize(config, &mut rng);
        Self::drive(objective, config, state, &mut rng)
    }

    /// Runs the optimizer drawing every random value from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<O: Objective, R: Rng>(
        objective: &O,
        config: &FireflyConfig,
        rng: &mut R,
    ) -> Result<FireflyResult> {
        config.validate()?;
        let state = FireflyState::initialize(config, rng);
        Self::drive(objective, config, state, rng)
    }

    /// Runs `config.steps` steps starting from an existing state.
    ///
    /// The state's swarm must match the configured shape.
    pub fn resume<O: Objective, R: Rng>(
        objective: &O,
        config: &FireflyConfig,
        state: FireflyState,
        rng: &mut R,
    ) -> Result<FireflyResult> {
        config.validate()?;
        check_shape(&state.swarm, config)?;
        Self::drive(objective, config, state, rng)
    }

    /// Main loop. `config` is already validated and matches `state`.
    fn drive<O: Objective, R: Rng>(
        objective: &O,
        config: &FireflyConfig,
        mut state: FireflyState,
        rng: &mut R,
    ) -> Result<FireflyResult> {
        tracing::info!(
            colonies = config.colonies,
            population_size = config.population_size,
            dimensions = config.dimensions,
            steps = config.steps,
            genetic_algorithm = config.use_genetic_algorithm,
            "firefly run started"
        );

        let mut cost_history = Vec::with_capacity(config.steps);
        for _ in 0..config.steps {
            let outcome = state.step(objective, config, rng)?;
            if config.verbose {
                tracing::info!(step = state.step, min_cost = outcome.min_cost);
            } else {
                tracing::trace!(step = state.step, min_cost = outcome.min_cost);
            }
            cost_history.push(outcome.min_cost);
            state = outcome.state;
        }

        let ranked = state.swarm.ranked(objective, config.parallel)?;
        let (best_cost, best) = ranked
            .into_iter()
            .next()
            .ok_or_else(|| FireflyError::config("swarm is empty"))?;

        tracing::info!(best_cost, steps = config.steps, "firefly run finished");

        Ok(FireflyResult {
            best,
            best_cost,
            steps: config.steps,
            final_alpha: state.alpha,
            cost_history,
            final_swarm: state.swarm,
        })
    }
}

fn check_shape(swarm: &Swarm, config: &FireflyConfig) -> Result<()> {
    let expected = (config.colonies, config.population_size, config.dimensions);
    let actual = (swarm.colonies(), swarm.population_size(), swarm.dimensions());
    if expected != actual {
        return Err(FireflyError::config(format!(
            "swarm shape {actual:?} does not match configured shape {expected:?}"
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firefly::MigrationPolicy;
    use crate::objective::benchmarks::{rastrigin, rosenbrock, sphere};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn base() -> FireflyConfig {
        FireflyConfig::default()
            .with_steps(100)
            .with_colonies(2)
            .with_population_size(30)
            .with_dimensions(2)
            .with_migrate_every(20)
            .with_breeding_sizes(2, 1)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_sphere_convergence() {
        let result = FireflyRunner::run(&sphere, &base()).unwrap();
        assert!(
            result.best_cost < 1.0,
            "expected near-zero cost for 2D sphere, got {}",
            result.best_cost
        );
        assert!(result.best.iter().all(|x| x.abs() <= 4.0));
    }

    #[test]
    fn test_fixed_step_count() {
        let config = base().with_steps(37);
        let result = FireflyRunner::run(&sphere, &config).unwrap();
        assert_eq!(result.steps, 37);
        assert_eq!(result.cost_history.len(), 37);
    }

    #[test]
    fn test_zero_steps_reports_initial_population() {
        let config = base().with_steps(0);
        let result = FireflyRunner::run(&sphere, &config).unwrap();
        assert!(result.cost_history.is_empty());
        assert_eq!(result.final_alpha, config.alpha);
        assert_eq!(result.final_swarm.len(), 60);
    }

    #[test]
    fn test_final_alpha_decays() {
        let config = base().with_steps(10).with_alpha(0.5).with_alpha_decay(0.5);
        let result = FireflyRunner::run(&sphere, &config).unwrap();
        assert!((result.final_alpha - 0.5 * 0.5f64.powi(10)).abs() < 1e-15);
    }

    #[test]
    fn test_best_is_minimum_of_final_population() {
        let result = FireflyRunner::run(&rosenbrock, &base()).unwrap();
        let costs = result.final_swarm.evaluate(&rosenbrock, false).unwrap();
        let min = costs.into_iter().fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_cost, min);
        assert_eq!(rosenbrock(&result.best), result.best_cost);
    }

    #[test]
    fn test_invariants_hold_with_breeding() {
        let config = base()
            .with_steps(40)
            .with_colonies(3)
            .with_population_size(10)
            .with_dimensions(4)
            .with_migrate_every(5)
            .with_migration_policy(MigrationPolicy::Random)
            .with_genetic_algorithm(4, 5, 4);

        let result = FireflyRunner::run(&rastrigin, &config).unwrap();

        assert_eq!(result.final_swarm.len(), 30);
        assert_eq!(result.final_swarm.colonies(), 3);
        assert!(result
            .final_swarm
            .within_bounds(config.lower_bound, config.upper_bound));
    }

    #[test]
    fn test_seed_reproducibility() {
        let config = base().with_genetic_algorithm(5, 6, 10).with_steps(30);
        let a = FireflyRunner::run(&rosenbrock, &config).unwrap();
        let b = FireflyRunner::run(&rosenbrock, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = base().with_genetic_algorithm(5, 6, 10).with_steps(30);
        let seq = FireflyRunner::run(&rosenbrock, &config).unwrap();
        let par = FireflyRunner::run(&rosenbrock, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.final_swarm, par.final_swarm);
        assert_eq!(seq.best_cost, par.best_cost);
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let config = base().with_genetic_algorithm(5, 31, 10);
        let calls = AtomicUsize::new(0);
        let objective = |x: &[f64]| {
            calls.fetch_add(1, Ordering::Relaxed);
            sphere(x)
        };
        let err = FireflyRunner::run(&objective, &config).unwrap_err();
        assert!(matches!(err, FireflyError::TournamentTooLarge { .. }));
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_non_finite_final_evaluation_aborts_run() {
        // One step without breeding evaluates the 60 individuals once; the
        // final ranking is the second pass.
        let config = base().with_steps(1);
        let calls = AtomicUsize::new(0);
        let objective = |x: &[f64]| {
            if calls.fetch_add(1, Ordering::Relaxed) < 60 {
                sphere(x)
            } else {
                f64::NAN
            }
        };
        let err = FireflyRunner::run(&objective, &config).unwrap_err();
        assert!(matches!(err, FireflyError::NonFiniteCost { .. }));
        assert_eq!(calls.load(Ordering::Relaxed), 120);
    }

    #[test]
    fn test_resume_rejects_shape_mismatch() {
        let config = base();
        let mut rng = create_rng(Some(1));
        let swarm = Swarm::uniform(1, 30, 2, -4.0, 4.0, &mut rng);
        let state = FireflyState::from_swarm(swarm, config.alpha);
        assert!(FireflyRunner::resume(&sphere, &config, state, &mut rng).is_err());
    }

    #[test]
    fn test_resume_from_swarm() {
        let config = base().with_steps(5).with_colonies(1).with_population_size(2);
        let swarm = Swarm::from_positions(1, 2, 2, vec![0.0, 0.0, 3.0, 3.0]).unwrap();
        let state = FireflyState::from_swarm(swarm, 0.0);
        let mut rng = create_rng(Some(1));
        let result = FireflyRunner::resume(&sphere, &config, state, &mut rng).unwrap();
        // No exploration: the origin never moves and stays best.
        assert_eq!(result.best, vec![0.0, 0.0]);
        assert_eq!(result.best_cost, 0.0);
    }

    #[test]
    fn test_breeding_run_makes_progress() {
        let config = base()
            .with_steps(150)
            .with_dimensions(6)
            .with_population_size(40)
            .with_genetic_algorithm(10, 8, 20);

        let result = FireflyRunner::run(&rosenbrock, &config).unwrap();

        assert!(
            result.best_cost < result.cost_history[0],
            "expected improvement over the initial swarm: {} >= {}",
            result.best_cost,
            result.cost_history[0]
        );
    }
}
