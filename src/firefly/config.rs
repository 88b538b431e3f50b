//! Firefly configuration.
//!
//! [`FireflyConfig`] holds every parameter of a run. All values are read
//! once at initialization and fixed for the run; only the exploration
//! factor evolves, and that lives in [`FireflyState`](super::FireflyState).

use crate::error::{FireflyError, Result};

/// How second halves are reassigned between colonies during migration.
///
/// The two policies give different mixing guarantees, so the choice is
/// explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MigrationPolicy {
    /// Single-step rotation: colony `s` receives the second half of colony
    /// `(s + 1) % colonies`.
    ///
    /// Every colony's second half comes from a different colony whenever
    /// there is more than one colony.
    #[default]
    Rotation,

    /// Uniformly random permutation of colony indices.
    ///
    /// A colony may keep its own second half.
    Random,
}

/// How a cost of exactly zero is handled when costs are inverted into
/// fitness during breeding.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroCostPolicy {
    /// Replace costs with magnitude below `epsilon` by `epsilon` before
    /// inverting.
    Clamp {
        /// Smallest cost magnitude inverted as-is. Must be positive.
        epsilon: f64,
    },

    /// Abort the run with [`FireflyError::ZeroCost`].
    Reject,
}

impl Default for ZeroCostPolicy {
    fn default() -> Self {
        ZeroCostPolicy::Clamp { epsilon: 1e-12 }
    }
}

/// Configuration for the firefly optimizer.
///
/// # Defaults
///
/// ```
/// use u_firefly::FireflyConfig;
///
/// let config = FireflyConfig::default();
/// assert_eq!(config.steps, 5000);
/// assert_eq!(config.colonies, 4);
/// assert_eq!(config.population_size, 1000);
/// assert!(!config.use_genetic_algorithm);
/// ```
///
/// `tournament_size` (100) and `num_children` (500) are validated against
/// `population_size` even with breeding disabled, so smaller populations
/// need [`with_breeding_sizes`](Self::with_breeding_sizes) as well.
///
/// # Builder Pattern
///
/// ```
/// use u_firefly::{FireflyConfig, MigrationPolicy};
///
/// let config = FireflyConfig::default()
///     .with_steps(500)
///     .with_colonies(2)
///     .with_population_size(100)
///     .with_dimensions(4)
///     .with_migration_policy(MigrationPolicy::Random)
///     .with_genetic_algorithm(10, 20, 50)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FireflyConfig {
    /// Number of iterations of the main loop. The run always executes
    /// exactly this many steps.
    pub steps: usize,

    /// Number of independent sub-populations.
    pub colonies: usize,

    /// Individuals per colony. Constant for the whole run.
    pub population_size: usize,

    /// Solution vector length.
    pub dimensions: usize,

    /// Lower coordinate bound, applied to every dimension.
    pub lower_bound: f64,

    /// Upper coordinate bound, applied to every dimension.
    pub upper_bound: f64,

    /// Migration period in steps. 0 disables migration.
    pub migrate_every: usize,

    /// Migration permutation policy.
    pub migration_policy: MigrationPolicy,

    /// Attractiveness at zero distance.
    pub beta0: f64,

    /// Light absorption coefficient: decay rate of attractiveness with
    /// squared distance. 0 makes attraction independent of distance.
    pub gamma: f64,

    /// Initial exploration magnitude.
    pub alpha: f64,

    /// Multiplicative per-step decay of `alpha`, in `(0, 1]`.
    pub alpha_decay: f64,

    /// Enables the tournament breeding phase.
    pub use_genetic_algorithm: bool,

    /// Breeding period in steps.
    pub breed_every: usize,

    /// Participants sampled (without replacement) per tournament.
    pub tournament_size: usize,

    /// Children bred per colony per breeding event.
    pub num_children: usize,

    /// Zero-cost handling during fitness inversion.
    pub zero_cost: ZeroCostPolicy,

    /// Whether to evaluate and move colonies in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results for a fixed
    /// seed are identical either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Log per-step progress at `info` instead of `trace`.
    pub verbose: bool,
}

impl Default for FireflyConfig {
    fn default() -> Self {
        Self {
            steps: 5000,
            colonies: 4,
            population_size: 1000,
            dimensions: 12,
            lower_bound: -4.0,
            upper_bound: 4.0,
            migrate_every: 100,
            migration_policy: MigrationPolicy::default(),
            beta0: 2.0,
            gamma: 1.0,
            alpha: 0.1,
            alpha_decay: 0.995,
            use_genetic_algorithm: false,
            breed_every: 10,
            tournament_size: 100,
            num_children: 500,
            zero_cost: ZeroCostPolicy::default(),
            parallel: true,
            seed: None,
            verbose: false,
        }
    }
}

impl FireflyConfig {
    pub fn with_steps(mut self, n: usize) -> Self {
        self.steps = n;
        self
    }

    pub fn with_colonies(mut self, n: usize) -> Self {
        self.colonies = n;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_dimensions(mut self, n: usize) -> Self {
        self.dimensions = n;
        self
    }

    /// Sets both coordinate bounds.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Sets the migration period (0 to disable).
    pub fn with_migrate_every(mut self, n: usize) -> Self {
        self.migrate_every = n;
        self
    }

    pub fn with_migration_policy(mut self, policy: MigrationPolicy) -> Self {
        self.migration_policy = policy;
        self
    }

    pub fn with_beta0(mut self, beta0: f64) -> Self {
        self.beta0 = beta0;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_alpha_decay(mut self, decay: f64) -> Self {
        self.alpha_decay = decay;
        self
    }

    /// Enables breeding with the given period, tournament size and
    /// children per event.
    pub fn with_genetic_algorithm(
        mut self,
        breed_every: usize,
        tournament_size: usize,
        num_children: usize,
    ) -> Self {
        self.use_genetic_algorithm = true;
        self.breed_every = breed_every;
        self.tournament_size = tournament_size;
        self.num_children = num_children;
        self
    }

    /// Sets the tournament size and children per event without enabling
    /// breeding.
    pub fn with_breeding_sizes(mut self, tournament_size: usize, num_children: usize) -> Self {
        self.tournament_size = tournament_size;
        self.num_children = num_children;
        self
    }

    /// Disables the breeding phase, keeping its parameters.
    pub fn without_genetic_algorithm(mut self) -> Self {
        self.use_genetic_algorithm = false;
        self
    }

    pub fn with_zero_cost(mut self, policy: ZeroCostPolicy) -> Self {
        self.zero_cost = policy;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `true` when migration runs at all for this configuration.
    pub fn migration_enabled(&self) -> bool {
        self.colonies > 1 && self.migrate_every > 0
    }

    /// `true` when migration runs on the given 0-based step.
    pub fn migrates_on(&self, step: usize) -> bool {
        self.migration_enabled() && step.is_multiple_of(self.migrate_every)
    }

    /// `true` when breeding runs on the given 0-based step.
    pub fn breeds_on(&self, step: usize) -> bool {
        self.use_genetic_algorithm && self.breed_every > 0 && step.is_multiple_of(self.breed_every)
    }

    /// Validates the configuration.
    ///
    /// Tournament and children sizes are checked against the population
    /// size even when breeding is disabled.
    pub fn validate(&self) -> Result<()> {
        if self.colonies == 0 {
            return Err(FireflyError::config("colonies must be at least 1"));
        }
        if self.population_size == 0 {
            return Err(FireflyError::config("population_size must be at least 1"));
        }
        if self.dimensions == 0 {
            return Err(FireflyError::config("dimensions must be at least 1"));
        }
        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            return Err(FireflyError::config("bounds must be finite"));
        }
        if self.lower_bound >= self.upper_bound {
            return Err(FireflyError::config(format!(
                "lower_bound ({}) must be less than upper_bound ({})",
                self.lower_bound, self.upper_bound
            )));
        }
        if !(self.upper_bound - self.lower_bound).is_finite() {
            return Err(FireflyError::config(format!(
                "bound range [{}, {}] overflows",
                self.lower_bound, self.upper_bound
            )));
        }
        if !(self.beta0 >= 0.0 && self.beta0.is_finite()) {
            return Err(FireflyError::config(format!(
                "beta0 must be finite and non-negative, got {}",
                self.beta0
            )));
        }
        if !(self.gamma >= 0.0 && self.gamma.is_finite()) {
            return Err(FireflyError::config(format!(
                "gamma must be finite and non-negative, got {}",
                self.gamma
            )));
        }
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(FireflyError::config(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !(self.alpha_decay > 0.0 && self.alpha_decay <= 1.0) {
            return Err(FireflyError::config(format!(
                "alpha_decay must be in (0, 1], got {}",
                self.alpha_decay
            )));
        }
        if self.tournament_size > self.population_size {
            return Err(FireflyError::TournamentTooLarge {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        if self.num_children > self.population_size {
            return Err(FireflyError::TooManyChildren {
                num_children: self.num_children,
                population_size: self.population_size,
            });
        }
        if self.use_genetic_algorithm {
            if self.breed_every == 0 {
                return Err(FireflyError::config(
                    "breed_every must be at least 1 when breeding is enabled",
                ));
            }
            if self.tournament_size < 2 {
                return Err(FireflyError::config(
                    "tournament_size must be at least 2 to pick two parents",
                ));
            }
        }
        if let ZeroCostPolicy::Clamp { epsilon } = self.zero_cost {
            if !(epsilon > 0.0 && epsilon.is_finite()) {
                return Err(FireflyError::config(format!(
                    "zero-cost epsilon must be positive, got {epsilon}"
                )));
            }
        }
        Ok(())
    }
}
