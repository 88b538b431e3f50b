//! Per-step state record.
//!
//! [`FireflyState`] is immutable from the point of view of a step:
//! [`FireflyState::step`] reads the current record and returns a new one.
//! Nothing else in the crate holds mutable run state.

use super::attraction::{self, AttractionParams};
use super::breeding::{self, BreedingParams};
use super::config::FireflyConfig;
use super::migration;
use crate::error::Result;
use crate::objective::Objective;
use crate::swarm::Swarm;
use rand::Rng;

/// Snapshot of a run between steps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireflyState {
    /// Current positions of every colony.
    pub swarm: Swarm,

    /// Current exploration factor.
    pub alpha: f64,

    /// Number of steps completed so far.
    pub step: usize,
}

/// What a single step produced.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// The state after the step.
    pub state: FireflyState,

    /// Minimum swarm cost evaluated at the start of the step.
    pub min_cost: f64,

    /// Whether colonies exchanged second halves during the step.
    pub migrated: bool,

    /// Whether a breeding event ran during the step.
    pub bred: bool,
}

impl FireflyState {
    /// Draws the initial population uniformly within bounds.
    ///
    /// The configuration is assumed valid.
    pub fn initialize<R: Rng>(config: &FireflyConfig, rng: &mut R) -> Self {
        let swarm = Swarm::uniform(
            config.colonies,
            config.population_size,
            config.dimensions,
            config.lower_bound,
            config.upper_bound,
            rng,
        );
        Self::from_swarm(swarm, config.alpha)
    }

    /// Starts a run from an existing swarm.
    pub fn from_swarm(swarm: Swarm, alpha: f64) -> Self {
        Self {
            swarm,
            alpha,
            step: 0,
        }
    }

    /// Runs one full step: attraction, alpha decay, then migration and
    /// breeding when scheduled for this step index.
    pub fn step<O: Objective, R: Rng>(
        &self,
        objective: &O,
        config: &FireflyConfig,
        rng: &mut R,
    ) -> Result<StepOutcome> {
        let costs = self.swarm.evaluate(objective, config.parallel)?;
        let min_cost = costs.iter().copied().fold(f64::INFINITY, f64::min);

        let walk = attraction::random_walk(
            self.swarm.as_slice().len(),
            self.alpha,
            config.lower_bound,
            config.upper_bound,
            rng,
        );
        let mut swarm = attraction::attract(
            &self.swarm,
            &costs,
            &walk,
            &AttractionParams::from_config(config),
            config.parallel,
        );
        let alpha = self.alpha * config.alpha_decay;

        let migrated = config.migrates_on(self.step);
        if migrated {
            let order = migration::migration_order(config.migration_policy, swarm.colonies(), rng);
            tracing::debug!(step = self.step, ?order, "colonies migrated");
            swarm = migration::migrate(&swarm, &order);
        }

        let bred = config.breeds_on(self.step);
        if bred {
            let costs = swarm.evaluate(objective, config.parallel)?;
            swarm = breeding::breed(&swarm, &costs, &BreedingParams::from_config(config), rng)?;
            tracing::debug!(
                step = self.step,
                children = config.num_children,
                "breeding replaced weakest individuals"
            );
        }

        Ok(StepOutcome {
            state: FireflyState {
                swarm,
                alpha,
                step: self.step + 1,
            },
            min_cost,
            migrated,
            bred,
        })
    }
}
