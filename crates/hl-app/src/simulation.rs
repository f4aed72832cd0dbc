//! Simulation facade: topology in, steady-state solution out.

use std::path::Path;

use hl_project::{TopologyDef, load_topology};
use hl_solver::{SolverConfig, SteadySolution, SteadyStateSolver};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::error::AppResult;
use crate::model::{HydraulicModel, compile_topology, solver_config_from};

/// A compiled model with its solver settings.
///
/// A failed solve leaves the simulation untouched and ready to solve again.
#[derive(Debug, Clone)]
pub struct Simulation {
    model: HydraulicModel,
    config: SolverConfig,
    seed: Option<u64>,
}

impl Simulation {
    pub fn new(topology: &TopologyDef) -> AppResult<Self> {
        let model = compile_topology(topology)?;
        let config = solver_config_from(&topology.solver);
        config.validate()?;
        Ok(Self {
            model,
            config,
            seed: topology.solver.seed,
        })
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let topology = load_topology(path)?;
        info!(path = %path.display(), "loaded topology");
        Self::new(&topology)
    }

    pub fn model(&self) -> &HydraulicModel {
        &self.model
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn with_config(mut self, config: SolverConfig) -> AppResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Replace the retry count and flow policy where an override is given.
    /// `Some(false)` turns reverse flow off even when the topology enabled it.
    pub fn with_overrides(
        self,
        max_retries: Option<usize>,
        allow_reverse_flow: Option<bool>,
    ) -> AppResult<Self> {
        let mut config = self.config.clone();
        if let Some(n) = max_retries {
            config.max_retries = n;
        }
        if let Some(allow) = allow_reverse_flow {
            config.allow_reverse_flow = allow;
        }
        self.with_config(config)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Solve from a seeded generator when a seed is set, else from entropy.
    pub fn solve_steady_state(&self) -> AppResult<SteadySolution> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.solve_steady_state_with_rng(&mut rng)
    }

    pub fn solve_steady_state_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> AppResult<SteadySolution> {
        let problem = self.model.problem(self.config.allow_reverse_flow)?;
        let solver = SteadyStateSolver::new(self.config.clone());
        Ok(solver.solve(&problem, rng)?)
    }
}
