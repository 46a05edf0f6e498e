//! Run configuration, loaded once and never mutated by the controller.

use crate::{
    constants::*,
    error::ConfigError,
    mutate::Perturbation,
    selection::Selection,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// seconds of simulated time per round
    pub interval: f64,
    /// agents spawned into the area each round
    pub population: usize,
    pub mutation_factor: f64,
    pub mutation_chance: f64,
    pub perturbation: Perturbation,
    pub parent_count: usize,
    pub selection: Selection,
    pub crossover: bool,
    /// crossover inherits whole gene groups instead of single genes
    pub grouped_genes: bool,
    pub crossover_points: usize,
    /// archive every agent of a finished generation instead of just the best
    pub save_complete_generations: bool,
    pub archive_dir: String,
    pub score_path: String,
    pub run_on_start: bool,
    pub initial_round: u64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval: SMARTBOATS_INTERVAL,
            population: SMARTBOATS_POPULATION,
            mutation_factor: SMARTBOATS_MUTATION_FACTOR,
            mutation_chance: SMARTBOATS_MUTATION_CHANCE,
            perturbation: Perturbation::default(),
            parent_count: SMARTBOATS_PARENT_COUNT,
            selection: Selection::default(),
            crossover: false,
            grouped_genes: false,
            crossover_points: SMARTBOATS_CROSSOVER_POINTS,
            save_complete_generations: false,
            archive_dir: SMARTBOATS_ARCHIVE_DIR.to_string(),
            score_path: SMARTBOATS_SCORE_PATH.to_string(),
            run_on_start: false,
            initial_round: SMARTBOATS_INITIAL_ROUND,
            seed: None,
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0. {
        Ok(())
    } else {
        Err(ConfigError::NonNegative { field, value })
    }
}

impl SimulationConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)?.validate()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&s)
    }

    /// Reject values no run can use, then [normalize](Self::normalized) the rest
    pub fn validate(self) -> Result<Self, ConfigError> {
        non_negative("interval", self.interval)?;
        non_negative("mutation_factor", self.mutation_factor)?;
        if !(0. ..=1.).contains(&self.mutation_chance) {
            return Err(ConfigError::Probability {
                field: "mutation_chance",
                value: self.mutation_chance,
            });
        }
        if let Selection::Stochastic { bias } = self.selection {
            if bias.is_nan() {
                return Err(ConfigError::Probability {
                    field: "selection.bias",
                    value: bias,
                });
            }
        }

        Ok(self.normalized())
    }

    /// Clamp the values that have an obvious fix. Never fails.
    pub fn normalized(mut self) -> Self {
        if self.parent_count == 0 {
            warn!("parent_count of 0 raised to 1");
            self.parent_count = 1;
        }

        if self.crossover_points == 0 {
            warn!("crossover_points of 0 raised to 1");
            self.crossover_points = 1;
        }

        if let Selection::Stochastic { bias } = self.selection {
            let clamped = if bias.is_nan() {
                SMARTBOATS_SELECTION_BIAS
            } else {
                bias.clamp(0., 1.)
            };
            if clamped != bias {
                warn!(bias, clamped, "selection bias clamped into [0, 1]");
                self.selection = Selection::Stochastic { bias: clamped };
            }
        }

        while self.archive_dir.len() > 1 && self.archive_dir.ends_with('/') {
            self.archive_dir.pop();
        }

        self
    }
}
