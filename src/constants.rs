//! Centralized defaults for the evolution controller.
//!
//! Every field of [SimulationConfig](crate::config::SimulationConfig) falls back to one of the
//! `SMARTBOATS_` constants below when it is missing from a config file.

// ============================================================================
// Simulation Parameters
// ============================================================================

/// Seconds of simulated time per round
pub const SMARTBOATS_INTERVAL: f64 = 20.0;

/// Number of agents spawned into the area every round
pub const SMARTBOATS_POPULATION: usize = 20;

/// Round number the counter starts from, used for archive naming
pub const SMARTBOATS_INITIAL_ROUND: u64 = 0;

// ============================================================================
// Mutation Parameters
// ============================================================================

/// Scale of the random offset applied to a mutated gene
pub const SMARTBOATS_MUTATION_FACTOR: f64 = 0.1;

/// Per-gene probability of mutating
pub const SMARTBOATS_MUTATION_CHANCE: f64 = 0.2;

// ============================================================================
// Selection Parameters
// ============================================================================

/// Number of parents carried over to seed the next generation
pub const SMARTBOATS_PARENT_COUNT: usize = 2;

/// Default bias for stochastic selection: 0 is pure fitness-proportional,
/// 1 gives the worst agent no weight at all
pub const SMARTBOATS_SELECTION_BIAS: f64 = 0.5;

// ============================================================================
// Crossover Parameters
// ============================================================================

/// Number of cut points used by n-point crossover
pub const SMARTBOATS_CROSSOVER_POINTS: usize = 2;

// ============================================================================
// Storage
// ============================================================================

/// Directory genome snapshots are archived into
pub const SMARTBOATS_ARCHIVE_DIR: &str = "output/generations";

/// Append-only score log
pub const SMARTBOATS_SCORE_PATH: &str = "output/scores.txt";

/// Header written when an evolution run clears the score log
pub const SMARTBOATS_SCORES_HEADER: &str = "Scores";

/// Header written when play mode clears the score log
pub const SMARTBOATS_PLAY_HEADER: &str = "Average Scores";
