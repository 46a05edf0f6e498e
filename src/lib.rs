pub mod macros;

pub mod agent;
pub mod archive;
pub mod area;
pub mod config;
pub mod constants;
pub mod controller;
pub mod crossover;
pub mod error;
pub mod genome;
pub mod ledger;
pub mod mutate;
pub mod population;
pub mod random;
pub mod reproduce;
pub mod selection;

pub use agent::{Agent, Prototype, Snapshot, Status};
pub use archive::{roster_from_dir, Archive, DirArchive, MemoryArchive};
pub use area::{Area, AreaGenerator, BoxField, Placement, Scenery};
pub use config::SimulationConfig;
pub use controller::{GenerationController, State};
pub use error::Error;
pub use genome::{BoatGenome, Genome};
pub use ledger::{FileLedger, Ledger, MemoryLedger, ScoreEntry};
pub use mutate::Perturbation;
pub use population::Population;
pub use random::{default_rng, seeded_rng, Happens, WyRng};
pub use reproduce::{Breeding, Reproduction};
pub use selection::{ParentSet, Selection};
