//! Error types for the evolution controller and its sinks.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Failure writing to or resetting a score ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure persisting or loading an agent snapshot
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot serialization failed for {name}: {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no snapshots found in {0}")]
    Empty(PathBuf),
}

/// Invalid or unreadable simulation configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be finite and non-negative, got {value}")]
    NonNegative { field: &'static str, value: f64 },

    #[error("{field} must be within [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
}

/// Top-level error for anything fallible in this crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
