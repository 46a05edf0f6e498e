//! Persisting agent snapshots, and loading them back as a stored roster.

use crate::{
    agent::{Prototype, Snapshot},
    error::ArchiveError,
    genome::Genome,
};
use std::{
    fs::{self, read_dir},
    path::{Path, PathBuf},
};

pub trait Archive<G: Genome> {
    /// Persist `snapshot` under `name`. Names may contain `/` to group snapshots.
    fn save(&mut self, snapshot: &Snapshot<G>, name: &str) -> Result<(), ArchiveError>;
}

/// Writes every snapshot as `<dir>/<name>.json`
#[derive(Debug, Clone)]
pub struct DirArchive {
    dir: PathBuf,
}

impl DirArchive {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl<G: Genome> Archive<G> for DirArchive {
    fn save(&mut self, snapshot: &Snapshot<G>, name: &str) -> Result<(), ArchiveError> {
        let path = self.dir.join(format!("{name}.json"));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ArchiveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json =
            serde_json::to_string_pretty(snapshot).map_err(|source| ArchiveError::Serialization {
                name: name.to_string(),
                source,
            })?;
        fs::write(&path, json).map_err(|source| ArchiveError::Io { path, source })
    }
}

/// Keeps every saved snapshot in memory, in save order
#[derive(Debug, Clone)]
pub struct MemoryArchive<G: Genome> {
    pub saved: Vec<(String, Snapshot<G>)>,
}

impl<G: Genome> Default for MemoryArchive<G> {
    fn default() -> Self {
        Self { saved: vec![] }
    }
}

impl<G: Genome> Archive<G> for MemoryArchive<G> {
    fn save(&mut self, snapshot: &Snapshot<G>, name: &str) -> Result<(), ArchiveError> {
        self.saved.push((name.to_string(), snapshot.clone()));
        Ok(())
    }
}

/// Load every `.json` snapshot directly inside `dir` as a roster, ordered by file name.
pub fn roster_from_dir<G: Genome, P: AsRef<Path>>(dir: P) -> Result<Vec<Prototype<G>>, ArchiveError> {
    let dir = dir.as_ref();
    let io = |source| ArchiveError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = read_dir(dir)
        .map_err(io)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io)?;
    paths.retain(|p| p.extension().is_some_and(|ext| ext == "json"));
    paths.sort();

    let roster = paths
        .into_iter()
        .map(|path| {
            let s = fs::read_to_string(&path).map_err(|source| ArchiveError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<Snapshot<G>>(&s)
                .map(Prototype::from)
                .map_err(|source| ArchiveError::Serialization {
                    name: path.display().to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if roster.is_empty() {
        return Err(ArchiveError::Empty(dir.to_path_buf()));
    }
    Ok(roster)
}
