//! Append-only score log, one line per round.

use crate::error::LedgerError;
use core::fmt;
use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// Result of one round: the best fitness, plus the mean fitness per agent tag in play mode
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub round: u64,
    pub best: f64,
    pub averages: Vec<(String, f64)>,
}

impl ScoreEntry {
    pub fn best(round: u64, best: f64) -> Self {
        Self {
            round,
            best,
            averages: vec![],
        }
    }

    pub fn averages(round: u64, best: f64, averages: Vec<(String, f64)>) -> Self {
        Self {
            round,
            best,
            averages,
        }
    }
}

/// `"<round> <best>"`, followed by `" <tag>:<mean>"` for every averaged tag
impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.round, self.best)?;
        for (tag, mean) in self.averages.iter() {
            write!(f, " {tag}:{mean}")?;
        }
        Ok(())
    }
}

pub trait Ledger {
    fn append(&mut self, line: &str) -> Result<(), LedgerError>;

    /// Truncate the log and start it over with `header`
    fn clear(&mut self, header: &str) -> Result<(), LedgerError>;

    fn record(&mut self, entry: &ScoreEntry) -> Result<(), LedgerError> {
        self.append(&entry.to_string())
    }
}

/// A score log on disk. Every line is flushed as soon as it is written.
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    file: Option<File>,
}

impl FileLedger {
    /// Open `path` for appending, creating it and its directory if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| LedgerError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let file = Self::append_handle(&path)?;
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_handle(path: &Path) -> Result<File, LedgerError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LedgerError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    fn io(&self) -> impl FnOnce(std::io::Error) -> LedgerError + '_ {
        |source| LedgerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Ledger for FileLedger {
    fn append(&mut self, line: &str) -> Result<(), LedgerError> {
        let path = self.path.clone();
        let file = match self.file.take() {
            Some(file) => file,
            None => Self::append_handle(&self.path)?,
        };
        let file = self.file.insert(file);
        writeln!(file, "{line}")
            .and_then(|()| file.flush())
            .map_err(|source| LedgerError::Io { path, source })
    }

    fn clear(&mut self, header: &str) -> Result<(), LedgerError> {
        // close before truncating; if anything below fails, the next append reopens
        self.file = None;
        let mut file = File::create(&self.path).map_err(self.io())?;
        writeln!(file, "{header}")
            .and_then(|()| file.flush())
            .map_err(self.io())?;
        drop(file);
        self.file = Some(Self::append_handle(&self.path)?);
        Ok(())
    }
}

/// A score log kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    pub lines: Vec<String>,
}

impl Ledger for MemoryLedger {
    fn append(&mut self, line: &str) -> Result<(), LedgerError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn clear(&mut self, header: &str) -> Result<(), LedgerError> {
        self.lines.clear();
        self.lines.push(header.to_string());
        Ok(())
    }
}
