//! High score persistence
//!
//! The high score is a single decimal integer in a plain text file. Any read
//! problem (missing file, unreadable, garbage) counts as "no high score yet".

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Why a high score write failed
#[derive(Debug)]
pub enum PersistError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io { source, .. } => Some(source),
        }
    }
}

/// File-backed high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the recorded high score, defaulting to 0
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match parse_score(&text) {
                Some(score) => {
                    log::info!("Loaded high score {} from {}", score, self.path.display());
                    score
                }
                None => {
                    log::warn!(
                        "Ignoring malformed high score file {}",
                        self.path.display()
                    );
                    0
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score file found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    /// Overwrite the file with `score`
    pub fn save(&self, score: u32) -> Result<(), PersistError> {
        fs::write(&self.path, score.to_string()).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// Leading decimal integer, surrounding whitespace allowed
fn parse_score(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
