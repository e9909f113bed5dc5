use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Words the learner has marked as known. Serializes as a flat JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnedSet {
    words: BTreeSet<String>,
}

impl LearnedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the word was not already known.
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_string())
    }

    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(word)
    }

    /// Flips the known state and returns the new state.
    pub fn toggle(&mut self, word: &str) -> bool {
        if self.words.remove(word) {
            false
        } else {
            self.words.insert(word.to_string());
            true
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LearnedSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_words: usize,
    pub learned_words: usize,
    pub progress_percent: u32,
}

impl Statistics {
    pub fn compute(total_words: usize, learned: &LearnedSet) -> Self {
        let learned_words = learned.len();
        let progress_percent = if total_words == 0 {
            0
        } else {
            ((learned_words as f64 / total_words as f64) * 100.0).round() as u32
        };
        Self {
            total_words,
            learned_words,
            progress_percent,
        }
    }
}

#[derive(Debug)]
pub enum ProgressError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::Io(err) => write!(f, "progress io error: {err}"),
            ProgressError::Json(err) => write!(f, "progress encoding error: {err}"),
        }
    }
}

impl std::error::Error for ProgressError {}

impl From<std::io::Error> for ProgressError {
    fn from(value: std::io::Error) -> Self {
        ProgressError::Io(value)
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(value: serde_json::Error) -> Self {
        ProgressError::Json(value)
    }
}

/// File-backed storage for the learned set.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing files load as an empty set; unreadable or corrupt files are
    /// logged and treated the same way.
    pub fn load(&self) -> LearnedSet {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved progress yet");
                return LearnedSet::default();
            }
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "failed to read progress file");
                return LearnedSet::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(set) => set,
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "ignoring corrupt progress file");
                LearnedSet::default()
            }
        }
    }

    pub fn save(&self, learned: &LearnedSet) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec(learned)?;
        fs::write(&self.path, bytes)?;
        debug!(path = %self.path.display(), words = learned.len(), "saved progress");
        Ok(())
    }
}
