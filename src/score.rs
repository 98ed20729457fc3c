use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Difficulty;

const APP_DIR_NAME: &str = "snake";
const RECORDS_FILE_NAME: &str = "records.json";

/// Errors raised by a [`ScoreStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("records file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("records file is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Values that survive between runs.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub high_score: u32,
    pub games_played: u32,
    pub difficulty_speed_ms: u64,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            high_score: 0,
            games_played: 0,
            difficulty_speed_ms: Difficulty::default().speed_ms(),
        }
    }
}

impl Records {
    /// Returns the stored difficulty, falling back to the default for
    /// speeds that are not on the menu.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_speed_ms(self.difficulty_speed_ms).unwrap_or_default()
    }

    /// Folds one finished game into the records.
    ///
    /// Returns true when `score` set a new high score.
    pub fn record_game(&mut self, score: u32) -> bool {
        self.games_played = self.games_played.saturating_add(1);
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }
}

/// Read/write port for persisted records.
pub trait ScoreStore {
    fn load(&self) -> Result<Records, StoreError>;
    fn save(&mut self, records: &Records) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same records, so a test can keep one
/// handle and inspect what the session wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Records>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(records: Records) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Returns the currently stored records.
    #[must_use]
    pub fn records(&self) -> Records {
        *self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Records, StoreError> {
        Ok(self.records())
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = *records;
        Ok(())
    }
}

/// JSON file store in the platform data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the platform-correct records path.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(records_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    /// Returns default records when the file does not exist yet (first run).
    fn load(&self) -> Result<Records, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Records::default()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(StoreError::Parse)
    }

    /// Writes records, creating parent directories when needed.
    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records).map_err(StoreError::Encode)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Returns the platform-correct records file path.
#[must_use]
pub fn records_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(RECORDS_FILE_NAME);
    base
}
