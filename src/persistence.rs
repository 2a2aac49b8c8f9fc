/// High-score persistence.
///
/// A tiny key → integer store.  `FileStore` keeps one file per key holding a
/// base-10 integer; `MemoryStore` backs tests and runs without a data dir.
/// Store failures never stop the game: loading falls back to 0 and saving
/// is skipped with a warning.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::entities::TickEvents;
use crate::error::StoreError;

/// Key the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "highScore";

pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

// ── File-backed store ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|_| StoreError::Parse {
                key: key.to_string(),
                value: raw.trim().to_string(),
            })
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value.to_string()).map_err(|source| StoreError::Io { path, source })
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

// ── High score helpers ────────────────────────────────────────────────────────

/// Saved high score, or 0 if nothing is stored or the store is unusable.
pub fn load_high_score(store: &impl ScoreStore) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(score)) => {
            info!("loaded high score {}", score);
            score
        }
        Ok(None) => 0,
        Err(e) => {
            warn!("could not load high score, starting from 0: {}", e);
            0
        }
    }
}

/// Persist a new high score; failures are logged and otherwise ignored.
pub fn save_high_score(store: &mut impl ScoreStore, score: u32) {
    if let Err(e) = store.set(HIGH_SCORE_KEY, score) {
        warn!("could not save high score {}: {}", score, e);
    }
}

/// Write the score a tick reported as a new best, if any.
pub fn persist_tick(store: &mut impl ScoreStore, events: &TickEvents) {
    if let Some(best) = events.new_high_score {
        info!("new high score {}", best);
        save_high_score(store, best);
    }
}

/// Persist the best score once more before leaving.
pub fn save_on_exit(store: &mut impl ScoreStore, high_score: u32) {
    if high_score > 0 {
        save_high_score(store, high_score);
    }
}
