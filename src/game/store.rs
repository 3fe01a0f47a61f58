//! Durable fallback store for the last seen round number
//!
//! The clock only reads this when the server cannot be reached at start-up.
//! Loads are best-effort: a missing or unreadable file means "no stored
//! round". Saves replace a file that is not valid TOML but refuse to touch
//! one that could not be read.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use super::round::GameId;
use crate::utils::write_atomically;

/// Key-value store holding the last known round per game
pub trait RoundStore: Send + Sync {
    /// Last round recorded for the game, if any
    fn load(&self, game_id: &GameId) -> Option<u32>;

    /// Records the round for the game
    fn save(&self, game_id: &GameId, round: u32) -> Result<()>;
}

/// In-process store. Lives as long as the process does.
#[derive(Debug, Default)]
pub struct MemoryRoundStore {
    rounds: Mutex<HashMap<GameId, u32>>,
}

impl MemoryRoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a round for one game
    pub fn with_round(game_id: &GameId, round: u32) -> Self {
        let store = Self::new();
        store
            .rounds
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(game_id.clone(), round);
        store
    }
}

impl RoundStore for MemoryRoundStore {
    fn load(&self, game_id: &GameId) -> Option<u32> {
        self.rounds
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(game_id)
            .copied()
    }

    fn save(&self, game_id: &GameId, round: u32) -> Result<()> {
        self.rounds
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(game_id.clone(), round);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    games: BTreeMap<String, StoredRound>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRound {
    round: u32,
    saved_at: String,
}

/// Store backed by a TOML file, one table per game:
///
/// ```toml
/// [games.abc123]
/// round = 4
/// saved_at = "2026-03-01T12:00:00+00:00"
/// ```
#[derive(Debug)]
pub struct FileRoundStore {
    path: PathBuf,
    // Serializes read-modify-write cycles from this process
    lock: Mutex<()>,
}

impl FileRoundStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing and corrupt files read as empty; I/O errors propagate
    fn read_file(&self) -> Result<StoreFile> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        match toml::from_str(&content) {
            Ok(file) => Ok(file),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "round store is corrupt, starting over");
                Ok(StoreFile::default())
            }
        }
    }
}

impl RoundStore for FileRoundStore {
    fn load(&self, game_id: &GameId) -> Option<u32> {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match self.read_file() {
            Ok(file) => file.games.get(game_id.as_str()).map(|entry| entry.round),
            Err(e) => {
                debug!(error = %e, "round store unreadable");
                None
            }
        }
    }

    fn save(&self, game_id: &GameId, round: u32) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut file = self.read_file()?;
        file.games.insert(
            game_id.as_str().to_string(),
            StoredRound {
                round,
                saved_at: Utc::now().to_rfc3339(),
            },
        );
        let content = toml::to_string_pretty(&file).context("serializing round store")?;
        write_atomically(&self.path, &content)
    }
}
