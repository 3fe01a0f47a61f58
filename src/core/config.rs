//! Configuration constants and settings

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Game rules
//
// The server decides when rounds start and end; the client only needs to
// know which round number closes the game.
pub const FINAL_ROUND: u32 = 10;

// Countdown used when the server cannot be reached
pub const FALLBACK_ROUND_SECONDS: u64 = 120;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// Server connection
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const SERVER_URL_ENV: &str = "TRADEFLOOR_SERVER";
pub const HTTP_TIMEOUT_SECONDS: u64 = 10;

// Screen flow
pub const TRANSITION_PAUSE_SECONDS: u64 = 5;

// Files
pub const APP_DIR_NAME: &str = "tradefloor";
pub const SETTINGS_FILE_NAME: &str = "config.toml";
pub const STORE_FILE_NAME: &str = "rounds.toml";

// UI Constants
pub const CONNECTING_MESSAGE: &str = "syncing with server...";
pub const PROGRESS_CHARS: &str = "##-";
pub const PROGRESS_TEMPLATE: &str = "{prefix:.bold} [{bar:30}] {wide_msg}";

/// Optional settings file contents. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: Option<String>,
    pub final_round: Option<u32>,
    pub fallback_seconds: Option<u64>,
    pub http_timeout_seconds: Option<u64>,
    pub store_path: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing settings {}", path.display()))
    }

    /// Loads an explicit settings file, or the per-user one if it exists.
    ///
    /// An explicit path that is missing is an error; a missing per-user file
    /// just means defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_settings_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds.unwrap_or(HTTP_TIMEOUT_SECONDS).max(1))
    }

    /// Store file location: settings override, else the per-user data dir
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(default_store_path)
    }
}

/// `~/.config/tradefloor/config.toml` or the platform equivalent
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// `~/.local/share/tradefloor/rounds.toml` or the platform equivalent
pub fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(STORE_FILE_NAME))
}

/// Determines the game server URL
///
/// Priority order:
/// 1. --server flag
/// 2. TRADEFLOOR_SERVER env var
/// 3. `server_url` in the settings file
/// 4. DEFAULT_SERVER_URL
pub fn resolve_server_url(
    flag: Option<&str>,
    env_value: Option<String>,
    settings: &Settings,
) -> String {
    flag.map(str::to_string)
        .or(env_value.filter(|v| !v.trim().is_empty()))
        .or_else(|| settings.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

/// Knobs for a round clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    /// Round whose expiry routes to the end-game screen
    pub final_round: u32,
    /// Countdown to resume with when the server is unreachable
    pub fallback_duration: Duration,
    /// Local tick period
    pub tick_interval: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            final_round: FINAL_ROUND,
            fallback_duration: Duration::from_secs(FALLBACK_ROUND_SECONDS),
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl ClockConfig {
    /// Builds the clock config: flag, then settings file, then defaults
    pub fn resolve(final_round_flag: Option<u32>, settings: &Settings) -> Self {
        let defaults = Self::default();
        Self {
            final_round: final_round_flag
                .or(settings.final_round)
                .unwrap_or(defaults.final_round),
            fallback_duration: settings
                .fallback_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.fallback_duration),
            tick_interval: defaults.tick_interval,
        }
        .normalized()
    }

    /// Clamps values that would stall or break the countdown
    pub fn normalized(mut self) -> Self {
        self.final_round = self.final_round.max(1);
        if self.fallback_duration < Duration::from_secs(1) {
            self.fallback_duration = Duration::from_secs(1);
        }
        if self.tick_interval.is_zero() {
            self.tick_interval = TICK_INTERVAL;
        }
        self
    }

    /// Fallback countdown in whole seconds
    pub fn fallback_seconds(&self) -> u64 {
        self.fallback_duration.as_secs()
    }
}
