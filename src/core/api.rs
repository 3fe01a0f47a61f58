//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - The round clock and its state machine
//! - Countdown rendering
//! - Configuration and settings resolution
//!
//! Internal implementation details are not exposed through this API.

// Clock
pub use super::clock::{
    format_countdown, ClockDeps, ClockRenderer, ClockState, ClockView, Phase, RoundClock,
    RoundOrigin, SyncOutcome, TickOutcome,
};

// Configuration
pub use super::config::{
    default_settings_path, default_store_path, resolve_server_url, ClockConfig, Settings,
};
pub use super::config::{FALLBACK_ROUND_SECONDS, FINAL_ROUND, SERVER_URL_ENV};

// Terminal utilities (re-exported from utils)
pub use crate::utils::{screen_title, set_terminal_title};

// Internal helpers for command modules
pub(crate) use super::progress::CountdownBar;
