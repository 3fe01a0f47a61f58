//! Round state as reported by the game server

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::error::FetchError;

/// Opaque game session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One fetch worth of authoritative round state. Immutable once fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSnapshot {
    /// Current round, always >= 1
    pub current_round: u32,
    /// Milliseconds left in the round at fetch time
    pub remaining_ms: u64,
}

impl RoundSnapshot {
    pub fn new(current_round: u32, remaining_ms: u64) -> Self {
        Self {
            current_round: current_round.max(1),
            remaining_ms,
        }
    }

    /// Whole seconds left, rounded down
    pub fn seconds_left(&self) -> u64 {
        self.remaining_ms / 1000
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_millis(self.remaining_ms)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRoundState {
    current_round: i64,
    remaining_time: i64,
}

/// Parses a `{ currentRound, remainingTime }` body into a snapshot.
///
/// Both fields are integers; `remainingTime` is in milliseconds. A round
/// below 1, a negative remaining time or a round number that does not fit
/// in `u32` is an error, as is any other shape.
pub fn parse_round_state(body: &str) -> Result<RoundSnapshot, FetchError> {
    let wire: WireRoundState = serde_json::from_str(body)?;

    if wire.current_round < 1 {
        return Err(FetchError::InvalidSnapshot(format!(
            "currentRound must be >= 1, got {}",
            wire.current_round
        )));
    }
    let current_round = u32::try_from(wire.current_round).map_err(|_| {
        FetchError::InvalidSnapshot(format!("currentRound out of range: {}", wire.current_round))
    })?;

    let remaining_ms = u64::try_from(wire.remaining_time).map_err(|_| {
        FetchError::InvalidSnapshot(format!(
            "remainingTime must be >= 0, got {}",
            wire.remaining_time
        ))
    })?;

    Ok(RoundSnapshot {
        current_round,
        remaining_ms,
    })
}
