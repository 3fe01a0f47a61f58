//! Round clock state machine.
//!
//! `ClockState` is plain data plus transitions; it never touches timers or
//! the network. The coordinator drives it and decides when to tick and
//! when to fetch.

use crate::game::RoundSnapshot;

/// Lifecycle of a round clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Started, waiting for the first fetch to settle
    Initializing,
    /// Counting down once per tick
    Running,
    /// Countdown hit zero; the expiry action has been claimed
    Expiring,
    /// Stopped for good
    Terminated,
}

impl Phase {
    pub fn text(&self) -> &str {
        match self {
            Phase::Initializing => "syncing",
            Phase::Running => "running",
            Phase::Expiring => "expired",
            Phase::Terminated => "stopped",
        }
    }
}

/// Where the displayed round number came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOrigin {
    /// Nothing known yet, showing round 1
    Default,
    /// Read from the fallback store after a failed fetch
    Stored,
    /// Reported by the server
    Server,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not counting (initializing, expiring or stopped)
    Idle,
    /// Decremented, still time left
    Counted,
    /// Reached zero on this tick. Returned at most once per countdown.
    Expired,
}

/// What happened to a fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Snapshot applied
    Applied,
    /// Fetch failed before any countdown existed; fallback countdown started
    FellBack,
    /// Fetch failed while a countdown was live; countdown left alone
    Kept,
    /// A newer fetch was issued after this one; result dropped
    Stale,
    /// Clock already stopped; result dropped
    Discarded,
}

/// Read-only copy of the clock for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockView {
    pub round: u32,
    pub seconds_left: u64,
    pub phase: Phase,
    pub syncing: bool,
    pub origin: RoundOrigin,
}

#[derive(Debug, Clone)]
pub struct ClockState {
    pub round: u32,
    pub seconds_left: u64,
    pub phase: Phase,
    pub origin: RoundOrigin,
    // Bumped for every fetch issued; only the latest may write
    generation: u64,
    // Generation of the latest fetch while it is outstanding
    pending: Option<u64>,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    pub fn new() -> Self {
        Self {
            round: 1,
            seconds_left: 0,
            phase: Phase::Initializing,
            origin: RoundOrigin::Default,
            generation: 0,
            pending: None,
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> ClockView {
        ClockView {
            round: self.round,
            seconds_left: self.seconds_left,
            phase: self.phase,
            syncing: self.is_syncing(),
            origin: self.origin,
        }
    }

    /// Registers a new fetch and returns its generation tag.
    ///
    /// Returns `None` once the clock is terminated.
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.phase == Phase::Terminated {
            return None;
        }
        self.generation += 1;
        self.pending = Some(self.generation);
        Some(self.generation)
    }

    fn settle(&mut self, generation: u64) -> Result<(), SyncOutcome> {
        if self.phase == Phase::Terminated {
            return Err(SyncOutcome::Discarded);
        }
        if generation != self.generation {
            return Err(SyncOutcome::Stale);
        }
        self.pending = None;
        Ok(())
    }

    /// Applies a successful fetch tagged with `generation`.
    ///
    /// While expiring only the round number is taken; the countdown stays
    /// at zero so the expiry cannot be re-armed.
    pub fn apply_snapshot(&mut self, generation: u64, snapshot: &RoundSnapshot) -> SyncOutcome {
        if let Err(outcome) = self.settle(generation) {
            return outcome;
        }

        self.round = snapshot.current_round.max(1);
        self.origin = RoundOrigin::Server;
        if self.phase != Phase::Expiring {
            self.seconds_left = snapshot.seconds_left();
            self.phase = Phase::Running;
        }
        SyncOutcome::Applied
    }

    /// Applies a failed fetch tagged with `generation`.
    ///
    /// Before any countdown exists, resumes with `fallback_seconds` and the
    /// last known round: in-memory first, then `stored_round`, then 1.
    pub fn apply_failure(
        &mut self,
        generation: u64,
        fallback_seconds: u64,
        stored_round: Option<u32>,
    ) -> SyncOutcome {
        if let Err(outcome) = self.settle(generation) {
            return outcome;
        }
        if self.phase != Phase::Initializing {
            return SyncOutcome::Kept;
        }

        if self.origin == RoundOrigin::Default {
            match stored_round {
                Some(round) => {
                    self.round = round.max(1);
                    self.origin = RoundOrigin::Stored;
                }
                None => self.round = 1,
            }
        }
        self.seconds_left = fallback_seconds;
        self.phase = Phase::Running;
        SyncOutcome::FellBack
    }

    /// Advances the countdown by one second, clamped at zero.
    ///
    /// A running clock already at zero (zero-time snapshot) expires on its
    /// next tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.phase = Phase::Expiring;
            TickOutcome::Expired
        } else {
            TickOutcome::Counted
        }
    }

    pub fn terminate(&mut self) {
        self.phase = Phase::Terminated;
        self.pending = None;
    }
}
