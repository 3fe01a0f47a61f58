//! Round clock: server sync, local ticking and the expiry action.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::clock::state::{ClockState, ClockView, Phase, SyncOutcome, TickOutcome};
use crate::core::config::ClockConfig;
use crate::game::{Destination, GameId, Navigator, RoundSource, RoundStore, ScreenTracker};

/// Collaborators a clock is wired with
#[derive(Clone)]
pub struct ClockDeps {
    pub source: Arc<dyn RoundSource>,
    pub navigator: Arc<dyn Navigator>,
    pub store: Arc<dyn RoundStore>,
    pub screen: ScreenTracker,
    pub config: ClockConfig,
}

struct ClockShared {
    game_id: GameId,
    deps: ClockDeps,
    state: Mutex<ClockState>,
    updates: Arc<watch::Sender<ClockView>>,
}

impl ClockShared {
    fn new(game_id: GameId, deps: ClockDeps, updates: Arc<watch::Sender<ClockView>>) -> Self {
        let state = ClockState::new();
        updates.send_replace(state.view());
        Self {
            game_id,
            deps,
            state: Mutex::new(state),
            updates,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ClockState) {
        self.updates.send_replace(state.view());
    }

    fn terminate(&self) {
        let mut state = self.lock();
        state.terminate();
        self.publish(&state);
    }

    fn is_terminated(&self) -> bool {
        self.lock().phase == Phase::Terminated
    }

    fn begin_fetch(&self) -> Option<u64> {
        let mut state = self.lock();
        let generation = state.begin_fetch()?;
        self.publish(&state);
        Some(generation)
    }

    /// One tagged fetch. Only the latest issued fetch may write the state.
    async fn sync(&self) -> SyncOutcome {
        let Some(generation) = self.begin_fetch() else {
            return SyncOutcome::Discarded;
        };

        match self.deps.source.fetch_round(&self.game_id).await {
            Ok(snapshot) => {
                let outcome = {
                    let mut state = self.lock();
                    let outcome = state.apply_snapshot(generation, &snapshot);
                    if outcome == SyncOutcome::Applied {
                        self.publish(&state);
                        self.remember_round(snapshot.current_round);
                    }
                    outcome
                };
                match outcome {
                    SyncOutcome::Applied => debug!(
                        game_id = %self.game_id,
                        round = snapshot.current_round,
                        seconds_left = snapshot.seconds_left(),
                        "round state applied"
                    ),
                    _ => debug!(game_id = %self.game_id, generation, ?outcome, "round state dropped"),
                }
                outcome
            }
            Err(e) => {
                warn!(game_id = %self.game_id, kind = e.kind(), error = %e, "round state fetch failed");
                let stored_round = self.deps.store.load(&self.game_id);
                let mut state = self.lock();
                let outcome = state.apply_failure(
                    generation,
                    self.deps.config.fallback_seconds(),
                    stored_round,
                );
                match outcome {
                    SyncOutcome::FellBack => {
                        self.publish(&state);
                        info!(
                            game_id = %self.game_id,
                            round = state.round,
                            seconds_left = state.seconds_left,
                            "resuming with fallback countdown"
                        );
                    }
                    SyncOutcome::Kept => self.publish(&state),
                    _ => {}
                }
                outcome
            }
        }
    }

    fn remember_round(&self, round: u32) {
        if let Err(e) = self.deps.store.save(&self.game_id, round) {
            warn!(game_id = %self.game_id, error = %e, "could not record round");
        }
    }

    fn tick(&self) -> TickOutcome {
        let mut state = self.lock();
        let outcome = state.tick();
        if outcome != TickOutcome::Idle {
            self.publish(&state);
        }
        outcome
    }

    /// Expiry sequence. Runs once, after the ticker is gone.
    async fn expire(&self) {
        if self.deps.screen.is_on_transition() {
            info!(game_id = %self.game_id, "round expired on the transition screen, staying put");
            return;
        }

        let Some(generation) = self.begin_fetch() else {
            return;
        };
        let fetched = self.deps.source.fetch_round(&self.game_id).await;

        // Held through the store write and navigation so stop() cannot
        // return while either is still under way
        let mut state = self.lock();
        if state.phase == Phase::Terminated {
            return;
        }
        let round = match &fetched {
            Ok(snapshot) => {
                if state.apply_snapshot(generation, snapshot) == SyncOutcome::Applied {
                    self.publish(&state);
                }
                snapshot.current_round
            }
            Err(e) => {
                warn!(
                    game_id = %self.game_id,
                    kind = e.kind(),
                    error = %e,
                    "round state fetch failed at expiry, routing on last known round"
                );
                if state.apply_failure(generation, 0, None) == SyncOutcome::Kept {
                    self.publish(&state);
                }
                state.round
            }
        };
        if fetched.is_ok() {
            self.remember_round(round);
        }

        let destination =
            Destination::after_round(&self.game_id, round, self.deps.config.final_round);
        info!(game_id = %self.game_id, round, path = %destination.path(), "round over");
        self.deps.navigator.navigate(destination);
    }
}

async fn run_clock(shared: Arc<ClockShared>, mut stop_rx: watch::Receiver<bool>) {
    tokio::select! {
        _ = shared.sync() => {}
        _ = stop_rx.changed() => return,
    }

    let period = shared.deps.config.tick_interval;
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match shared.tick() {
                    TickOutcome::Expired => break,
                    TickOutcome::Idle if shared.is_terminated() => return,
                    _ => {}
                }
            }
            _ = stop_rx.changed() => return,
        }
    }
    // Ticking stops before the expiry action starts
    drop(interval);

    tokio::select! {
        _ = shared.expire() => {}
        _ = stop_rx.changed() => {}
    }
}

struct ClockTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ClockTask {
    fn cancel(self) {
        let _ = self.stop_tx.send(true);
        self.handle.abort();
    }
}

/// Keeps a local countdown in step with the server's round timer and
/// navigates exactly once when it runs out.
///
/// The ticker is a spawned task owned by the clock. `stop()` and `Drop`
/// cancel it; a stopped clock ignores any fetch that completes later.
pub struct RoundClock {
    game_id: GameId,
    deps: ClockDeps,
    shared: Arc<ClockShared>,
    updates: Arc<watch::Sender<ClockView>>,
    task: Option<ClockTask>,
}

impl RoundClock {
    pub fn new(game_id: impl Into<GameId>, deps: ClockDeps) -> Self {
        let game_id = game_id.into();
        let updates = Arc::new(watch::channel(ClockState::new().view()).0);
        let shared = Arc::new(ClockShared::new(
            game_id.clone(),
            deps.clone(),
            Arc::clone(&updates),
        ));
        Self {
            game_id,
            deps,
            shared,
            updates,
            task: None,
        }
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn config(&self) -> &ClockConfig {
        &self.deps.config
    }

    /// Fetches round state and starts ticking. Must be called inside a
    /// tokio runtime. Calling it again restarts from scratch.
    pub fn start(&mut self) {
        if let Some(task) = self.task.take() {
            self.shared.terminate();
            task.cancel();
        }
        self.shared = Arc::new(ClockShared::new(
            self.game_id.clone(),
            self.deps.clone(),
            Arc::clone(&self.updates),
        ));

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_clock(Arc::clone(&self.shared), stop_rx));
        self.task = Some(ClockTask { stop_tx, handle });
        info!(game_id = %self.game_id, "round clock started");
    }

    /// Cancels the ticker. Nothing mutates the clock afterwards, including
    /// fetches still in flight.
    pub fn stop(&mut self) {
        self.shared.terminate();
        if let Some(task) = self.task.take() {
            task.cancel();
            info!(game_id = %self.game_id, "round clock stopped");
        }
    }

    /// Points the clock at another game, restarting it from scratch.
    /// Same id is a no-op.
    pub fn rebind(&mut self, game_id: impl Into<GameId>) {
        let game_id = game_id.into();
        if game_id == self.game_id {
            return;
        }
        self.stop();
        debug!(from = %self.game_id, to = %game_id, "rebinding round clock");
        self.game_id = game_id;
        self.start();
    }

    /// Fetches round state now. Supersedes any fetch still in flight.
    ///
    /// The returned future does not borrow the clock, so it can be spawned;
    /// if the clock is stopped or restarted before it resolves, its result
    /// is dropped.
    pub fn resync(&self) -> impl Future<Output = SyncOutcome> + Send + 'static {
        let shared = Arc::clone(&self.shared);
        async move { shared.sync().await }
    }

    /// True while the ticker task is alive
    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    pub fn view(&self) -> ClockView {
        self.shared.lock().view()
    }

    /// Receives a fresh view after every state change
    pub fn subscribe(&self) -> watch::Receiver<ClockView> {
        self.updates.subscribe()
    }
}

impl Drop for RoundClock {
    fn drop(&mut self) {
        self.stop();
    }
}
