//! Scripted collaborators for driving a round clock in tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, Notify};

use tradefloor::core::{ClockConfig, ClockDeps};
use tradefloor::error::FetchError;
use tradefloor::game::{
    Destination, GameId, MemoryRoundStore, Navigator, RoundSnapshot, RoundSource, RoundStore,
    ScreenTracker,
};

type FetchResult = Result<RoundSnapshot, FetchError>;

enum Scripted {
    Ready(FetchResult),
    Deferred(oneshot::Receiver<FetchResult>),
}

/// Round source answering from a queue, in call order.
///
/// Once the queue runs dry every fetch fails with a 503.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Scripted>>,
    requested: Mutex<Vec<GameId>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, round: u32, remaining_ms: u64) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(Ok(RoundSnapshot::new(round, remaining_ms))));
        self
    }

    pub fn push_err(&self, status: u16) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(Err(FetchError::Status(status))));
        self
    }

    /// Queues a fetch that stays pending until the returned sender fires
    pub fn push_deferred(&self) -> oneshot::Sender<FetchResult> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    pub fn requested(&self) -> Vec<GameId> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoundSource for ScriptedSource {
    async fn fetch_round(&self, game_id: &GameId) -> FetchResult {
        self.requested.lock().unwrap().push(game_id.clone());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Deferred(rx)) => rx.await.unwrap_or(Err(FetchError::Status(599))),
            None => Err(FetchError::Status(503)),
        }
    }
}

/// Navigator that only records where it was sent
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Destination> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        self.calls.lock().unwrap().push(destination);
    }
}

/// Store whose saves, after the first one, block the calling thread.
///
/// The first save comes from the start-up sync, later ones from expiry.
pub struct SlowStore {
    inner: MemoryRoundStore,
    saves: AtomicUsize,
    delay: Duration,
    slow_save: Notify,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryRoundStore::new(),
            saves: AtomicUsize::new(0),
            delay,
            slow_save: Notify::new(),
        })
    }

    /// Resolves once a blocking save has begun
    pub async fn slow_save_started(&self) {
        self.slow_save.notified().await;
    }
}

impl RoundStore for SlowStore {
    fn load(&self, game_id: &GameId) -> Option<u32> {
        self.inner.load(game_id)
    }

    fn save(&self, game_id: &GameId, round: u32) -> anyhow::Result<()> {
        if self.saves.fetch_add(1, Ordering::SeqCst) > 0 {
            self.slow_save.notify_one();
            std::thread::sleep(self.delay);
        }
        self.inner.save(game_id, round)
    }
}

/// Wires a clock with the default config (final round 10, 120 s fallback)
pub fn deps_with(
    source: Arc<ScriptedSource>,
    navigator: Arc<RecordingNavigator>,
    store: Arc<dyn RoundStore>,
    screen: ScreenTracker,
) -> ClockDeps {
    ClockDeps {
        source,
        navigator,
        store,
        screen,
        config: ClockConfig::default(),
    }
}
