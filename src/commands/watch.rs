//! Watch command: follow a game round by round
//!
//! Mounts a round clock for the trading screen, draws its countdown and
//! follows wherever it navigates: the transition screen leads to the next
//! round's clock, the end-game screen ends the command.

use anyhow::{bail, Result};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::core::config::TRANSITION_PAUSE_SECONDS;
use crate::core::{
    resolve_server_url, screen_title, set_terminal_title, ClockConfig, ClockDeps, CountdownBar,
    Phase, RoundClock, Settings, SERVER_URL_ENV,
};
use crate::game::{
    ChannelNavigator, Destination, FileRoundStore, GameId, HttpRoundSource, MemoryRoundStore,
    RoundStore, Screen, ScreenTracker,
};

/// Arguments for the watch command
#[derive(Debug, Clone, Default)]
pub struct WatchArgs {
    pub game_id: String,
    pub server: Option<String>,
    pub config: Option<PathBuf>,
    pub final_round: Option<u32>,
    pub no_store: bool,
}

/// How a watched game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Reached the end-game screen
    Finished { last_round: u32 },
    /// Shutdown requested before the game ended
    Interrupted,
}

/// Handles the watch command
pub async fn handle_watch_command(args: WatchArgs) -> Result<()> {
    let settings = Settings::resolve(args.config.as_deref())?;
    let server_url = resolve_server_url(
        args.server.as_deref(),
        std::env::var(SERVER_URL_ENV).ok(),
        &settings,
    );
    let config = ClockConfig::resolve(args.final_round, &settings);

    let store: Arc<dyn RoundStore> = match settings.store_path() {
        Some(path) if !args.no_store => Arc::new(FileRoundStore::new(path)),
        _ => Arc::new(MemoryRoundStore::new()),
    };
    let source = HttpRoundSource::new(&server_url, settings.http_timeout())?;
    let screen = ScreenTracker::new(Screen::Lobby);
    let (navigator, destinations) = ChannelNavigator::new(screen.clone());

    let deps = ClockDeps {
        source: Arc::new(source),
        navigator: Arc::new(navigator),
        store,
        screen,
        config,
    };
    let game_id = GameId::new(args.game_id);

    println!("\n🚀 Following game {game_id} on {server_url}\n");
    let _ = set_terminal_title(&screen_title("🚀", game_id.as_str(), None));

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let outcome = run_screen_flow(
        game_id.clone(),
        deps,
        destinations,
        Duration::from_secs(TRANSITION_PAUSE_SECONDS),
        shutdown,
    )
    .await?;

    match outcome {
        WatchOutcome::Finished { last_round } => {
            println!("\n🏁 Game {game_id} finished after round {last_round}\n");
            let _ = set_terminal_title(&screen_title("🏁", game_id.as_str(), None));
        }
        WatchOutcome::Interrupted => {
            println!("\n👋 Stopped following {game_id}\n");
            let _ = set_terminal_title(&screen_title("✅", game_id.as_str(), None));
        }
    }
    Ok(())
}

/// Drives the trading → transition → trading ... → end-game screen loop.
///
/// `destinations` must be the receiving side of the navigator in `deps`.
/// Each trading screen gets its own clock, stopped before the next screen
/// shows.
pub async fn run_screen_flow<S>(
    game_id: GameId,
    deps: ClockDeps,
    mut destinations: mpsc::UnboundedReceiver<Destination>,
    transition_pause: Duration,
    shutdown: S,
) -> Result<WatchOutcome>
where
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let final_round = deps.config.final_round;

    loop {
        deps.screen.set(Screen::Trading);
        let bar = CountdownBar::new(game_id.as_str(), final_round)?;
        let mut clock = RoundClock::new(game_id.clone(), deps.clone());
        let mut views = clock.subscribe();
        clock.start();

        let mut titled_round = None;
        // Round while the countdown was live; the expiry fetch may already
        // report the next one
        let mut closing_round = None;
        let destination = loop {
            tokio::select! {
                changed = views.changed() => {
                    if changed.is_err() {
                        break None;
                    }
                    let view = *views.borrow_and_update();
                    if view.phase == Phase::Running {
                        closing_round = Some(view.round);
                    }
                    bar.update(&view);
                    if titled_round != Some(view.round) {
                        titled_round = Some(view.round);
                        let _ = set_terminal_title(&screen_title("📈", game_id.as_str(), Some(view.round)));
                    }
                }
                destination = destinations.recv() => break destination,
                _ = &mut shutdown => {
                    clock.stop();
                    bar.clear();
                    return Ok(WatchOutcome::Interrupted);
                }
            }
        };

        let last_round = closing_round.unwrap_or_else(|| clock.view().round);
        clock.stop();
        debug!(%game_id, last_round, ?destination, "trading screen closed");

        match destination {
            Some(Destination::EndGame(_)) => {
                bar.finish(&format!("🏁 round {last_round}/{final_round} • game over"));
                return Ok(WatchOutcome::Finished { last_round });
            }
            Some(Destination::Transition(_)) => {
                bar.finish(&format!(
                    "✅ round {last_round}/{final_round} closed • next round in {}s",
                    transition_pause.as_secs()
                ));
                tokio::select! {
                    _ = tokio::time::sleep(transition_pause) => {}
                    _ = &mut shutdown => return Ok(WatchOutcome::Interrupted),
                }
                deps.screen.set(Screen::Leaderboard);
            }
            None => bail!("navigation channel closed while following {game_id}"),
        }
    }
}
