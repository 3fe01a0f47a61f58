//! Status command: one-shot look at a game's round state

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::core::{
    format_countdown, resolve_server_url, ClockConfig, Settings, SERVER_URL_ENV,
};
use crate::game::{GameId, HttpRoundSource, RoundSnapshot, RoundSource};

/// Arguments for the status command
#[derive(Debug, Clone, Default)]
pub struct StatusArgs {
    pub game_id: String,
    pub server: Option<String>,
    pub config: Option<PathBuf>,
}

/// Handles the status command. Fetch failures are reported as errors.
pub async fn handle_status_command(args: StatusArgs) -> Result<()> {
    let settings = Settings::resolve(args.config.as_deref())?;
    let server_url = resolve_server_url(
        args.server.as_deref(),
        std::env::var(SERVER_URL_ENV).ok(),
        &settings,
    );
    let config = ClockConfig::resolve(None, &settings);
    let game_id = GameId::new(args.game_id);

    let source = HttpRoundSource::new(&server_url, settings.http_timeout())?;
    let snapshot = source
        .fetch_round(&game_id)
        .await
        .with_context(|| format!("fetching round state for {game_id} from {server_url}"))?;

    println!("{}", describe_snapshot(&game_id, &snapshot, config.final_round));
    Ok(())
}

/// One-line summary of a snapshot
pub fn describe_snapshot(game_id: &GameId, snapshot: &RoundSnapshot, final_round: u32) -> String {
    let mut line = format!(
        "🎯 {game_id}: round {}/{final_round} • {} left",
        snapshot.current_round,
        format_countdown(snapshot.seconds_left())
    );
    if snapshot.current_round >= final_round {
        line.push_str(" • final round");
    }
    line
}
