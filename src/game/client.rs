//! Round state fetching

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::round::{parse_round_state, GameId, RoundSnapshot};
use crate::error::FetchError;

/// Source of authoritative round state for a game
#[async_trait]
pub trait RoundSource: Send + Sync {
    /// Fetches the current round and time left for `game_id`
    async fn fetch_round(&self, game_id: &GameId) -> Result<RoundSnapshot, FetchError>;
}

/// Fetches round state from the game server over HTTP.
///
/// Issues `GET {base_url}/games/{id}/round` and expects
/// `{ "currentRound": int, "remainingTime": int }` back.
#[derive(Clone, Debug)]
pub struct HttpRoundSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoundSource {
    /// Builds a source with its own HTTP client and per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the round endpoint for a game
    pub fn round_url(&self, game_id: &GameId) -> String {
        format!("{}/games/{}/round", self.base_url, game_id)
    }
}

#[async_trait]
impl RoundSource for HttpRoundSource {
    async fn fetch_round(&self, game_id: &GameId) -> Result<RoundSnapshot, FetchError> {
        let url = self.round_url(game_id);
        debug!(%url, "fetching round state");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_round_state(&body)
    }
}
