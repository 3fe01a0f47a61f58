//! Public API for talking to the game server and routing between screens.
//!
//! This module provides the collaborators a round clock is wired with:
//! - Round state fetching (`RoundSource`, `HttpRoundSource`)
//! - Navigation (`Navigator`, `Destination`, `ScreenTracker`)
//! - The durable fallback store (`RoundStore`)
//!
//! ## Example: Fetching round state
//!
//! ```rust,no_run
//! use tradefloor::game::api::{GameId, HttpRoundSource, RoundSource};
//! use std::time::Duration;
//!
//! async fn show(server: &str) -> anyhow::Result<()> {
//!     let source = HttpRoundSource::new(server, Duration::from_secs(10))?;
//!     let snapshot = source.fetch_round(&GameId::new("abc123")).await?;
//!     println!("round {} ({}s left)", snapshot.current_round, snapshot.seconds_left());
//!     Ok(())
//! }
//! ```

// Fetching
pub use super::client::{HttpRoundSource, RoundSource};
pub use super::round::{parse_round_state, GameId, RoundSnapshot};

// Routing
pub use super::route::{ChannelNavigator, Destination, Navigator, Screen, ScreenTracker};

// Fallback store
pub use super::store::{FileRoundStore, MemoryRoundStore, RoundStore};

// Errors
pub use crate::error::FetchError;
