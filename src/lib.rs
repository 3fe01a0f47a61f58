//! # tradefloor
//!
//! `tradefloor` is the terminal client for the tradefloor stock-trading
//! party game. It powers the `tradefloor` CLI tool.
//!
//! ## Core Features
//!
//! - **Round Clock**: A local once-per-second countdown kept in step with the
//!   game server's authoritative round timer.
//! - **Single Expiry**: Exactly one navigation per expired round, to the
//!   transition screen or, after the final round, the end-game screen.
//! - **Stale Response Discard**: Every fetch is tagged with a generation;
//!   only the latest one may update the clock.
//! - **Offline Fallback**: Unreachable server means a fallback countdown
//!   resuming from the last stored round, never a frozen timer.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tradefloor::core::{ClockConfig, ClockDeps, RoundClock};
//! use tradefloor::game::{ChannelNavigator, HttpRoundSource, MemoryRoundStore, Screen, ScreenTracker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let screen = ScreenTracker::new(Screen::Trading);
//!     let (navigator, mut destinations) = ChannelNavigator::new(screen.clone());
//!     let deps = ClockDeps {
//!         source: Arc::new(HttpRoundSource::new("http://localhost:3000", Duration::from_secs(10))?),
//!         navigator: Arc::new(navigator),
//!         store: Arc::new(MemoryRoundStore::new()),
//!         screen,
//!         config: ClockConfig::default(),
//!     };
//!
//!     let mut clock = RoundClock::new("abc123", deps);
//!     clock.start();
//!     if let Some(destination) = destinations.recv().await {
//!         println!("round over, go to {}", destination.path());
//!     }
//!     clock.stop();
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod error;
pub mod game;
pub mod telemetry;
pub mod utils;
