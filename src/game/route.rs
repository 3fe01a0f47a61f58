//! Screens, navigation destinations and navigators

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use super::round::GameId;

/// Screens a player moves through during a game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Lobby,
    Trading,
    /// Between a round's close and the next leaderboard reveal
    Transition,
    Leaderboard,
    EndGame,
}

impl Screen {
    fn to_u8(self) -> u8 {
        match self {
            Screen::Lobby => 0,
            Screen::Trading => 1,
            Screen::Transition => 2,
            Screen::Leaderboard => 3,
            Screen::EndGame => 4,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Screen::Trading,
            2 => Screen::Transition,
            3 => Screen::Leaderboard,
            4 => Screen::EndGame,
            _ => Screen::Lobby,
        }
    }

    /// Returns the text representation of this screen
    pub fn text(&self) -> &str {
        match self {
            Screen::Lobby => "lobby",
            Screen::Trading => "trading",
            Screen::Transition => "transition",
            Screen::Leaderboard => "leaderboard",
            Screen::EndGame => "end",
        }
    }
}

/// Shared record of which screen is active.
///
/// Cloning yields another handle onto the same value.
#[derive(Clone, Debug)]
pub struct ScreenTracker(Arc<AtomicU8>);

impl ScreenTracker {
    pub fn new(initial: Screen) -> Self {
        Self(Arc::new(AtomicU8::new(initial.to_u8())))
    }

    pub fn get(&self) -> Screen {
        Screen::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub fn set(&self, screen: Screen) {
        self.0.store(screen.to_u8(), Ordering::SeqCst);
    }

    pub fn is_on_transition(&self) -> bool {
        self.get() == Screen::Transition
    }
}

impl Default for ScreenTracker {
    fn default() -> Self {
        Self::new(Screen::Lobby)
    }
}

/// Where the clock sends the player when a round runs out
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Next-round transition screen
    Transition(GameId),
    /// End-of-game results screen
    EndGame(GameId),
}

impl Destination {
    /// Picks the destination for an expired round.
    ///
    /// Reaching `final_round` ends the game; anything earlier moves on to
    /// the transition screen.
    pub fn after_round(game_id: &GameId, round: u32, final_round: u32) -> Self {
        if round >= final_round {
            Destination::EndGame(game_id.clone())
        } else {
            Destination::Transition(game_id.clone())
        }
    }

    pub fn game_id(&self) -> &GameId {
        match self {
            Destination::Transition(id) | Destination::EndGame(id) => id,
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            Destination::Transition(_) => Screen::Transition,
            Destination::EndGame(_) => Screen::EndGame,
        }
    }

    /// Route path for this destination
    pub fn path(&self) -> String {
        match self {
            Destination::Transition(id) => format!("/games/{id}/transition"),
            Destination::EndGame(id) => format!("/games/{id}/end"),
        }
    }
}

/// Changes the active screen
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

/// Navigator that marks the new screen active and hands the destination
/// to whoever drives the screen loop.
#[derive(Clone, Debug)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Destination>,
    screen: ScreenTracker,
}

impl ChannelNavigator {
    pub fn new(screen: ScreenTracker) -> (Self, mpsc::UnboundedReceiver<Destination>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, screen }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, destination: Destination) {
        debug!(path = %destination.path(), "navigating");
        self.screen.set(destination.screen());
        // Receiver gone means the screen loop already exited
        let _ = self.tx.send(destination);
    }
}
