//! Terminal title management

use std::io::{self, Write};

/// Sets the terminal title and flushes it out
pub fn set_terminal_title(title: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    // OSC 0: set icon name and window title
    write!(out, "\x1b]0;{title}\x07")?;
    out.flush()
}

/// Title for the active screen, e.g. `📈 tradefloor · abc123 · round 3`
pub fn screen_title(icon: &str, game_id: &str, round: Option<u32>) -> String {
    match round {
        Some(round) => format!("{icon} tradefloor · {game_id} · round {round}"),
        None => format!("{icon} tradefloor · {game_id}"),
    }
}
