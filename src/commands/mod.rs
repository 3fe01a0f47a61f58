//! CLI command handlers

pub mod status;
pub mod watch;

pub use status::{handle_status_command, StatusArgs};
pub use watch::{handle_watch_command, run_screen_flow, WatchArgs, WatchOutcome};
