pub(crate) mod fs;
pub(crate) mod terminal;

// Public API - utilities used by commands and stores
pub use fs::write_atomically;
pub use terminal::{screen_title, set_terminal_title};
