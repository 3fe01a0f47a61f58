//! Round clock: state machine, coordinator and countdown rendering.

pub mod coordinator;
pub mod renderer;
pub mod state;

pub use coordinator::{ClockDeps, RoundClock};
pub use renderer::{format_countdown, ClockRenderer};
pub use state::{ClockState, ClockView, Phase, RoundOrigin, SyncOutcome, TickOutcome};
