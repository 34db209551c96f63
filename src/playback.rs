//! Playback state: the session model, the ticker that advances elapsed time
//! and the `Player` that ties the two together.
//!
//! Everything here runs on the runtime's single event-loop thread; commands
//! and ticks are applied one at a time.

mod error;
mod player;
mod session;
mod ticker;
mod types;

pub use player::Player;
pub use session::PlaybackSession;
pub use types::{PlayerCmd, TickOutcome};

#[cfg(test)]
mod tests;
