//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the player, pane focus,
//! cursors and notifications.

mod model;

pub use model::*;
