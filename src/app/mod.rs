// ABOUTME: Main application structure and state management for the TUI

pub mod actions;
pub mod events;
pub mod router;
pub mod state;

pub use actions::{ActionResult, AsyncAction, SessionProbe};
pub use events::{AppEvent, EventHandler};
pub use router::Router;
pub use state::{App, AppState};
