mod core;
mod event_bus;
mod event_loop;
mod retry;
mod state;
mod sync_ops;
pub(crate) mod terminal_session;

#[cfg(test)]
mod tests;

pub use core::{App, CarouselSubsystem, SyncSubsystem};
pub use state::{AppState, StatusState};
