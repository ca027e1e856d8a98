pub mod session;
pub mod watcher;

pub use session::Session;
pub use watcher::{Poll, WatchState, poll};
