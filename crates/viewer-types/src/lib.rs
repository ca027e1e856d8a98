pub mod types;

pub use types::{Effect, ViewerEvent};
