pub mod config;

pub use config::{APP_ID, ViewerConfig, config};
