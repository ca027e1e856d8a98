use std::time::Duration;

pub const APP_ID: &str = "org.codeberg.bhh32.WatchPGM";

/// Default poll period.
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub poll_interval_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl ViewerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            window_width: 800.0,
            window_height: 600.0,
            min_width: 400.0,
            min_height: 300.0,
        }
    }
}

/// Settings are fixed at build time; nothing is read from disk.
pub fn config() -> ViewerConfig {
    ViewerConfig::default()
}
