use std::fmt;

/// Outcome of the most recent load attempt for the current target.
///
/// `Failed` is sticky: only a target change moves it back to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Idle => write!(f, "Idle"),
            LoadState::Ready => write!(f, "Ready"),
            LoadState::Failed(msg) => write!(f, "Failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    TargetChanged,
    LoadComplete,
    LoadFailed(String),
}

impl LoadEvent {
    pub fn apply_to_state(self, current_state: LoadState) -> LoadState {
        match (self, current_state) {
            (LoadEvent::TargetChanged, _) => LoadState::Idle,
            (LoadEvent::LoadComplete, _) => LoadState::Ready,
            // Keep the first message for a target that is already failing
            (LoadEvent::LoadFailed(_), LoadState::Failed(msg)) => LoadState::Failed(msg),
            (LoadEvent::LoadFailed(msg), _) => LoadState::Failed(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_properties() {
        let idle = LoadState::Idle;
        assert!(idle.is_idle());
        assert!(!idle.is_ready());
        assert!(!idle.is_failed());

        let ready = LoadState::Ready;
        assert!(ready.is_ready());
        assert!(ready.error_message().is_none());

        let failed = LoadState::Failed("bad.pgm: invalid PGM file".to_string());
        assert!(failed.is_failed());
        assert_eq!(failed.error_message(), Some("bad.pgm: invalid PGM file"));
    }

    #[test]
    fn test_load_events() {
        let state = LoadEvent::LoadFailed("broken".to_string()).apply_to_state(LoadState::Idle);
        assert_eq!(state, LoadState::Failed("broken".to_string()));

        // Failure sticks until the target changes
        let state = LoadEvent::LoadFailed("again".to_string()).apply_to_state(state);
        assert_eq!(state, LoadState::Failed("broken".to_string()));

        let state = LoadEvent::TargetChanged.apply_to_state(state);
        assert_eq!(state, LoadState::Idle);

        let state = LoadEvent::LoadComplete.apply_to_state(state);
        assert_eq!(state, LoadState::Ready);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(LoadState::Idle.to_string(), "Idle");
        assert_eq!(LoadState::Ready.to_string(), "Ready");
        assert_eq!(
            LoadState::Failed("missing".to_string()).to_string(),
            "Failed: missing"
        );
    }

    #[test]
    fn test_default_state() {
        assert_eq!(LoadState::default(), LoadState::Idle);
    }
}
