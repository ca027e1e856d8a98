use std::path::PathBuf;

/// Input consumed by the viewer session, independent of how the host delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Poll timer fired.
    Tick,
    /// Files dropped on the window, in drop order.
    Drop(Vec<PathBuf>),
    /// A single path chosen explicitly.
    Open(PathBuf),
    Next,
    Prev,
    Quit,
}

/// Request from the session to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The image buffer was replaced.
    Redraw,
    SetTitle(PathBuf),
    /// Modal notification with a user-facing message.
    ShowError(String),
    Quit,
}

impl Effect {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Effect::ShowError(msg) => Some(msg),
            _ => None,
        }
    }
}
