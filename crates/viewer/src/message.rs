use std::path::PathBuf;

pub use crate::key_binds::MenuAction;

#[derive(Debug, Clone)]
pub enum Message {
    /// Poll timer fired.
    Tick,
    /// One path of a drop; a drop of several files arrives as several messages.
    FileDropped(PathBuf),
    FilesSelected(Vec<PathBuf>),
    OpenFileDialog,
    Next,
    Prev,
    KeyBind(MenuAction),
    CloseErrorDialog,
    Cancelled,
    Quit,
}
