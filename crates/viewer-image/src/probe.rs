use std::{fs, io::ErrorKind, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Nothing appears to hold the file open for writing.
    Ready,
    /// Another process is likely still writing; try again later.
    Busy,
    /// The file disappeared.
    Missing,
}

/// Best-effort check that no other process is writing `path`.
///
/// Renames the file onto itself, which leaves name and content untouched but fails
/// on platforms that refuse to rename a file someone holds open for writing. Where
/// renaming an open file is allowed this always reports `Ready`, so a torn read is
/// still possible.
pub fn probe_write_lock(path: &Path) -> ProbeOutcome {
    match fs::rename(path, path) {
        Ok(()) => ProbeOutcome::Ready,
        Err(e) if e.kind() == ErrorKind::NotFound => ProbeOutcome::Missing,
        Err(e) => {
            tracing::debug!("{} is busy: {e}", path.display());
            ProbeOutcome::Busy
        }
    }
}
