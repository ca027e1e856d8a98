//! Polling change detection for the displayed file.

use shared::{image::ImageBuffer, loading_state::LoadState};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::SystemTime,
};
use viewer_image::{FileSource, LoadError, ProbeOutcome, load_pgm};

/// Which file is watched and what was last loaded from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
    target: Option<PathBuf>,
    loaded: Option<PathBuf>,
    loaded_mtime: Option<SystemTime>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    pub fn loaded(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    pub fn loaded_mtime(&self) -> Option<SystemTime> {
        self.loaded_mtime
    }

    pub fn set_target(&mut self, path: PathBuf) {
        self.target = Some(path);
    }

    /// A load is due for a different file or a strictly newer modification time.
    pub fn is_due(&self, target: &Path, mtime: SystemTime) -> bool {
        if self.loaded.as_deref() != Some(target) {
            return true;
        }

        self.loaded_mtime.is_none_or(|loaded| mtime > loaded)
    }

    pub fn mark_loaded(&mut self, path: PathBuf, mtime: SystemTime) {
        self.loaded = Some(path);
        self.loaded_mtime = Some(mtime);
    }
}

/// Result of one poll of the target file.
#[derive(Debug)]
pub enum Poll {
    /// Nothing to do this tick.
    Idle,
    /// The file is being written; check again next tick.
    Busy,
    Loaded {
        path: PathBuf,
        mtime: SystemTime,
        image: ImageBuffer,
    },
    Failed {
        path: PathBuf,
        error: LoadError,
    },
}

/// Decide whether the target needs (re)loading and load it at most once.
pub fn poll<S: FileSource>(watch: &WatchState, state: &LoadState, source: &S) -> Poll {
    let Some(target) = watch.target() else {
        return Poll::Idle;
    };

    // A failing target waits for the user to pick another file
    if state.is_failed() {
        return Poll::Idle;
    }

    let path = target.to_path_buf();

    let mtime = match source.modified(target) {
        Ok(mtime) => mtime,
        Err(e) => return Poll::Failed { path, error: e.into() },
    };

    if !watch.is_due(target, mtime) {
        return Poll::Idle;
    }

    match source.probe(target) {
        ProbeOutcome::Ready => {}
        ProbeOutcome::Busy => {
            tracing::debug!("{} is being written, retrying next tick", target.display());
            return Poll::Busy;
        }
        ProbeOutcome::Missing => {
            return Poll::Failed {
                path,
                error: std::io::Error::from(ErrorKind::NotFound).into(),
            };
        }
    }

    match load_pgm(source, target) {
        Ok(image) => Poll::Loaded { path, mtime, image },
        Err(error) => Poll::Failed { path, error },
    }
}
