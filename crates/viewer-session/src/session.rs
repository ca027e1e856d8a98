//! Viewer session state and event handling.

use crate::watcher::{Poll, WatchState, poll};
use shared::{
    image::ImageBuffer,
    loading_state::{LoadEvent, LoadState},
};
use std::path::{Path, PathBuf};
use viewer_image::{DiskSource, FileSource, LoadError};
use viewer_nav::FileSet;
use viewer_types::{Effect, ViewerEvent};

/// Everything the viewer knows about what it is showing.
///
/// Owned by the application loop; every mutation goes through [`Session::handle`].
#[derive(Debug)]
pub struct Session<S: FileSource = DiskSource> {
    source: S,
    watch: WatchState,
    files: FileSet,
    state: LoadState,
    image: Option<ImageBuffer>,
    /// Paths from a drop still arriving one event at a time.
    pending_drop: Vec<PathBuf>,
}

impl Default for Session<DiskSource> {
    fn default() -> Self {
        Self::new(DiskSource)
    }
}

impl<S: FileSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            watch: WatchState::new(),
            files: FileSet::default(),
            state: LoadState::default(),
            image: None,
            pending_drop: Vec::new(),
        }
    }

    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    pub fn target(&self) -> Option<&Path> {
        self.watch.target()
    }

    pub fn watch_state(&self) -> &WatchState {
        &self.watch
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collect one path of a drop that the host reports file by file.
    ///
    /// The queued paths become a single file set before the next event is handled.
    pub fn queue_drop(&mut self, path: PathBuf) {
        self.pending_drop.push(path);
    }

    pub fn handle(&mut self, event: ViewerEvent) -> Vec<Effect> {
        if !self.pending_drop.is_empty() {
            let paths = std::mem::take(&mut self.pending_drop);
            self.replace_files(paths);
        }

        match event {
            ViewerEvent::Tick => self.tick(),
            ViewerEvent::Drop(paths) => {
                self.replace_files(paths);
                Vec::new()
            }
            ViewerEvent::Open(path) => {
                self.replace_files(vec![path]);
                Vec::new()
            }
            ViewerEvent::Next => {
                if let Some(path) = self.files.go_next().cloned() {
                    self.set_target(path);
                }
                Vec::new()
            }
            ViewerEvent::Prev => {
                if let Some(path) = self.files.go_prev().cloned() {
                    self.set_target(path);
                }
                Vec::new()
            }
            ViewerEvent::Quit => vec![Effect::Quit],
        }
    }

    fn replace_files(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }

        tracing::debug!("New file set with {} entries", paths.len());
        self.files = FileSet::new(paths);
        if let Some(path) = self.files.current().cloned() {
            self.set_target(path);
        }
    }

    fn set_target(&mut self, path: PathBuf) {
        tracing::debug!("Watching {}", path.display());
        self.watch.set_target(path);
        self.state = LoadEvent::TargetChanged.apply_to_state(std::mem::take(&mut self.state));
    }

    fn tick(&mut self) -> Vec<Effect> {
        match poll(&self.watch, &self.state, &self.source) {
            Poll::Idle | Poll::Busy => Vec::new(),
            Poll::Loaded { path, mtime, image } => {
                self.image = Some(image);
                self.watch.mark_loaded(path.clone(), mtime);
                self.state =
                    LoadEvent::LoadComplete.apply_to_state(std::mem::take(&mut self.state));

                vec![Effect::Redraw, Effect::SetTitle(path)]
            }
            Poll::Failed { path, error } => self.fail(&path, error),
        }
    }

    fn fail(&mut self, path: &Path, error: LoadError) -> Vec<Effect> {
        tracing::warn!("Failed to load {}: {error}", path.display());

        let notice = LoadError::notice(path);
        self.state =
            LoadEvent::LoadFailed(notice.clone()).apply_to_state(std::mem::take(&mut self.state));

        vec![Effect::ShowError(notice)]
    }
}
