use std::path::{Path, PathBuf};

pub const EXTENSIONS: &[&str] = &["pgm", "pnm"];

/// Ordered snapshot of the files delivered by one drop, with a cursor.
///
/// The path list never changes after construction; a new drop builds a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: Vec<PathBuf>,
    cur_idx: Option<usize>,
}

impl FileSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let cur_idx = if paths.is_empty() { None } else { Some(0) };
        Self { paths, cur_idx }
    }

    pub fn current(&self) -> Option<&PathBuf> {
        self.cur_idx.and_then(|idx| self.paths.get(idx))
    }

    pub fn index(&self) -> Option<usize> {
        self.cur_idx
    }

    pub fn total(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn go_next(&mut self) -> Option<&PathBuf> {
        if self.paths.is_empty() {
            return None;
        }

        let current = self.cur_idx.unwrap_or_default();
        self.cur_idx = Some((current + 1) % self.paths.len());
        self.current()
    }

    pub fn go_prev(&mut self) -> Option<&PathBuf> {
        if self.paths.is_empty() {
            return None;
        }

        let total = self.paths.len();
        let current = self.cur_idx.unwrap_or_default();
        self.cur_idx = Some((current + total - 1) % total);
        self.current()
    }
}

/// Directory the open dialog should start in for `path`.
pub fn get_image_dir(path: &Path) -> Option<PathBuf> {
    if path.is_dir() {
        Some(path.to_path_buf())
    } else {
        path.parent()
            .filter(|parent| parent.is_dir())
            .map(Path::to_path_buf)
    }
}
