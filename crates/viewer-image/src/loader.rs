use crate::{
    pgm::{self, PgmError},
    probe::{ProbeOutcome, probe_write_lock},
};
use shared::image::ImageBuffer;
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::Path,
    time::SystemTime,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] PgmError),
}

impl LoadError {
    /// Message shown to the user; the detailed cause only goes to the log.
    pub fn notice(path: &Path) -> String {
        format!("{}: invalid PGM file", path.display())
    }
}

/// Filesystem operations the watcher depends on.
pub trait FileSource {
    type Reader: Read;

    fn modified(&self, path: &Path) -> std::io::Result<SystemTime>;

    fn probe(&self, path: &Path) -> ProbeOutcome;

    fn open(&self, path: &Path) -> std::io::Result<Self::Reader>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSource;

impl FileSource for DiskSource {
    type Reader = BufReader<File>;

    fn modified(&self, path: &Path) -> std::io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    fn probe(&self, path: &Path) -> ProbeOutcome {
        probe_write_lock(path)
    }

    fn open(&self, path: &Path) -> std::io::Result<Self::Reader> {
        File::open(path).map(BufReader::new)
    }
}

pub fn load_pgm<S: FileSource>(source: &S, path: &Path) -> Result<ImageBuffer, LoadError> {
    tracing::debug!("Loading image file {}", path.display());

    let reader = source.open(path)?;
    let image = pgm::decode(reader)?;

    tracing::info!(
        "Loaded {} ({}x{}, maxval {})",
        path.display(),
        image.width(),
        image.height(),
        image.maxval()
    );

    Ok(image)
}
