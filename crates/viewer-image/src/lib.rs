pub mod loader;
pub mod pgm;
pub mod probe;

pub use loader::{DiskSource, FileSource, LoadError, load_pgm};
pub use pgm::{PgmError, decode, decode_bytes};
pub use probe::{ProbeOutcome, probe_write_lock};
