pub mod image;
pub mod loading_state;

pub use image::{ImageBuffer, ImageBufferError, ImageResult};
pub use loading_state::{LoadEvent, LoadState};
