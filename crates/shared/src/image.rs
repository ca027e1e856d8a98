use image::{GrayImage, Luma, Rgba, RgbaImage};
use thiserror::Error;

/// Bytes per pixel in the display buffer.
pub const CHANNELS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },
}

pub type ImageResult<T> = Result<T, ImageBufferError>;

/// Number of samples in a `width` x `height` grid, or `None` if the RGB buffer for it
/// would not fit in memory addressing.
pub fn pixel_count(width: u32, height: u32) -> Option<usize> {
    let count = (width as usize).checked_mul(height as usize)?;
    count.checked_mul(CHANNELS)?;
    Some(count)
}

/// Grayscale image stored as RGB triplets, bottom scanline first.
///
/// Row 0 of `pixels` is the last row of the source image, matching the bottom-up
/// layout of device-independent bitmaps. Every triplet has `R == G == B`.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    maxval: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("maxval", &self.maxval)
            .finish_non_exhaustive()
    }
}

impl ImageBuffer {
    /// Build a buffer from gray samples given in top-down, row-major order.
    pub fn from_gray_rows(
        width: u32,
        height: u32,
        maxval: u32,
        samples: &[u8],
    ) -> ImageResult<Self> {
        let expected = pixel_count(width, height)
            .filter(|count| *count > 0)
            .ok_or(ImageBufferError::InvalidDimensions { width, height })?;

        if samples.len() != expected {
            return Err(ImageBufferError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }

        let w = width as usize;
        let h = height as usize;
        let mut pixels = vec![0u8; expected * CHANNELS];

        for (src_row, row) in samples.chunks_exact(w).enumerate() {
            let dst_row = h - 1 - src_row;
            let start = dst_row * w * CHANNELS;
            let line = &mut pixels[start..start + w * CHANNELS];

            for (dst, &value) in line.chunks_exact_mut(CHANNELS).zip(row) {
                dst.fill(value);
            }
        }

        Ok(Self {
            width,
            height,
            maxval,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn maxval(&self) -> u32 {
        self.maxval
    }

    /// Raw RGB bytes, bottom scanline first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Scanline `row` in buffer order (0 is the bottom of the image).
    pub fn scanline(&self, row: u32) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }

        let stride = self.width as usize * CHANNELS;
        let start = row as usize * stride;
        self.pixels.get(start..start + stride)
    }

    /// Gray value at image coordinates, `y == 0` being the top row.
    pub fn sample(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let line = self.scanline(self.height - 1 - y)?;
        line.get(x as usize * CHANNELS).copied()
    }

    /// Top-down single channel copy.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([self.sample(x, y).unwrap_or_default()])
        })
    }

    /// Top-down, fully opaque RGBA copy for texture upload.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let value = self.sample(x, y).unwrap_or_default();
            Rgba([value, value, value, 255])
        })
    }
}
