//! Plain (`P2`) PGM decoding.
//!
//! Header fields and samples are decimal tokens separated by any ASCII whitespace.
//! A `#` starts a comment that runs to the end of the line and may appear wherever a
//! separator may.

use shared::image::{ImageBuffer, ImageBufferError, pixel_count};
use std::io::Read;
use thiserror::Error;

const MAGIC: &[u8] = b"P2";

#[derive(Debug, Error)]
pub enum PgmError {
    #[error("Failed to read PGM data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a plain PGM file (magic {0:?})")]
    BadMagic(String),
    #[error("Missing image dimensions")]
    MissingDimensions,
    #[error("Missing maximum gray value")]
    MissingMaxval,
    #[error("Invalid number {0:?}")]
    InvalidToken(String),
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Truncated pixel data: expected {expected} samples, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error(transparent)]
    Buffer(#[from] ImageBufferError),
}

pub type PgmResult<T> = Result<T, PgmError>;

/// Read a whole plain PGM stream and decode it.
pub fn decode<R: Read>(mut reader: R) -> PgmResult<ImageBuffer> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_bytes(&data)
}

/// Decode an in-memory plain PGM image into a bottom-up RGB buffer.
pub fn decode_bytes(data: &[u8]) -> PgmResult<ImageBuffer> {
    let magic_end = data
        .iter()
        .position(|&b| is_separator(b))
        .unwrap_or(data.len());
    let magic = &data[..magic_end];
    if magic != MAGIC {
        return Err(PgmError::BadMagic(
            String::from_utf8_lossy(magic).into_owned(),
        ));
    }

    let mut tokens = Tokens {
        data,
        pos: magic_end,
    };

    let width = parse_uint(tokens.next().ok_or(PgmError::MissingDimensions)?)?;
    let height = parse_uint(tokens.next().ok_or(PgmError::MissingDimensions)?)?;
    let maxval = parse_uint(tokens.next().ok_or(PgmError::MissingMaxval)?)?;

    let expected = pixel_count(width, height)
        .filter(|count| *count > 0)
        .ok_or(PgmError::InvalidDimensions { width, height })?;

    // Every sample takes at least one byte, so a short stream fails before allocating
    if tokens.remaining() < expected {
        let found = tokens.count();
        return Err(PgmError::Truncated { expected, found });
    }

    let mut samples = Vec::with_capacity(expected);
    for token in tokens.by_ref().take(expected) {
        samples.push(parse_uint(token)? as u8);
    }

    if samples.len() < expected {
        return Err(PgmError::Truncated {
            expected,
            found: samples.len(),
        });
    }

    Ok(ImageBuffer::from_gray_rows(width, height, maxval, &samples)?)
}

fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'#'
}

fn parse_uint(token: &[u8]) -> PgmResult<u32> {
    let invalid = || PgmError::InvalidToken(String::from_utf8_lossy(token).into_owned());

    if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    std::str::from_utf8(token)
        .ok()
        .and_then(|text| text.parse::<u32>().ok())
        .ok_or_else(invalid)
}

struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Tokens<'_> {
    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        self.skip_separators();

        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if is_separator(b) {
                break;
            }
            self.pos += 1;
        }

        let data = self.data;
        let end = self.pos;
        (end > start).then(|| &data[start..end])
    }
}
