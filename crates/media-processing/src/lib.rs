//! Media processing for the wedding invitation
//!
//! This crate loads the reference artwork and extracts its dominant colors.
//!
//! - [`decode`] - Image sources (files, in-memory bytes) and decoding
//! - [`palette`] - Median-cut dominant color extraction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod palette;

use thiserror::Error;

pub use decode::{decode_bytes, BytesImageSource, FileImageSource, ImageSource};
pub use palette::{MedianCutExtractor, PaletteExtractor, Swatch};

/// Errors that can occur while loading or sampling media
#[derive(Debug, Error)]
pub enum MediaError {
    /// Image decoding error
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable pixels to sample
    #[error("Image has no opaque, non-white pixels to sample")]
    EmptyPalette,

    /// Requested palette size is unusable
    #[error("Invalid palette size: {0}")]
    InvalidPaletteSize(usize),

    /// Background decode task failed
    #[error("Decode task failed: {0}")]
    Task(String),
}

/// Result type for media operations
pub type Result<T> = std::result::Result<T, MediaError>;
