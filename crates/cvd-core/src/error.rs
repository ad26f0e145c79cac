//! Error types for cvd-core operations.
//!
//! This module provides the error type shared by every crate that handles
//! pixel buffers: buffer construction, pixel access and the screen-capture
//! collaborator that feeds the simulator.
//!
//! # Usage
//!
//! ```rust
//! use cvd_core::{Error, Result};
//!
//! fn check_pixel(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing pixel buffers.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Shape errors**: [`InvalidDimensions`](Error::InvalidDimensions), [`UnsupportedChannels`](Error::UnsupportedChannels)
/// - **Collaborator errors**: [`Capture`](Error::Capture), [`Io`](Error::Io)
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cvd_core::Error;
    ///
    /// let err = Error::out_of_bounds(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when the data length does not match `width * height * channels`,
    /// when the size computation overflows, or when a capture region has
    /// zero area.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count is neither 3 (RGB) nor 4 (RGBA).
    #[error("unsupported channel count: {got} (expected 3 or 4)")]
    UnsupportedChannels {
        /// Channel count that was supplied
        got: usize,
    },

    /// The screen-capture collaborator failed to produce pixels.
    #[error("capture failed: {reason}")]
    Capture {
        /// Description reported by the capture source
        reason: String,
    },

    /// I/O error raised by a collaborator reading pixel data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Capture`] error.
    #[inline]
    pub fn capture(reason: impl Into<String>) -> Self {
        Self::Capture {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if the error originated in a capture collaborator.
    #[inline]
    pub fn is_capture_error(&self) -> bool {
        matches!(self, Self::Capture { .. } | Self::Io(_))
    }
}
