//! 8-bit pixel buffers exchanged with capture sources and display sinks.
//!
//! [`PixelBuffer`] is the only image container in the workspace. It stores
//! interleaved 8-bit channels in **row-major** order, top-to-bottom:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! For RGBA buffers alpha is interleaved: `[R G B A R G B A ...]`.
//!
//! # Usage
//!
//! ```rust
//! use cvd_core::{Layout, PixelBuffer};
//!
//! let mut img = PixelBuffer::new(4, 2, Layout::Rgb);
//! img.set_pixel(1, 1, &[255, 0, 0]).unwrap();
//! assert_eq!(img.pixel(1, 1), &[255, 0, 0]);
//! ```

use crate::{Error, Result};

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Three channels: red, green, blue.
    #[default]
    Rgb,
    /// Four channels: red, green, blue, alpha.
    Rgba,
}

impl Layout {
    /// Resolves a channel count to a layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for anything other than 3 or 4.
    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            got => Err(Error::UnsupportedChannels { got }),
        }
    }

    /// Number of interleaved channels.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns `true` when the layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// Owned 8-bit RGB or RGBA image.
///
/// Zero-area buffers (`width == 0` or `height == 0`) are valid and hold no
/// data; every operation on them is a no-op.
///
/// # Example
///
/// ```rust
/// use cvd_core::{Layout, PixelBuffer};
///
/// let img = PixelBuffer::filled(3, 3, Layout::Rgba, &[10, 20, 30, 255]).unwrap();
/// assert_eq!(img.pixel(2, 2), &[10, 20, 30, 255]);
/// assert_eq!(img.data().len(), 3 * 3 * 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    layout: Layout,
}

impl PixelBuffer {
    /// Creates a buffer filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * channels` overflows `usize`.
    pub fn new(width: u32, height: u32, layout: Layout) -> Self {
        let len = buffer_len(width, height, layout.channels())
            .unwrap_or_else(|| panic!("image size {width}x{height} overflows usize"));
        Self {
            data: vec![0; len],
            width,
            height,
            layout,
        }
    }

    /// Creates a buffer from existing interleaved pixel data.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedChannels`] if `channels` is not 3 or 4.
    /// - [`Error::InvalidDimensions`] if the size overflows or `data` has the
    ///   wrong length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cvd_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_data(2, 1, 3, vec![255, 0, 0, 0, 255, 0]).unwrap();
    /// assert_eq!(img.pixel(1, 0), &[0, 255, 0]);
    /// assert!(PixelBuffer::from_data(2, 1, 3, vec![0; 5]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        let layout = Layout::from_channels(channels)?;
        let expected = buffer_len(width, height, channels)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "image size overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Creates a buffer with every pixel set to `pixel`.
    ///
    /// The channel count is taken from `pixel.len()`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_data`](Self::from_data).
    pub fn filled(width: u32, height: u32, layout: Layout, pixel: &[u8]) -> Result<Self> {
        if pixel.len() != layout.channels() {
            return Err(Error::UnsupportedChannels { got: pixel.len() });
        }
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * pixel.len());
        for _ in 0..pixel_count {
            data.extend_from_slice(pixel);
        }
        Self::from_data(width, height, layout.channels(), data)
    }

    /// Creates a zeroed buffer with the same shape as `self`.
    pub fn empty_like(&self) -> Self {
        Self {
            data: vec![0; self.data.len()],
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel layout.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Returns the raw interleaved data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw interleaved data mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its data.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels()
    }

    /// Returns the channels of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        &self.data[offset..offset + self.channels()]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if (x, y) lies outside the image.
    /// - [`Error::UnsupportedChannels`] if `pixel` has the wrong length.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        if pixel.len() != self.channels() {
            return Err(Error::UnsupportedChannels { got: pixel.len() });
        }
        let offset = self.pixel_offset(x, y);
        self.data[offset..offset + pixel.len()].copy_from_slice(pixel);
        Ok(())
    }

    /// Returns a row of pixels as a slice.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Iterates over the pixels in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels())
    }
}

fn buffer_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
}
