//! Image-level dichromacy simulation.
//!
//! Every pixel runs decode, project, deficiency, inverse project and encode.
//! The three matrix stages are folded into one matrix per selector at compile
//! time, so the per-pixel work is three table lookups, one 3x3 product and
//! three encodes.
//!
//! Large images are split into row bands and processed with rayon. Small ones
//! stay on the calling thread. Either way the output is byte-identical.
//!
//! # Example
//!
//! ```rust
//! use cvd_color::{Deficiency, simulate, simulate_pixel};
//! use cvd_core::{Layout, PixelBuffer};
//!
//! assert_eq!(simulate_pixel([255, 0, 0], Deficiency::Protanopia), [115, 115, 0]);
//!
//! let img = PixelBuffer::filled(8, 8, Layout::Rgba, &[255, 0, 0, 40]).unwrap();
//! let out = simulate(&img, Deficiency::Protanopia);
//! assert_eq!(out.pixel(3, 3), &[115, 115, 0, 40]);
//! ```

use crate::cone::{LMS_TO_RGB, RGB_TO_LMS};
use crate::deficiency::{DEUTERANOPIA, PROTANOPIA, TRITANOPIA};
use crate::{ColorResult, Deficiency};
use cvd_core::PixelBuffer;
use cvd_math::{Mat3, Vec3};
use cvd_transfer::srgb::{decode_u8, encode_u8};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Images with fewer pixels than this are processed serially.
pub const PARALLEL_THRESHOLD: usize = 64 * 64;

const fn fuse(deficiency: &Mat3) -> Mat3 {
    LMS_TO_RGB.mul_mat(&deficiency.mul_mat(&RGB_TO_LMS))
}

// Linear RGB to simulated linear RGB, indexed by `Deficiency as usize`.
const FUSED: [Mat3; 4] = [
    fuse(&Mat3::IDENTITY),
    fuse(&PROTANOPIA),
    fuse(&DEUTERANOPIA),
    fuse(&TRITANOPIA),
];

/// Per-selector simulator holding the fused linear-RGB matrix.
///
/// Cheap to construct and `Copy`; build one per call or keep it around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulator {
    deficiency: Deficiency,
    matrix: Mat3,
}

impl Simulator {
    /// Creates a simulator for the given selector.
    pub fn new(deficiency: Deficiency) -> Self {
        Self {
            deficiency,
            matrix: FUSED[deficiency as usize],
        }
    }

    /// The selector this simulator applies.
    #[inline]
    pub fn deficiency(&self) -> Deficiency {
        self.deficiency
    }

    /// Fused matrix: `LMS_TO_RGB * D * RGB_TO_LMS`, acting on linear RGB.
    #[inline]
    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    /// Simulates one sRGB pixel.
    #[inline]
    pub fn apply_pixel(&self, rgb: [u8; 3]) -> [u8; 3] {
        let linear = Vec3::new(decode_u8(rgb[0]), decode_u8(rgb[1]), decode_u8(rgb[2]));
        let out = self.matrix.transform(linear);
        [encode_u8(out.x), encode_u8(out.y), encode_u8(out.z)]
    }

    fn apply_row(&self, row: &mut [u8], channels: usize) {
        for px in row.chunks_exact_mut(channels) {
            let out = self.apply_pixel([px[0], px[1], px[2]]);
            px[..3].copy_from_slice(&out);
        }
    }

    /// Simulates an image in place. Alpha bytes are not touched.
    pub fn apply_in_place(&self, image: &mut PixelBuffer) {
        if image.is_empty() {
            trace!("simulate: empty image");
            return;
        }

        let (width, height) = image.dimensions();
        let channels = image.channels();
        let row_len = image.row_len();
        let parallel = image.pixel_count() >= PARALLEL_THRESHOLD;
        debug!(width, height, channels, parallel, deficiency = %self.deficiency, "simulate");

        let data = image.data_mut();
        if parallel {
            data.par_chunks_mut(row_len)
                .for_each(|row| self.apply_row(row, channels));
        } else {
            data.chunks_mut(row_len)
                .for_each(|row| self.apply_row(row, channels));
        }
    }

    /// Serial variant of [`apply_in_place`](Self::apply_in_place).
    pub fn apply_in_place_serial(&self, image: &mut PixelBuffer) {
        if image.is_empty() {
            return;
        }
        let channels = image.channels();
        let row_len = image.row_len();
        image
            .data_mut()
            .chunks_mut(row_len)
            .for_each(|row| self.apply_row(row, channels));
    }

    /// Returns a simulated copy of `image`.
    pub fn apply(&self, image: &PixelBuffer) -> PixelBuffer {
        let mut out = image.clone();
        self.apply_in_place(&mut out);
        out
    }
}

impl From<Deficiency> for Simulator {
    fn from(deficiency: Deficiency) -> Self {
        Self::new(deficiency)
    }
}

/// Simulates `image` as seen with the given deficiency.
///
/// Width, height and channel count are preserved, alpha is copied verbatim,
/// and a zero-area input yields a zero-area output of the same shape.
pub fn simulate(image: &PixelBuffer, deficiency: Deficiency) -> PixelBuffer {
    Simulator::new(deficiency).apply(image)
}

/// Parses `name` as a selector and simulates `image` with it.
///
/// # Errors
///
/// [`ColorError::UnsupportedTransform`](crate::ColorError::UnsupportedTransform)
/// when `name` is not a known selector.
pub fn simulate_named(image: &PixelBuffer, name: &str) -> ColorResult<PixelBuffer> {
    let deficiency: Deficiency = name.parse()?;
    Ok(simulate(image, deficiency))
}

/// Simulates a single sRGB pixel.
#[inline]
pub fn simulate_pixel(rgb: [u8; 3], deficiency: Deficiency) -> [u8; 3] {
    Simulator::new(deficiency).apply_pixel(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;
    use cvd_core::Layout;

    #[test]
    fn test_fused_matches_optimized_pipeline() {
        for d in Deficiency::ALL {
            let from_pipeline = Pipeline::for_deficiency(d).optimize().combined_matrix();
            assert!(
                Simulator::new(d).matrix().max_abs_diff(&from_pipeline) < 1e-12,
                "{d}"
            );
        }
    }

    #[test]
    fn test_pixel_matches_staged_pipeline() {
        let samples = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [128, 64, 32], [17, 200, 90]];
        for d in Deficiency::ALL {
            let staged = Pipeline::for_deficiency(d);
            for rgb in samples {
                let norm = rgb.map(|c| c as f64 / 255.0);
                let expected = staged.apply(norm).map(|v| (v * 255.0).round() as u8);
                assert_eq!(simulate_pixel(rgb, d), expected, "{d} {rgb:?}");
            }
        }
    }

    #[test]
    fn test_oracle_values() {
        use Deficiency::*;
        let cases = [
            (Protanopia, [255, 0, 0], [115, 115, 0]),
            (Protanopia, [0, 255, 0], [235, 235, 14]),
            (Protanopia, [128, 64, 32], [80, 80, 31]),
            (Deuteranopia, [255, 0, 0], [156, 156, 0]),
            (Deuteranopia, [0, 255, 0], [214, 214, 46]),
            (Tritanopia, [0, 255, 0], [100, 240, 240]),
            (Tritanopia, [0, 0, 255], [0, 99, 99]),
            (Tritanopia, [128, 64, 32], [129, 61, 61]),
        ];
        for (d, input, expected) in cases {
            assert_eq!(simulate_pixel(input, d), expected, "{d} {input:?}");
        }
    }

    #[test]
    fn test_rgb_and_rgba_agree() {
        let rgb = PixelBuffer::filled(5, 3, Layout::Rgb, &[30, 160, 220]).unwrap();
        let rgba = PixelBuffer::filled(5, 3, Layout::Rgba, &[30, 160, 220, 7]).unwrap();
        let a = simulate(&rgb, Deficiency::Deuteranopia);
        let b = simulate(&rgba, Deficiency::Deuteranopia);
        assert_eq!(&a.pixel(4, 2)[..3], &b.pixel(4, 2)[..3]);
        assert_eq!(b.pixel(4, 2)[3], 7);
    }

    #[test]
    fn test_zero_area_is_noop() {
        for (w, h) in [(0, 0), (0, 5), (5, 0)] {
            let img = PixelBuffer::new(w, h, Layout::Rgba);
            let out = simulate(&img, Deficiency::Tritanopia);
            assert_eq!(out, img);
            assert!(out.data().is_empty());
        }
    }

    #[test]
    fn test_simulate_named_rejects_unknown() {
        let img = PixelBuffer::new(1, 1, Layout::Rgb);
        let err = simulate_named(&img, "xyz").unwrap_err();
        assert!(err.is_unsupported_transform());
        assert_eq!(err.to_string(), "unsupported transform provided: xyz");
    }
}
