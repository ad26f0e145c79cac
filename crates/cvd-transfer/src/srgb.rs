//! sRGB transfer function.
//!
//! The sRGB standard uses a piecewise function combining a linear segment
//! near black with a power curve (approximately gamma 2.2) for the rest.
//! The linear segment avoids the infinite slope of the power law at zero.
//!
//! # Range
//!
//! - [`eotf`] / [`oetf`]: normalized [0, 1]
//! - [`decode_u8`] / [`encode_u8`]: 8-bit channel values [0, 255]
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

use std::sync::LazyLock;

/// Encoded value at which the decode curve switches from linear to power.
pub const DECODE_THRESHOLD: f64 = 0.04045;

/// Linear value at which the encode curve switches from linear to power.
pub const ENCODE_THRESHOLD: f64 = 0.0031308;

/// sRGB EOTF: Decodes sRGB encoded values to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use cvd_transfer::srgb::eotf;
///
/// let linear = eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f64) -> f64 {
    if v <= DECODE_THRESHOLD {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: Encodes linear light to sRGB.
///
/// Values at or below the threshold, negative ones included, stay on the
/// linear segment, so the result is defined for any finite input.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn oetf(l: f64) -> f64 {
    if l <= ENCODE_THRESHOLD {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Applies sRGB EOTF to an RGB triplet.
#[inline]
pub fn eotf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    [eotf(rgb[0]), eotf(rgb[1]), eotf(rgb[2])]
}

/// Applies sRGB OETF to an RGB triplet.
#[inline]
pub fn oetf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    [oetf(rgb[0]), oetf(rgb[1]), oetf(rgb[2])]
}

static DECODE_LUT: LazyLock<[f64; 256]> =
    LazyLock::new(|| std::array::from_fn(|c| eotf(c as f64 / 255.0)));

/// Decodes an 8-bit sRGB channel to linear light.
///
/// Equivalent to `eotf(c / 255)`; served from a table built on first use.
///
/// # Example
///
/// ```rust
/// use cvd_transfer::srgb::decode_u8;
///
/// assert_eq!(decode_u8(0), 0.0);
/// assert_eq!(decode_u8(255), 1.0);
/// ```
#[inline]
pub fn decode_u8(c: u8) -> f64 {
    DECODE_LUT[c as usize]
}

/// Quantizes a value on the [0, 255] scale to an 8-bit channel.
///
/// Out-of-range values are clamped, the rest rounded half away from zero.
/// NaN maps to 0.
#[inline]
pub fn quantize(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round() as u8
}

/// Encodes linear light to an 8-bit sRGB channel.
///
/// Computes `255 * oetf(l)` and then [`quantize`]s it. Linear values outside
/// [0, 1] are expected when a projection leaves the display gamut; they clip
/// to 0 or 255.
///
/// # Example
///
/// ```rust
/// use cvd_transfer::srgb::encode_u8;
///
/// assert_eq!(encode_u8(1.0), 255);
/// assert_eq!(encode_u8(2.5), 255);
/// assert_eq!(encode_u8(-0.1), 0);
/// ```
#[inline]
pub fn encode_u8(l: f64) -> u8 {
    quantize(255.0 * oetf(l))
}
