//! Cone-response (LMS) color space.
//!
//! Linear sRGB is taken to CIE XYZ (D65) and from there to LMS with the
//! Hunt-Pointer-Estevez matrix. The two steps are folded into a single
//! [`RGB_TO_LMS`] matrix, and its inverse [`LMS_TO_RGB`] brings simulated
//! cone responses back to linear RGB. All four matrices are evaluated at
//! compile time.
//!
//! Neither direction clamps. A projected deficiency can land outside the
//! RGB gamut; those values are clipped only when the result is re-encoded.
//!
//! # Example
//!
//! ```rust
//! use cvd_color::cone::{inverse_project, project};
//! use cvd_math::Vec3;
//!
//! let rgb = Vec3::new(0.2, 0.5, 0.8);
//! let back = inverse_project(project(rgb));
//! assert!((back - rgb).map(f64::abs).max_element() < 1e-12);
//! ```

use cvd_math::{Mat3, Vec3};
use std::fmt;

/// Linear sRGB to CIE XYZ (D65).
pub const RGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// CIE XYZ to LMS, Hunt-Pointer-Estevez.
pub const XYZ_TO_LMS: Mat3 = Mat3::from_rows([
    [0.4002, 0.7076, -0.0808],
    [-0.2263, 1.1653, 0.0457],
    [0.0, 0.0, 0.9182],
]);

/// Linear sRGB to LMS: `XYZ_TO_LMS * RGB_TO_XYZ`.
pub const RGB_TO_LMS: Mat3 = XYZ_TO_LMS.mul_mat(&RGB_TO_XYZ);

/// LMS to linear sRGB, the inverse of [`RGB_TO_LMS`].
pub const LMS_TO_RGB: Mat3 = match RGB_TO_LMS.inverse() {
    Some(m) => m,
    None => panic!("RGB_TO_LMS is singular"),
};

/// One of the three cone types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cone {
    /// Long-wavelength (red-sensitive) cones.
    Long,
    /// Medium-wavelength (green-sensitive) cones.
    Medium,
    /// Short-wavelength (blue-sensitive) cones.
    Short,
}

impl Cone {
    /// All cones in LMS axis order.
    pub const ALL: [Cone; 3] = [Cone::Long, Cone::Medium, Cone::Short];

    /// Axis of this cone in an LMS triplet.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Long => 0,
            Self::Medium => 1,
            Self::Short => 2,
        }
    }
}

impl fmt::Display for Cone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Long => "L",
            Self::Medium => "M",
            Self::Short => "S",
        })
    }
}

/// Projects linear RGB into LMS cone space.
#[inline]
pub fn project(rgb: Vec3) -> Vec3 {
    RGB_TO_LMS * rgb
}

/// Maps LMS cone responses back to linear RGB.
#[inline]
pub fn inverse_project(lms: Vec3) -> Vec3 {
    LMS_TO_RGB * lms
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_composed_matrix() {
        // First row, computed by hand from the two factors.
        assert_abs_diff_eq!(RGB_TO_LMS.m[0][0], 0.313_990_216_2, epsilon = 1e-12);
        assert_abs_diff_eq!(RGB_TO_LMS.m[0][1], 0.639_512_938_34, epsilon = 1e-12);
        assert_abs_diff_eq!(RGB_TO_LMS.m[0][2], 0.046_497_546_22, epsilon = 1e-12);
        assert_eq!(RGB_TO_LMS, XYZ_TO_LMS * RGB_TO_XYZ);
    }

    #[test]
    fn test_inverse_is_inverse() {
        assert!((LMS_TO_RGB * RGB_TO_LMS).max_abs_diff(&Mat3::IDENTITY) < 1e-12);
        assert!((RGB_TO_LMS * LMS_TO_RGB).max_abs_diff(&Mat3::IDENTITY) < 1e-12);
        assert_abs_diff_eq!(LMS_TO_RGB.m[0][0], 5.472_212_058_380_287, epsilon = 1e-9);
    }

    #[test]
    fn test_white_maps_near_equal_energy() {
        // D65 white lands close to (1, 1, 1) in HPE cone space.
        let lms = project(Vec3::ONE);
        for axis in 0..3 {
            assert_abs_diff_eq!(lms[axis], 1.0, epsilon = 0.05);
        }
    }

    #[test]
    fn test_projection_does_not_clamp() {
        let lms = Vec3::new(-0.3, 2.0, 0.1);
        let rgb = inverse_project(lms);
        assert!(rgb.min_element() < 0.0);
        assert!(rgb.max_element() > 1.0);
    }

    #[test]
    fn test_cone_index() {
        let idx: Vec<usize> = Cone::ALL.iter().map(|c| c.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        assert_eq!(Cone::Medium.to_string(), "M");
    }
}
