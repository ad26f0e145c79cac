//! Dichromacy selector and LMS projection matrices.
//!
//! A dichromat lacks one of the three cone types. Each matrix here passes the
//! two remaining cones through unchanged (their rows are standard basis
//! vectors) and rebuilds the missing cone's response as a fixed combination
//! of the other two, collapsing colors that differ only along the lost axis.
//!
//! Selection is a closed enum dispatched through a lookup table. Parsing
//! from text happens once at the boundary and rejects unknown names.
//!
//! # Example
//!
//! ```rust
//! use cvd_color::{Cone, Deficiency};
//!
//! let d: Deficiency = "Protanopia".parse().unwrap();
//! assert_eq!(d.missing_cone(), Some(Cone::Long));
//! assert!("sepia".parse::<Deficiency>().is_err());
//! ```

use crate::ColorError;
use crate::cone::Cone;
use cvd_math::{Mat3, Vec3};
use std::fmt;
use std::str::FromStr;

/// Protanopia: L cones missing.
pub const PROTANOPIA: Mat3 = Mat3::from_rows([
    [0.0, 1.05118294, -0.05116099],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
]);

/// Deuteranopia: M cones missing.
pub const DEUTERANOPIA: Mat3 = Mat3::from_rows([
    [1.0, 0.0, 0.0],
    [0.9513092, 0.0, 0.04866992],
    [0.0, 0.0, 1.0],
]);

/// Tritanopia: S cones missing.
pub const TRITANOPIA: Mat3 = Mat3::from_rows([
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-0.86744736, 1.86727089, 0.0],
]);

// Indexed by `Deficiency as usize`.
static MATRICES: [Mat3; 4] = [Mat3::IDENTITY, PROTANOPIA, DEUTERANOPIA, TRITANOPIA];

/// Which simulation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deficiency {
    /// No simulation; the LMS values pass through the identity.
    #[default]
    Original = 0,
    /// Missing long-wavelength cones.
    Protanopia = 1,
    /// Missing medium-wavelength cones.
    Deuteranopia = 2,
    /// Missing short-wavelength cones.
    Tritanopia = 3,
}

impl Deficiency {
    /// Every selector, in menu order.
    pub const ALL: [Deficiency; 4] = [
        Deficiency::Original,
        Deficiency::Protanopia,
        Deficiency::Deuteranopia,
        Deficiency::Tritanopia,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
        }
    }

    /// The cone type this deficiency removes, `None` for [`Original`](Self::Original).
    pub const fn missing_cone(self) -> Option<Cone> {
        match self {
            Self::Original => None,
            Self::Protanopia => Some(Cone::Long),
            Self::Deuteranopia => Some(Cone::Medium),
            Self::Tritanopia => Some(Cone::Short),
        }
    }

    /// LMS-space matrix applied by this selector.
    #[inline]
    pub fn matrix(self) -> &'static Mat3 {
        &MATRICES[self as usize]
    }

    /// Applies the deficiency matrix to an LMS triplet.
    #[inline]
    pub fn apply(self, lms: Vec3) -> Vec3 {
        *self.matrix() * lms
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Deficiency {
    type Err = ColorError;

    /// Parses a selector name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ColorError::UnsupportedTransform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basis(cone: Cone) -> [f64; 3] {
        let mut row = [0.0; 3];
        row[cone.index()] = 1.0;
        row
    }

    #[test]
    fn test_surviving_cones_pass_through() {
        for d in Deficiency::ALL {
            let m = d.matrix();
            for cone in Cone::ALL {
                if Some(cone) != d.missing_cone() {
                    assert_eq!(m[cone.index()], basis(cone), "{d}: {cone} row altered");
                }
            }
        }
    }

    #[test]
    fn test_missing_cone_ignores_itself() {
        // The rebuilt response never reads from the missing axis.
        for d in Deficiency::ALL {
            if let Some(cone) = d.missing_cone() {
                let i = cone.index();
                assert_eq!(d.matrix()[i][i], 0.0, "{d}");
                assert_ne!(d.matrix()[i], basis(cone), "{d}");
            }
        }
    }

    #[test]
    fn test_original_is_identity() {
        assert_eq!(*Deficiency::Original.matrix(), Mat3::IDENTITY);
        let v = Vec3::new(0.3, -0.2, 1.7);
        assert_eq!(Deficiency::Original.apply(v), v);
    }

    #[test]
    fn test_lookup_table_order() {
        assert_eq!(*Deficiency::Protanopia.matrix(), PROTANOPIA);
        assert_eq!(*Deficiency::Deuteranopia.matrix(), DEUTERANOPIA);
        assert_eq!(*Deficiency::Tritanopia.matrix(), TRITANOPIA);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("ORIGINAL".parse::<Deficiency>().unwrap(), Deficiency::Original);
        assert_eq!("Deuteranopia".parse::<Deficiency>().unwrap(), Deficiency::Deuteranopia);
        assert_eq!("tritanopia".parse::<Deficiency>().unwrap(), Deficiency::Tritanopia);
        for d in Deficiency::ALL {
            assert_eq!(d.to_string().parse::<Deficiency>().unwrap(), d);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["xyz", "", "protan", " protanopia", "normal"] {
            match bad.parse::<Deficiency>() {
                Err(ColorError::UnsupportedTransform(v)) => assert_eq!(v, bad),
                other => panic!("{bad:?} parsed as {other:?}"),
            }
        }
    }
}
