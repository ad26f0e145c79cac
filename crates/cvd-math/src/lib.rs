//! # cvd-math
//!
//! Math primitives for color vision simulation:
//!
//! - [`Mat3`] - 3x3 matrices for RGB/XYZ/LMS transforms
//! - [`Vec3`] - 3D vectors for color triplets
//!
//! # Design
//!
//! Values are `f64` and the matrix algebra is `const fn`, so fixed
//! color-space matrices and their products and inverses can be evaluated at
//! compile time. [`glam`] conversions are provided for callers that already
//! work with `DMat3`/`DVec3`.
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cvd_math::{Mat3, Vec3};
//!
//! const SCALE: Mat3 = Mat3::diagonal(2.0, 2.0, 2.0);
//! const HALF: Mat3 = match SCALE.inverse() {
//!     Some(m) => m,
//!     None => panic!("singular"),
//! };
//!
//! assert_eq!(HALF * Vec3::ONE, Vec3::splat(0.5));
//! ```
//!
//! # Used By
//!
//! - `cvd-color` - Cone-space projection and deficiency matrices

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
mod vec3;

pub use mat3::*;
pub use vec3::*;
