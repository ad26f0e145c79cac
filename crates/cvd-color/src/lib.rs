//! # cvd-color
//!
//! Dichromacy simulation for 8-bit sRGB images.
//!
//! An image is re-rendered as it would appear to someone missing one of the
//! three cone types:
//!
//! - **Protanopia** - no long-wavelength (L) cones
//! - **Deuteranopia** - no medium-wavelength (M) cones
//! - **Tritanopia** - no short-wavelength (S) cones
//!
//! # Architecture
//!
//! ```text
//!                    cvd-color
//!                        |
//!     +------------------+------------------+
//!     |                  |                  |
//! cvd-transfer       cvd-math           cvd-core
//! (sRGB curves)    (Mat3, Vec3)     (PixelBuffer, Rect)
//! ```
//!
//! Per pixel, in order:
//!
//! ```text
//! sRGB u8 -> decode -> linear RGB -> RGB_TO_LMS -> deficiency -> LMS_TO_RGB -> encode -> sRGB u8
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use cvd_color::{Deficiency, simulate, simulate_named};
//! use cvd_core::{Layout, PixelBuffer};
//!
//! let img = PixelBuffer::filled(2, 2, Layout::Rgb, &[255, 0, 0]).unwrap();
//!
//! let out = simulate(&img, Deficiency::Protanopia);
//! assert_eq!(out.pixel(0, 0), &[115, 115, 0]);
//!
//! assert!(simulate_named(&img, "xyz").is_err());
//! ```
//!
//! # Modules
//!
//! - [`cone`] - LMS cone space and the projection matrices
//! - [`deficiency`] - the selector and its LMS matrices
//! - [`session`] - capture/simulate/present loop
//!
//! [`Pipeline`] spells the transform out stage by stage; [`Simulator`] runs
//! the fused form over whole images.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod pipeline;
mod simulate;
pub mod cone;
pub mod deficiency;
pub mod session;

pub use cone::Cone;
pub use deficiency::Deficiency;
pub use error::{ColorError, ColorResult};
pub use pipeline::{Pipeline, TransferFn, TransformOp};
pub use session::{CaptureSource, DisplaySink, ViewerSession};
pub use simulate::{PARALLEL_THRESHOLD, Simulator, simulate, simulate_named, simulate_pixel};

// Re-export sub-crates for convenience
pub use cvd_math as math;
pub use cvd_transfer as transfer;
